use crate::core::rules::{RuleConfig, DEFAULT_MAX_IN_WINDOW, DEFAULT_WINDOW_SECS};
use crate::logging::{LogConfig, LogLevel};
use chrono::TimeDelta;
use clap::Parser;
use std::path::PathBuf;

/// Authorize card transactions read as JSON lines
#[derive(Parser, Debug)]
#[command(name = "card-authorizer")]
#[command(about = "Authorize card transactions read as JSON lines", long_about = None)]
pub struct CliArgs {
    /// Input file with one JSON command per line; stdin when omitted
    #[arg(value_name = "INPUT", help = "Path to the input file (default: stdin)")]
    pub input_file: Option<PathBuf>,

    /// Minimum severity of log messages
    #[arg(
        long = "log-level",
        value_name = "LEVEL",
        value_enum,
        default_value_t = LogLevel::Warn,
        help = "Log level: trace, debug, info, warn or error (RUST_LOG overrides)"
    )]
    pub log_level: LogLevel,

    /// Append logs to this file instead of stderr
    #[arg(long = "log-file", value_name = "PATH", help = "Append logs to a file")]
    pub log_file: Option<PathBuf>,

    /// Width of the doubled/high-frequency window in seconds
    #[arg(
        long = "window-secs",
        value_name = "SECONDS",
        help = "Time window for doubled and high-frequency checks (default: 120)"
    )]
    pub window_secs: Option<u64>,

    /// Past transactions in the window that trigger high-frequency
    #[arg(
        long = "max-in-window",
        value_name = "COUNT",
        help = "Transactions within the window that trigger high-frequency (default: 2)"
    )]
    pub max_in_window: Option<usize>,
}

impl CliArgs {
    /// Create a RuleConfig from CLI arguments
    ///
    /// Missing values use the defaults. Zero or out-of-range values fall back
    /// to the defaults with a warning.
    pub fn to_rule_config(&self) -> RuleConfig {
        let window = self
            .window_secs
            .map(|secs| {
                i64::try_from(secs)
                    .ok()
                    .and_then(TimeDelta::try_seconds)
                    .unwrap_or_else(TimeDelta::zero)
            })
            .unwrap_or_else(|| TimeDelta::seconds(DEFAULT_WINDOW_SECS));

        RuleConfig::new(window, self.max_in_window.unwrap_or(DEFAULT_MAX_IN_WINDOW))
    }

    /// Create a LogConfig from CLI arguments
    pub fn to_log_config(&self) -> LogConfig {
        LogConfig {
            level: self.log_level,
            file_path: self.log_file.clone(),
        }
    }
}
