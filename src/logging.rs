//! Logging setup
//!
//! Installs a `tracing` subscriber that writes to stderr or appends to a log
//! file. Stdout is reserved for response lines, so logs never go there.
//!
//! The `RUST_LOG` environment variable, when set, takes precedence over the
//! configured level.

use crate::types::AuthorizerError;
use clap::ValueEnum;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Minimum severity of messages that are logged
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl LogLevel {
    /// The string form understood by `EnvFilter`
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Where and how much to log
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogConfig {
    pub level: LogLevel,
    /// Append to this file instead of writing to stderr
    pub file_path: Option<PathBuf>,
}

/// Build the level filter, letting `RUST_LOG` override the configured level
fn build_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()))
}

/// Install the global subscriber
///
/// # Errors
///
/// Returns an error if:
/// - The log file cannot be opened for appending
/// - A global subscriber is already installed
pub fn init_logging(config: &LogConfig) -> Result<(), AuthorizerError> {
    let filter = build_filter(config.level);
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);

    match &config.file_path {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| AuthorizerError::logging(format!("{}: {}", path.display(), e)))?;

            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|e| AuthorizerError::logging(e.to_string()))
        }
        None => builder
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| AuthorizerError::logging(e.to_string())),
    }
}
