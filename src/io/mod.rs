//! I/O module
//!
//! Handles the line-oriented wire format.
//!
//! # Components
//!
//! - `reader` - JSON input line to typed command
//! - `format` - Response envelope to JSON output line

pub mod format;
pub mod reader;

pub use format::{format_response, write_line, UNKNOWN_COMMAND};
pub use reader::{read_command, Command, ReadOutcome};
