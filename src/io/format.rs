//! Output line format
//!
//! Every input line produces exactly one output line: either the JSON
//! response envelope or the literal [`UNKNOWN_COMMAND`].

use crate::types::{AuthorizationResponse, AuthorizerError};
use std::io::Write;

/// Written in place of a response for lines that are not commands
pub const UNKNOWN_COMMAND: &str = "unknown-command";

/// Serialize a response envelope to its single-line JSON form
pub fn format_response(response: &AuthorizationResponse) -> Result<String, AuthorizerError> {
    Ok(serde_json::to_string(response)?)
}

/// Write one output line
pub fn write_line(output: &mut dyn Write, line: &str) -> Result<(), AuthorizerError> {
    writeln!(output, "{}", line)?;
    Ok(())
}
