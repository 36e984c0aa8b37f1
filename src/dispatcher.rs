//! Command dispatcher
//!
//! Reads input line by line, hands each recognized command to an
//! [`Authorizer`] and writes one output line per input line.
//!
//! # Error Handling
//!
//! - Unrecognized lines, including lines that are not valid UTF-8, produce
//!   `unknown-command` and processing continues
//! - Operational errors from the authorizer are logged; the response they
//!   carry is still written and processing continues
//! - Failing to read input or write output stops the run

use crate::core::Authorizer;
use crate::io::{
    format_response, read_command, write_line, Command, ReadOutcome, UNKNOWN_COMMAND,
};
use crate::types::{AuthorizationResponse, AuthorizerError, OperationError};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use std::string::FromUtf8Error;
use tracing::{debug, error, info};

/// Counters collected over one dispatcher run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    /// Input lines read
    pub lines: usize,
    /// Lines that were not commands
    pub unrecognized: usize,
    /// Commands answered without violations
    pub accepted: usize,
    /// Commands answered with a violation
    pub rejected: usize,
    /// Commands that hit an operational error
    pub failed: usize,
}

/// Open the input source: the file at `path`, or stdin when `None`
pub fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>, AuthorizerError> {
    match path {
        Some(path) => {
            let file = File::open(path).map_err(|e| {
                AuthorizerError::io(format!("Failed to open file '{}': {}", path.display(), e))
            })?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

/// Process every line of `input`, writing responses to `output`
///
/// # Returns
///
/// * `Ok(DispatchStats)` once the input is exhausted
/// * `Err(AuthorizerError)` if reading, serializing or writing failed
pub fn execute(
    authorizer: &mut dyn Authorizer,
    input: impl BufRead,
    output: &mut dyn Write,
) -> Result<DispatchStats, AuthorizerError> {
    let mut stats = DispatchStats::default();

    for raw in input.split(b'\n') {
        let raw = raw?;
        stats.lines += 1;

        let line = match decode_line(raw) {
            Ok(line) => line,
            Err(e) => {
                debug!(line = stats.lines, error = %e, "input line is not UTF-8");
                stats.unrecognized += 1;
                write_line(output, UNKNOWN_COMMAND)?;
                continue;
            }
        };

        let command = match read_command(&line) {
            ReadOutcome::Command(command) => command,
            ReadOutcome::Unrecognized(reason) => {
                debug!(line = stats.lines, %reason, "unknown command");
                stats.unrecognized += 1;
                write_line(output, UNKNOWN_COMMAND)?;
                continue;
            }
        };

        let response = match dispatch(authorizer, command) {
            Ok(response) => {
                if response.is_accepted() {
                    stats.accepted += 1;
                } else {
                    stats.rejected += 1;
                }
                response
            }
            Err(OperationError { response, source }) => {
                error!(line = stats.lines, error = %source, "command failed");
                stats.failed += 1;
                response
            }
        };

        write_line(output, &format_response(&response)?)?;
    }

    output.flush()?;

    info!(
        lines = stats.lines,
        accepted = stats.accepted,
        rejected = stats.rejected,
        failed = stats.failed,
        unrecognized = stats.unrecognized,
        "input processed"
    );
    Ok(stats)
}

/// Strip a trailing carriage return and decode the line as UTF-8
fn decode_line(mut raw: Vec<u8>) -> Result<String, FromUtf8Error> {
    if raw.last() == Some(&b'\r') {
        raw.pop();
    }
    String::from_utf8(raw)
}

fn dispatch(
    authorizer: &mut dyn Authorizer,
    command: Command,
) -> Result<AuthorizationResponse, OperationError> {
    match command {
        Command::CreateAccount(account) => authorizer.create_account(account),
        Command::ProcessTransaction {
            account_id,
            transaction,
        } => authorizer.process_transaction(account_id, transaction),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AuthorizationService, InMemoryStore};
    use crate::types::{Account, AccountId, Transaction, Violation};
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Authorizer that answers with canned responses and records its calls
    #[derive(Default)]
    struct MockAuthorizer {
        created: Vec<Account>,
        processed: Vec<(AccountId, Transaction)>,
        fail_transactions: bool,
    }

    impl Authorizer for MockAuthorizer {
        fn create_account(
            &mut self,
            account: Account,
        ) -> Result<AuthorizationResponse, OperationError> {
            if let Some(existing) = self.created.iter().find(|a| a.id == account.id) {
                return Ok(AuthorizationResponse::rejected(
                    existing.clone(),
                    Violation::AccountAlreadyInitialized,
                ));
            }
            self.created.push(account.clone());
            Ok(AuthorizationResponse::accepted(account))
        }

        fn process_transaction(
            &mut self,
            account_id: AccountId,
            transaction: Transaction,
        ) -> Result<AuthorizationResponse, OperationError> {
            self.processed.push((account_id, transaction));
            let response = AuthorizationResponse::accepted(Account::new(account_id, true, 100));
            if self.fail_transactions {
                return Err(OperationError::new(
                    response,
                    AuthorizerError::storage_failure("execute_transaction", "offline"),
                ));
            }
            Ok(response)
        }
    }

    fn run(authorizer: &mut dyn Authorizer, input: &str) -> (String, DispatchStats) {
        let mut output = Vec::new();
        let stats = execute(authorizer, input.as_bytes(), &mut output).unwrap();
        (String::from_utf8(output).unwrap(), stats)
    }

    #[test]
    fn test_unknown_command() {
        let mut mock = MockAuthorizer::default();

        let (output, stats) = run(&mut mock, "abcde");

        assert_eq!(output, "unknown-command\n");
        assert_eq!(stats.unrecognized, 1);
        assert!(mock.created.is_empty());
        assert!(mock.processed.is_empty());
    }

    #[test]
    fn test_create_account_line() {
        let mut mock = MockAuthorizer::default();

        let (output, _) = run(
            &mut mock,
            r#"{"account": { "activeCard": true, "availableLimit": 10 } }"#,
        );

        assert_eq!(
            output,
            "{\"account\":{\"activeCard\":true,\"availableLimit\":10},\"violations\":[]}\n"
        );
        assert_eq!(mock.created, vec![Account::new(1, true, 10)]);
    }

    #[test]
    fn test_double_create_account_lines() {
        let mut mock = MockAuthorizer::default();
        let input = "{\"account\": { \"activeCard\": true, \"availableLimit\": 10 } }\n\
                     {\"account\": { \"activeCard\": true, \"availableLimit\": 350 } }\n";

        let (output, stats) = run(&mut mock, input);

        assert_eq!(
            output,
            "{\"account\":{\"activeCard\":true,\"availableLimit\":10},\"violations\":[]}\n\
             {\"account\":{\"activeCard\":true,\"availableLimit\":10},\"violations\":[\"account-already-initialized\"]}\n"
        );
        assert_eq!(mock.created, vec![Account::new(1, true, 10)]);
        assert_eq!(stats.accepted, 1);
        assert_eq!(stats.rejected, 1);
    }

    #[test]
    fn test_transaction_line_uses_default_account() {
        let mut mock = MockAuthorizer::default();

        run(
            &mut mock,
            r#"{ "transaction": { "merchant": "Habbib's", "amount": 90, "time": "2019-02-13T11:00:00.000Z" } }"#,
        );

        assert_eq!(mock.processed.len(), 1);
        assert_eq!(mock.processed[0].0, 1);
        assert_eq!(mock.processed[0].1.merchant, "Habbib's");
    }

    #[test]
    fn test_one_output_line_per_input_line() {
        let mut mock = MockAuthorizer::default();
        let input = "{\"account\": {\"activeCard\": true, \"availableLimit\": 100}}\n\
                     \n\
                     not json\n\
                     {\"transaction\": {\"merchant\": \"A\", \"amount\": 1, \"time\": \"2019-02-13T10:00:00Z\"}}\n";

        let (output, stats) = run(&mut mock, input);

        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], UNKNOWN_COMMAND);
        assert_eq!(lines[2], UNKNOWN_COMMAND);
        assert_eq!(
            stats,
            DispatchStats {
                lines: 4,
                unrecognized: 2,
                accepted: 2,
                rejected: 0,
                failed: 0,
            }
        );
    }

    #[test]
    fn test_operational_error_still_writes_response() {
        let mut mock = MockAuthorizer {
            fail_transactions: true,
            ..Default::default()
        };
        let input = "{\"transaction\": {\"merchant\": \"A\", \"amount\": 1, \"time\": \"2019-02-13T10:00:00Z\"}}\n\
                     {\"transaction\": {\"merchant\": \"B\", \"amount\": 2, \"time\": \"2019-02-13T10:05:00Z\"}}\n";

        let (output, stats) = run(&mut mock, input);

        assert_eq!(output.lines().count(), 2);
        assert_eq!(stats.failed, 2);
        assert_eq!(mock.processed.len(), 2);
    }

    #[test]
    fn test_invalid_utf8_line_is_unknown_command() {
        let mut mock = MockAuthorizer::default();
        let mut input = Vec::new();
        input.extend_from_slice(b"{\"account\": {\"activeCard\": true, \"availableLimit\": 100}}\n");
        input.extend_from_slice(b"\xff\xfe garbage\n");
        input.extend_from_slice(
            b"{\"transaction\": {\"merchant\": \"A\", \"amount\": 1, \"time\": \"2019-02-13T10:00:00Z\"}}\n",
        );
        let mut output = Vec::new();

        let stats = execute(&mut mock, input.as_slice(), &mut output).unwrap();

        let output = String::from_utf8(output).unwrap();
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], UNKNOWN_COMMAND);
        assert_eq!(mock.processed.len(), 1);
        assert_eq!(stats.unrecognized, 1);
        assert_eq!(stats.accepted, 2);
    }

    #[test]
    fn test_crlf_line_endings() {
        let mut mock = MockAuthorizer::default();
        let input = "{\"account\": {\"activeCard\": true, \"availableLimit\": 10}}\r\n\r\n";

        let (output, stats) = run(&mut mock, input);

        assert_eq!(
            output,
            "{\"account\":{\"activeCard\":true,\"availableLimit\":10},\"violations\":[]}\n\
             unknown-command\n"
        );
        assert_eq!(stats.lines, 2);
    }

    #[test]
    fn test_empty_input_writes_nothing() {
        let mut mock = MockAuthorizer::default();

        let (output, stats) = run(&mut mock, "");

        assert!(output.is_empty());
        assert_eq!(stats, DispatchStats::default());
    }

    #[test]
    fn test_execute_with_service() {
        let mut service = AuthorizationService::new(InMemoryStore::new());
        let input = "{\"account\": {\"activeCard\": true, \"availableLimit\": 100}}\n\
                     {\"transaction\": {\"merchant\": \"Burger King\", \"amount\": 20, \"time\": \"2019-02-13T10:00:00.000Z\"}}\n\
                     {\"transaction\": {\"merchant\": \"Burger King\", \"amount\": 20, \"time\": \"2019-02-13T10:01:00.000Z\"}}\n";

        let (output, _) = run(&mut service, input);

        assert_eq!(
            output,
            "{\"account\":{\"activeCard\":true,\"availableLimit\":100},\"violations\":[]}\n\
             {\"account\":{\"activeCard\":true,\"availableLimit\":80},\"violations\":[]}\n\
             {\"account\":{\"activeCard\":true,\"availableLimit\":80},\"violations\":[\"doubled-transaction\"]}\n"
        );
    }

    #[test]
    fn test_open_input_reads_file() {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        writeln!(file, "hello").unwrap();
        file.flush().unwrap();

        let input = open_input(Some(file.path())).unwrap();
        let lines: Vec<_> = input.lines().map(Result::unwrap).collect();

        assert_eq!(lines, vec!["hello".to_string()]);
    }

    #[test]
    fn test_open_input_missing_file() {
        let result = open_input(Some(Path::new("nonexistent.jsonl")));

        match result {
            Err(AuthorizerError::Io { message }) => {
                assert!(message.contains("Failed to open file"))
            }
            other => panic!("expected I/O error, got {:?}", other.map(|_| ())),
        }
    }
}
