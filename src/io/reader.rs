//! Command line reader
//!
//! Turns one raw input line into a typed command. Each line is a JSON object
//! carrying exactly one of two keys:
//!
//! ```text
//! {"account": {"activeCard": true, "availableLimit": 100}}
//! {"transaction": {"merchant": "Burger King", "amount": 20, "time": "2019-02-13T10:00:00.000Z"}}
//! ```
//!
//! The account identifier is optional in both forms (`account.id` and a
//! top-level `accountId`). When it is missing or zero the reader substitutes
//! [`DEFAULT_ACCOUNT_ID`], so the core only ever sees resolved identifiers.
//!
//! Lines that are not valid JSON, or that do not match either shape, are
//! reported as [`ReadOutcome::Unrecognized`] and never reach the core.

use crate::types::{Account, AccountId, Transaction, DEFAULT_ACCOUNT_ID};
use serde::Deserialize;
use tracing::debug;

/// A recognized command, with its account identifier resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    CreateAccount(Account),
    ProcessTransaction {
        account_id: AccountId,
        transaction: Transaction,
    },
}

/// Result of reading one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    Command(Command),
    /// The line is not a command; carries the reason for diagnostics
    Unrecognized(String),
}

/// JSON shape of an input line
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCommand {
    account: Option<Account>,
    transaction: Option<Transaction>,
    account_id: Option<AccountId>,
}

fn resolve_id(id: Option<AccountId>) -> AccountId {
    match id {
        Some(id) if id != 0 => id,
        _ => DEFAULT_ACCOUNT_ID,
    }
}

/// Parse one input line into a command
pub fn read_command(line: &str) -> ReadOutcome {
    let raw: RawCommand = match serde_json::from_str(line) {
        Ok(raw) => raw,
        Err(e) => {
            debug!(error = %e, "input line is not a command");
            return ReadOutcome::Unrecognized(e.to_string());
        }
    };

    let command = match raw {
        RawCommand {
            account: Some(mut account),
            transaction: None,
            ..
        } => {
            account.id = resolve_id(Some(account.id));
            Command::CreateAccount(account)
        }
        RawCommand {
            account: None,
            transaction: Some(transaction),
            account_id,
        } => Command::ProcessTransaction {
            account_id: resolve_id(account_id),
            transaction,
        },
        RawCommand {
            account: Some(_),
            transaction: Some(_),
            ..
        } => {
            return ReadOutcome::Unrecognized(
                "line carries both an account and a transaction".to_string(),
            )
        }
        RawCommand {
            account: None,
            transaction: None,
            ..
        } => {
            return ReadOutcome::Unrecognized(
                "line carries neither an account nor a transaction".to_string(),
            )
        }
    };

    ReadOutcome::Command(command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    fn unrecognized(outcome: ReadOutcome) -> bool {
        matches!(outcome, ReadOutcome::Unrecognized(_))
    }

    #[rstest]
    #[case::without_id(r#"{"account": {"activeCard": true, "availableLimit": 100}}"#, 1)]
    #[case::zero_id(r#"{"account": {"id": 0, "activeCard": true, "availableLimit": 100}}"#, 1)]
    #[case::explicit_id(r#"{"account": {"id": 7, "activeCard": true, "availableLimit": 100}}"#, 7)]
    fn test_read_create_account(#[case] line: &str, #[case] expected_id: AccountId) {
        assert_eq!(
            read_command(line),
            ReadOutcome::Command(Command::CreateAccount(Account::new(expected_id, true, 100)))
        );
    }

    #[rstest]
    #[case::without_id(
        r#"{"transaction": {"merchant": "Burger King", "amount": 20, "time": "2019-02-13T10:00:00.000Z"}}"#,
        1
    )]
    #[case::zero_id(
        r#"{"transaction": {"merchant": "Burger King", "amount": 20, "time": "2019-02-13T10:00:00.000Z"}, "accountId": 0}"#,
        1
    )]
    #[case::explicit_id(
        r#"{"transaction": {"merchant": "Burger King", "amount": 20, "time": "2019-02-13T10:00:00.000Z"}, "accountId": 3}"#,
        3
    )]
    fn test_read_process_transaction(#[case] line: &str, #[case] expected_id: AccountId) {
        let time = Utc.with_ymd_and_hms(2019, 2, 13, 10, 0, 0).unwrap();

        assert_eq!(
            read_command(line),
            ReadOutcome::Command(Command::ProcessTransaction {
                account_id: expected_id,
                transaction: Transaction::new("Burger King", 20, time),
            })
        );
    }

    #[rstest]
    #[case::garbage("abcde")]
    #[case::empty("")]
    #[case::blank("   ")]
    #[case::json_array("[1, 2, 3]")]
    #[case::unknown_key(r#"{"payment": {"amount": 10}}"#)]
    #[case::empty_object("{}")]
    #[case::both_keys(
        r#"{"account": {"activeCard": true, "availableLimit": 1}, "transaction": {"merchant": "M", "amount": 1, "time": "2019-02-13T10:00:00Z"}}"#
    )]
    #[case::missing_field(r#"{"account": {"activeCard": true}}"#)]
    #[case::wrong_type(r#"{"account": {"activeCard": "yes", "availableLimit": 10}}"#)]
    #[case::bad_time(r#"{"transaction": {"merchant": "M", "amount": 1, "time": "yesterday"}}"#)]
    #[case::truncated(r#"{"transaction": {"merchant": "M""#)]
    fn test_read_unrecognized(#[case] line: &str) {
        assert!(unrecognized(read_command(line)));
    }

    #[test]
    fn test_read_ignores_extra_fields() {
        let line = r#"{"account": {"activeCard": false, "availableLimit": 5, "owner": "x"}, "source": "batch"}"#;

        assert_eq!(
            read_command(line),
            ReadOutcome::Command(Command::CreateAccount(Account::new(1, false, 5)))
        );
    }
}
