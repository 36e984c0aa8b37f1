//! Business rule violations
//!
//! Violations are expected outcomes of authorization, not errors. They are
//! reported inside the response's `violations` array as string codes.

use serde::{Serialize, Serializer};
use std::fmt;

/// Reason a request was not applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// An account with an active card already exists for the identifier
    AccountAlreadyInitialized,

    /// The account's card is not active
    CardNotActive,

    /// The transaction amount exceeds the available limit
    InsufficientLimit,

    /// Same merchant and amount seen within the time window
    DoubledTransaction,

    /// Too many transactions within the time window
    HighFrequencySmallInterval,

    /// The storage backend failed; carries the backend's message
    Storage(String),
}

impl Violation {
    /// The wire code of this violation
    pub fn code(&self) -> &str {
        match self {
            Violation::AccountAlreadyInitialized => "account-already-initialized",
            Violation::CardNotActive => "card-not-active",
            Violation::InsufficientLimit => "insufficient-limit",
            Violation::DoubledTransaction => "doubled-transaction",
            Violation::HighFrequencySmallInterval => "high-frequency-small-interval",
            Violation::Storage(message) => message,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for Violation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}
