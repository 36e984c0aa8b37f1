//! Transaction-related types for the card authorizer
//!
//! A transaction is created transiently for each authorization request and,
//! once every rule passes, appended to the account's history.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Proposed card transaction
///
/// The wire format is `{"merchant": .., "amount": .., "time": ..}` with `time`
/// in RFC 3339.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Merchant name, compared as an opaque key
    pub merchant: String,

    /// Cost of the transaction to the account, in minor currency units
    pub amount: i64,

    /// When the transaction happened
    ///
    /// Only ever compared against other transactions' times.
    pub time: DateTime<Utc>,
}

impl Transaction {
    pub fn new(merchant: impl Into<String>, amount: i64, time: DateTime<Utc>) -> Self {
        Transaction {
            merchant: merchant.into(),
            amount,
            time,
        }
    }

    /// Whether `other` happened strictly less than `window` away, in either direction
    pub fn is_within(&self, other: &Transaction, window: TimeDelta) -> bool {
        let delta = self.time - other.time;
        -window < delta && delta < window
    }

    /// Same merchant and same amount
    pub fn is_same_purchase(&self, other: &Transaction) -> bool {
        self.amount == other.amount && self.merchant == other.merchant
    }
}
