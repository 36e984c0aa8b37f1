//! Account-related types for the card authorizer
//!
//! This module defines the Account structure that the authorization service
//! reads and mutates, together with the identifier type used to key it.

use serde::{Deserialize, Serialize};

/// Account identifier
///
/// The system works within a single identifier space; callers that do not
/// specify an identifier get [`DEFAULT_ACCOUNT_ID`].
pub type AccountId = u64;

/// Identifier substituted by the command reader when the input omits one
pub const DEFAULT_ACCOUNT_ID: AccountId = 1;

/// Card account state
///
/// Serializes as `{"activeCard": .., "availableLimit": ..}`. The identifier is
/// never written to the output envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// The account identifier
    #[serde(skip_serializing, default)]
    pub id: AccountId,

    /// Whether the card can be used for transactions
    pub active_card: bool,

    /// Remaining limit in minor currency units
    ///
    /// Decreases by the amount of every authorized transaction. No currency
    /// conversion is ever applied.
    pub available_limit: i64,
}

impl Account {
    /// Create an account with the given card state and limit
    pub fn new(id: AccountId, active_card: bool, available_limit: i64) -> Self {
        Account {
            id,
            active_card,
            available_limit,
        }
    }

    /// The zero-value account returned for identifiers that have no record
    ///
    /// # Returns
    ///
    /// An Account with:
    /// - active_card = false
    /// - available_limit = 0
    pub fn inactive(id: AccountId) -> Self {
        Account::new(id, false, 0)
    }
}
