//! In-memory storage backend
//!
//! This module provides the `InMemoryStore`, the reference implementation of
//! the [`Storage`] trait. It keeps two maps keyed by account identifier:
//! - the account records themselves
//! - the append-only transaction history of each account
//!
//! Nothing is persisted; the store lives as long as the process.

use crate::core::traits::Storage;
use crate::types::{Account, AccountId, AuthorizerError, Transaction};
use std::collections::HashMap;
use tracing::debug;

/// Map-backed account and history store
#[derive(Debug, Default)]
pub struct InMemoryStore {
    /// Map of account identifier to account state
    accounts: HashMap<AccountId, Account>,

    /// Map of account identifier to committed transactions, in commit order
    history: HashMap<AccountId, Vec<Transaction>>,
}

impl InMemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for InMemoryStore {
    /// Insert the account record
    ///
    /// The history of the identifier is left untouched: creation is not a
    /// transaction and does not count towards any time-window rule.
    fn create_account(&mut self, account: &Account) -> Result<(), AuthorizerError> {
        debug!(account_id = account.id, ?account, "creating account");
        self.accounts.insert(account.id, account.clone());
        Ok(())
    }

    fn get_account(&self, id: AccountId) -> Account {
        self.accounts
            .get(&id)
            .cloned()
            .unwrap_or_else(|| Account::inactive(id))
    }

    fn get_transactions(&self, id: AccountId) -> Vec<Transaction> {
        self.history.get(&id).cloned().unwrap_or_default()
    }

    /// Debit the stored account and record the transaction
    ///
    /// The limit is computed before anything is written, so a failed
    /// transaction leaves both maps unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No account is stored for `account.id`
    /// - Subtracting the amount would overflow the limit
    fn execute_transaction(
        &mut self,
        account: &Account,
        transaction: &Transaction,
    ) -> Result<Account, AuthorizerError> {
        let stored = self
            .accounts
            .get_mut(&account.id)
            .ok_or_else(|| AuthorizerError::account_not_found(account.id))?;

        let new_limit = stored
            .available_limit
            .checked_sub(transaction.amount)
            .ok_or_else(|| AuthorizerError::arithmetic_overflow(account.id, transaction.amount))?;

        stored.available_limit = new_limit;
        let updated = stored.clone();

        self.history
            .entry(account.id)
            .or_default()
            .push(transaction.clone());

        debug!(
            account_id = account.id,
            merchant = %transaction.merchant,
            amount = transaction.amount,
            available_limit = new_limit,
            "transaction committed"
        );

        Ok(updated)
    }
}
