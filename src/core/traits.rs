//! Core traits for storage and authorization
//!
//! The authorization service depends only on [`Storage`], never on a concrete
//! backend. The dispatcher depends only on [`Authorizer`], which lets it be
//! driven by a mock in tests.

use crate::types::{
    Account, AccountId, AuthorizationResponse, AuthorizerError, OperationError, Transaction,
};

/// Capability interface for account and transaction persistence
///
/// The in-memory store is the reference implementation. Implementations do
/// not need to lock: the service holds exclusive access for the duration of
/// each request.
pub trait Storage {
    /// Persist a new account keyed by its identifier
    ///
    /// Callers check that no active account exists for the identifier first.
    fn create_account(&mut self, account: &Account) -> Result<(), AuthorizerError>;

    /// Get the account for `id`, or the zero-value account if none exists
    fn get_account(&self, id: AccountId) -> Account;

    /// Get every committed transaction for `id`, in commit order
    fn get_transactions(&self, id: AccountId) -> Vec<Transaction>;

    /// Apply the transaction to the account's limit and append it to history
    ///
    /// Both effects happen together or not at all. Returns the updated account.
    fn execute_transaction(
        &mut self,
        account: &Account,
        transaction: &Transaction,
    ) -> Result<Account, AuthorizerError>;
}

/// The two operations exposed to the command dispatcher
pub trait Authorizer {
    /// Create an account unless one with an active card already exists
    fn create_account(&mut self, account: Account)
        -> Result<AuthorizationResponse, OperationError>;

    /// Authorize a transaction against an account and commit it if allowed
    fn process_transaction(
        &mut self,
        account_id: AccountId,
        transaction: Transaction,
    ) -> Result<AuthorizationResponse, OperationError>;
}
