//! Authorization service
//!
//! This module provides the `AuthorizationService` that orchestrates both
//! authorizer operations by coordinating the [`Storage`] backend and the
//! rule chain in [`crate::core::rules`].
//!
//! The service enforces:
//! - At most one account with an active card per identifier
//! - No storage mutation for rejected transactions
//! - Account limits change only through transactions that passed every rule

use crate::core::rules::{self, RuleConfig, RuleContext};
use crate::core::traits::{Authorizer, Storage};
use crate::types::{
    Account, AccountId, AuthorizationResponse, OperationError, Transaction, Violation,
};
use tracing::{debug, error, info, warn};

/// Authorization service over a storage backend
///
/// Each operation takes `&mut self`, so one request is fully resolved
/// (read, decide, write) before the next can start.
#[derive(Debug)]
pub struct AuthorizationService<S: Storage> {
    storage: S,
    rules: RuleConfig,
}

impl<S: Storage> AuthorizationService<S> {
    /// Create a service with the default rule configuration
    pub fn new(storage: S) -> Self {
        Self::with_rules(storage, RuleConfig::default())
    }

    /// Create a service with a custom rule configuration
    pub fn with_rules(storage: S, rules: RuleConfig) -> Self {
        AuthorizationService { storage, rules }
    }

    /// Read access to the underlying storage
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Create an account
    ///
    /// # Returns
    ///
    /// * `Ok` with the stored account and `account-already-initialized` if an
    ///   account with an active card already exists for the identifier
    /// * `Ok` with the new account and no violations once it is persisted
    /// * `Err(OperationError)` if the backend failed to persist; the response
    ///   carries the requested account and the storage error as a violation
    pub fn create_account(
        &mut self,
        account: Account,
    ) -> Result<AuthorizationResponse, OperationError> {
        let existing = self.storage.get_account(account.id);
        if existing.active_card {
            warn!(
                account_id = account.id,
                violation = %Violation::AccountAlreadyInitialized,
                "account creation rejected"
            );
            return Ok(AuthorizationResponse::rejected(
                existing,
                Violation::AccountAlreadyInitialized,
            ));
        }

        if let Err(e) = self.storage.create_account(&account) {
            error!(account_id = account.id, error = %e, "failed to create account");
            let response =
                AuthorizationResponse::rejected(account, Violation::Storage(e.to_string()));
            return Err(OperationError::new(response, e));
        }

        info!(
            account_id = account.id,
            active_card = account.active_card,
            available_limit = account.available_limit,
            "account created"
        );
        Ok(AuthorizationResponse::accepted(account))
    }

    /// Authorize a transaction and commit it if every rule passes
    ///
    /// # Returns
    ///
    /// * `Ok` with the unmodified account and the first violation if a rule
    ///   rejected the transaction
    /// * `Ok` with the updated account and no violations once committed
    /// * `Err(OperationError)` if the commit failed; the response carries the
    ///   pre-commit account and no violations
    pub fn process_transaction(
        &mut self,
        account_id: AccountId,
        transaction: Transaction,
    ) -> Result<AuthorizationResponse, OperationError> {
        let account = self.storage.get_account(account_id);
        let history = self.storage.get_transactions(account_id);

        let decision = rules::evaluate(&RuleContext {
            transaction: &transaction,
            history: &history,
            account: &account,
            config: &self.rules,
        });

        debug!(account_id, allowed = decision.is_allowed(), "rules evaluated");
        if let Some(violation) = decision.violation() {
            return Ok(AuthorizationResponse::rejected(account, violation.clone()));
        }

        match self.storage.execute_transaction(&account, &transaction) {
            Ok(updated) => Ok(AuthorizationResponse::accepted(updated)),
            Err(e) => {
                error!(account_id, error = %e, "failed to commit transaction");
                Err(OperationError::new(
                    AuthorizationResponse::accepted(account),
                    e,
                ))
            }
        }
    }
}

impl<S: Storage> Authorizer for AuthorizationService<S> {
    fn create_account(
        &mut self,
        account: Account,
    ) -> Result<AuthorizationResponse, OperationError> {
        AuthorizationService::create_account(self, account)
    }

    fn process_transaction(
        &mut self,
        account_id: AccountId,
        transaction: Transaction,
    ) -> Result<AuthorizationResponse, OperationError> {
        AuthorizationService::process_transaction(self, account_id, transaction)
    }
}
