//! Response envelope returned by both authorizer operations

use super::account::Account;
use super::violation::Violation;
use serde::Serialize;

/// Account snapshot plus the violations raised by a request
///
/// `violations` is always serialized as an array, empty when the request
/// was applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorizationResponse {
    pub account: Account,
    pub violations: Vec<Violation>,
}

impl AuthorizationResponse {
    /// Response for a request that was applied
    pub fn accepted(account: Account) -> Self {
        AuthorizationResponse {
            account,
            violations: Vec::new(),
        }
    }

    /// Response for a request rejected with a single violation
    pub fn rejected(account: Account, violation: Violation) -> Self {
        AuthorizationResponse {
            account,
            violations: vec![violation],
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.violations.is_empty()
    }
}
