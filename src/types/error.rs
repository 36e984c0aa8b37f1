//! Error types for the card authorizer
//!
//! Business rule violations are not errors (see [`super::Violation`]). The
//! types here cover operational failures only.
//!
//! # Error Categories
//!
//! - **Storage Errors**: the backend could not read or write
//! - **Arithmetic Errors**: overflow while applying a transaction to a limit
//! - **I/O Errors**: reading commands or writing responses failed
//! - **Serialization Errors**: a response could not be encoded
//! - **Logging Errors**: the log subscriber could not be installed

use super::account::AccountId;
use super::response::AuthorizationResponse;
use thiserror::Error;

/// Main error type for the card authorizer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthorizerError {
    /// The storage backend failed to perform an operation
    #[error("storage failure during {operation}: {message}")]
    StorageFailure {
        /// Storage operation that failed
        operation: String,
        /// Description reported by the backend
        message: String,
    },

    /// A transaction was committed against an identifier with no account
    #[error("account {id} not found")]
    AccountNotFound {
        /// The missing account identifier
        id: AccountId,
    },

    /// Applying a transaction would overflow the available limit
    #[error("arithmetic overflow applying amount {amount} to account {id}")]
    ArithmeticOverflow {
        /// Account identifier
        id: AccountId,
        /// Transaction amount
        amount: i64,
    },

    /// Input could not be read or output could not be written
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
    },

    /// A response could not be serialized
    #[error("serialization error: {message}")]
    Serialization {
        /// Description of the serialization error
        message: String,
    },

    /// The log subscriber could not be set up
    #[error("logging setup failed: {message}")]
    Logging {
        /// Description of the failure
        message: String,
    },
}

impl From<std::io::Error> for AuthorizerError {
    fn from(error: std::io::Error) -> Self {
        AuthorizerError::io(error.to_string())
    }
}

impl From<serde_json::Error> for AuthorizerError {
    fn from(error: serde_json::Error) -> Self {
        AuthorizerError::Serialization {
            message: error.to_string(),
        }
    }
}

impl AuthorizerError {
    /// Create a StorageFailure error
    pub fn storage_failure(operation: &str, message: impl Into<String>) -> Self {
        AuthorizerError::StorageFailure {
            operation: operation.to_string(),
            message: message.into(),
        }
    }

    /// Create an AccountNotFound error
    pub fn account_not_found(id: AccountId) -> Self {
        AuthorizerError::AccountNotFound { id }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(id: AccountId, amount: i64) -> Self {
        AuthorizerError::ArithmeticOverflow { id, amount }
    }

    /// Create an Io error
    pub fn io(message: impl Into<String>) -> Self {
        AuthorizerError::Io {
            message: message.into(),
        }
    }

    /// Create a Logging error
    pub fn logging(message: impl Into<String>) -> Self {
        AuthorizerError::Logging {
            message: message.into(),
        }
    }
}

/// Operational failure of one of the two authorizer operations
///
/// Carries the response the caller should still emit alongside the error
/// that caused it, so a failed record can be reported and processing can
/// continue with the next one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{source}")]
pub struct OperationError {
    /// Response to report for the failed request
    pub response: AuthorizationResponse,
    /// Underlying operational error
    pub source: AuthorizerError,
}

impl OperationError {
    pub fn new(response: AuthorizationResponse, source: AuthorizerError) -> Self {
        OperationError { response, source }
    }
}
