//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: Account state and identifiers
//! - `transaction`: Proposed and committed card transactions
//! - `violation`: Business rule violation codes
//! - `response`: The response envelope of both operations
//! - `error`: Operational error types

pub mod account;
pub mod error;
pub mod response;
pub mod transaction;
pub mod violation;

pub use account::{Account, AccountId, DEFAULT_ACCOUNT_ID};
pub use error::{AuthorizerError, OperationError};
pub use response::AuthorizationResponse;
pub use transaction::Transaction;
pub use violation::Violation;
