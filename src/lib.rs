//! Card Authorizer Library
//! # Overview
//!
//! This library authorizes card transactions against a single account
//! identifier space. Commands arrive as JSON lines; each produces one JSON
//! response line.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, Transaction, Violation, etc.)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::rules`] - The ordered authorization rule chain
//!   - [`core::service`] - Orchestration of account creation and transaction authorization
//!   - [`core::store`] - In-memory account and transaction history storage
//! - [`io`] - Input line parsing and output line formatting
//! - [`dispatcher`] - Line-by-line command processing
//! - [`logging`] - Log subscriber setup
//!
//! # Authorization Rules
//!
//! Transactions are checked in this order and rejected on the first failure:
//!
//! - **card-not-active**: The account's card is not active
//! - **insufficient-limit**: The amount exceeds the available limit
//! - **doubled-transaction**: Same merchant and amount within two minutes
//! - **high-frequency-small-interval**: Two or more transactions within two minutes
//!
//! Creating an account twice yields **account-already-initialized**.

// Module declarations
pub mod cli;
pub mod core;
pub mod dispatcher;
pub mod io;
pub mod logging;
pub mod types;

pub use crate::core::{AuthorizationService, Authorizer, InMemoryStore, RuleConfig, Storage};
pub use crate::dispatcher::{execute, DispatchStats};
pub use crate::types::{
    Account, AccountId, AuthorizationResponse, AuthorizerError, OperationError, Transaction,
    Violation,
};
