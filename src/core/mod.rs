//! Core business logic module
//!
//! This module contains the authorization components:
//! - `traits` - Storage and authorizer abstractions
//! - `store` - In-memory reference storage backend
//! - `rules` - The ordered rule chain
//! - `service` - Orchestration of both authorizer operations

pub mod rules;
pub mod service;
pub mod store;
pub mod traits;

pub use rules::{Decision, RuleConfig};
pub use service::AuthorizationService;
pub use store::InMemoryStore;
pub use traits::{Authorizer, Storage};
