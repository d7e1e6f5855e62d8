//! # Warden Core
//!
//! `warden_core` provides the shared foundations of the Warden authorization
//! engine: strongly-typed identifiers, the error hierarchy, and the decision
//! vocabulary (`Effect`, `DecisionStrategy`) that every policy evaluation
//! ultimately speaks.

pub mod error;
pub mod id;
pub mod types;

// Re-export key types for convenience
pub use error::{Error, EvaluationError, Result};
pub use id::{PolicyId, ResourceId};
pub use types::{DecisionStrategy, Effect};
