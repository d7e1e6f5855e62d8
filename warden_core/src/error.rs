//! Error types for the Warden authorization engine.
//!
//! The hierarchy separates fatal configuration problems (a policy that
//! references a provider or sub-policy nobody registered) from ordinary
//! deny outcomes, which are not errors at all.

use thiserror::Error;

use crate::id::PolicyId;

/// Root error type for the Warden engine.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Evaluation error: {0}")]
    Evaluation(#[from] EvaluationError),
}

/// Errors raised while evaluating a policy graph.
///
/// Every variant here aborts the whole top-level evaluation. A legitimate
/// access denial is reported as `Effect::Deny`, never as an error, so
/// callers can distinguish "denied" from "broken deployment".
#[derive(Debug, Error)]
pub enum EvaluationError {
    /// An associated policy references a type with no registered provider.
    /// This is a deployment inconsistency, not an access decision.
    #[error("no policy provider registered for policy type [{policy_type}]")]
    ProviderNotFound {
        /// The policy type that could not be resolved.
        policy_type: String,
    },

    /// An associated policy id has no entry in the policy store.
    #[error("policy [{0}] is referenced but not present in the store")]
    PolicyNotFound(PolicyId),

    /// The policy association graph contains a cycle. The graph is required
    /// to be acyclic; recursing into an already in-flight policy would
    /// never terminate.
    #[error("policy association cycle detected at policy [{0}]")]
    CycleDetected(PolicyId),
}

/// Result type alias for Warden operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
