//! Policy providers and the aggregation engine.
//!
//! A [`PolicyProvider`] resolves the effect of one policy type. Leaf
//! providers (role checks, time windows, and so on) vote directly on their
//! evaluation; composite providers delegate to
//! [`evaluate_associated_policies`], which recursively resolves the
//! associated sub-policies and folds their effects through the policy's
//! decision strategy.

mod aggregate;
mod registry;

pub use aggregate::{evaluate_associated_policies, AggregatePolicyProvider};
pub use registry::ProviderRegistry;

use warden_core::error::EvaluationError;

use crate::evaluation::{Evaluation, EvaluationContext};

/// Resolves the effect of one policy type.
///
/// The contract is to call exactly one of `grant`, `deny` or `set_effect`
/// on the evaluation. A provider that returns without voting is treated as
/// an implicit deny by the caller, never as a permit.
pub trait PolicyProvider: Send + Sync {
    /// The policy type this provider resolves.
    fn policy_type(&self) -> &str;

    /// Resolve the evaluation's policy for its permission.
    ///
    /// Composite providers recurse through the context back into the
    /// engine; the context must be forwarded unchanged so the decision
    /// cache and cycle guard stay shared across the whole descent.
    fn evaluate(
        &self,
        evaluation: &mut Evaluation<'_>,
        ctx: &mut EvaluationContext<'_>,
    ) -> Result<(), EvaluationError>;
}
