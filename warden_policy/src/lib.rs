//! # Warden Policy
//!
//! `warden_policy` is the decision aggregation engine of the Warden
//! authorization system: it resolves a permission request against a graph
//! of policies and combines the per-policy effects into a single verdict.
//!
//! Key concepts:
//!
//! 1. **Policy graph**: policies reference associated sub-policies by id
//!    through a [`PolicyStore`](store::PolicyStore). The graph may share
//!    sub-policies across parents (a DAG) but must not contain cycles.
//!
//! 2. **Providers**: each policy type is resolved by a
//!    [`PolicyProvider`](provider::PolicyProvider) looked up in a
//!    [`ProviderRegistry`](provider::ProviderRegistry). Composite types
//!    delegate to the shared aggregation algorithm,
//!    [`evaluate_associated_policies`](provider::evaluate_associated_policies).
//!
//! 3. **Decision cache**: within one top-level evaluation, each
//!    (policy, permission) pair is resolved at most once; every parent of a
//!    shared sub-policy observes the same effect.
//!
//! 4. **Fail closed**: a provider that returns without voting is an
//!    implicit deny, and a misconfigured deployment (missing provider or
//!    policy, cyclic graph) is an error distinct from any deny.

pub mod engine;
pub mod evaluation;
pub mod model;
pub mod provider;
pub mod store;

// Re-export key types for convenience
pub use engine::{AuditEntry, PolicyEvaluator};
pub use evaluation::{DecisionCache, Evaluation, EvaluationContext};
pub use model::{Policy, ResourcePermission};
pub use provider::{
    evaluate_associated_policies, AggregatePolicyProvider, PolicyProvider, ProviderRegistry,
};
pub use store::{MemoryPolicyStore, PolicyStore};
