//! Policy definitions.

use serde::{Deserialize, Serialize};

use warden_core::id::PolicyId;
use warden_core::types::DecisionStrategy;

/// A named authorization rule.
///
/// A policy is either atomic (a leaf rule resolved entirely by its
/// provider) or composite (its provider aggregates the effects of the
/// associated policies). Associated policies are referenced by id and
/// resolved through a [`PolicyStore`](crate::store::PolicyStore), so the
/// same sub-policy may be shared by any number of parents.
///
/// The association graph must be acyclic. The engine guards against cycles
/// defensively, but a cyclic graph is always a configuration error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Policy {
    /// Stable identity, used as the memoization key during evaluation.
    #[serde(default)]
    id: PolicyId,

    /// Human-readable name, for diagnostics and audit.
    name: String,

    /// The policy type, resolved to a provider at evaluation time.
    #[serde(rename = "type")]
    policy_type: String,

    /// How the effects of the associated policies are combined.
    #[serde(default)]
    decision_strategy: DecisionStrategy,

    /// Sub-policies aggregated by this policy, if any.
    #[serde(default)]
    associated_policies: Vec<PolicyId>,
}

impl Policy {
    /// Create a new policy with the default (unanimous) decision strategy
    /// and no associated policies.
    pub fn new(name: impl Into<String>, policy_type: impl Into<String>) -> Self {
        Self {
            id: PolicyId::new(),
            name: name.into(),
            policy_type: policy_type.into(),
            decision_strategy: DecisionStrategy::default(),
            associated_policies: Vec::new(),
        }
    }

    /// Set the decision strategy.
    pub fn with_decision_strategy(mut self, strategy: DecisionStrategy) -> Self {
        self.decision_strategy = strategy;
        self
    }

    /// Associate a sub-policy.
    pub fn with_associated_policy(mut self, policy: PolicyId) -> Self {
        self.associated_policies.push(policy);
        self
    }

    /// The policy's identity.
    pub fn id(&self) -> PolicyId {
        self.id
    }

    /// The policy's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The policy type resolved to a provider at evaluation time.
    pub fn policy_type(&self) -> &str {
        &self.policy_type
    }

    /// The strategy combining the associated policies' effects.
    pub fn decision_strategy(&self) -> DecisionStrategy {
        self.decision_strategy
    }

    /// Ids of the associated sub-policies.
    pub fn associated_policies(&self) -> &[PolicyId] {
        &self.associated_policies
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_policy_defaults() {
        let policy = Policy::new("admin access", "aggregate");
        assert_eq!(policy.name(), "admin access");
        assert_eq!(policy.policy_type(), "aggregate");
        assert_eq!(policy.decision_strategy(), DecisionStrategy::Unanimous);
        assert!(policy.associated_policies().is_empty());
    }

    #[test]
    fn test_builder_associates_policies_in_order() {
        let a = PolicyId::new();
        let b = PolicyId::new();
        let policy = Policy::new("composite", "aggregate")
            .with_decision_strategy(DecisionStrategy::Affirmative)
            .with_associated_policy(a)
            .with_associated_policy(b);
        assert_eq!(policy.associated_policies(), &[a, b]);
        assert_eq!(policy.decision_strategy(), DecisionStrategy::Affirmative);
    }

    #[test]
    fn test_policy_deserializes_from_json() {
        let policy: Policy = serde_json::from_str(
            r#"{
                "name": "hours",
                "type": "time",
                "decision_strategy": "AFFIRMATIVE"
            }"#,
        )
        .unwrap();
        assert_eq!(policy.policy_type(), "time");
        assert_eq!(policy.decision_strategy(), DecisionStrategy::Affirmative);
        assert!(policy.associated_policies().is_empty());
    }
}
