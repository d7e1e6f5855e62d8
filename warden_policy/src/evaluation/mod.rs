//! Per-request evaluation machinery.
//!
//! An [`Evaluation`] is the mutable in-flight record of one policy's
//! decision for one permission. The [`EvaluationContext`] carries the state
//! shared by the whole recursive descent of a single top-level request: the
//! decision cache, the provider registry and store handles, and the cycle
//! guard. Each incoming request gets its own context; contexts are never
//! shared across concurrent evaluations.

mod cache;
mod context;

pub use cache::DecisionCache;
pub use context::EvaluationContext;

use std::sync::Arc;

use warden_core::types::Effect;

use crate::model::{Policy, ResourcePermission};

/// The mutable in-flight record of one policy's decision process for one
/// permission.
///
/// The effect transitions exactly once, from unset to `Permit` or `Deny`.
/// A second transition attempt fails a `debug_assert` and is otherwise
/// ignored, so the first vote always wins.
pub struct Evaluation<'a> {
    /// The permission being checked.
    permission: &'a ResourcePermission,

    /// The policy being evaluated.
    policy: Arc<Policy>,

    /// The composite policy this evaluation was spawned from, if any.
    parent_policy: Option<Arc<Policy>>,

    /// The resolved effect, `None` until the policy votes.
    effect: Option<Effect>,
}

impl<'a> Evaluation<'a> {
    /// Create the root evaluation of a top-level request.
    pub fn root(policy: Arc<Policy>, permission: &'a ResourcePermission) -> Self {
        Self {
            permission,
            policy,
            parent_policy: None,
            effect: None,
        }
    }

    /// Create a child evaluation for an associated policy.
    pub fn child(
        policy: Arc<Policy>,
        parent_policy: Arc<Policy>,
        permission: &'a ResourcePermission,
    ) -> Self {
        Self {
            permission,
            policy,
            parent_policy: Some(parent_policy),
            effect: None,
        }
    }

    /// The policy being evaluated.
    pub fn policy(&self) -> &Arc<Policy> {
        &self.policy
    }

    /// The composite policy this evaluation was spawned from, if any.
    pub fn parent_policy(&self) -> Option<&Arc<Policy>> {
        self.parent_policy.as_ref()
    }

    /// The permission being checked.
    pub fn permission(&self) -> &'a ResourcePermission {
        self.permission
    }

    /// The resolved effect, or `None` if the policy has not voted yet.
    pub fn effect(&self) -> Option<Effect> {
        self.effect
    }

    /// Vote to permit.
    pub fn grant(&mut self) {
        self.set_effect(Effect::Permit);
    }

    /// Vote to deny.
    pub fn deny(&mut self) {
        self.set_effect(Effect::Deny);
    }

    /// Record an already-resolved effect, e.g. from the decision cache.
    pub fn set_effect(&mut self, effect: Effect) {
        debug_assert!(
            self.effect.is_none(),
            "effect already resolved for policy [{}]",
            self.policy.id()
        );
        if self.effect.is_none() {
            tracing::trace!(policy = %self.policy.id(), ?effect, "effect resolved");
            self.effect = Some(effect);
        }
    }

    /// Fail-closed safety net: a policy that never voted is an implicit
    /// deny, never an implicit permit.
    pub fn deny_if_no_effect(&mut self) {
        if self.effect.is_none() {
            tracing::debug!(
                policy = %self.policy.id(),
                "provider returned without voting, denying"
            );
            self.effect = Some(Effect::Deny);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warden_core::id::ResourceId;

    fn fixture<'a>(permission: &'a ResourcePermission) -> Evaluation<'a> {
        Evaluation::root(Arc::new(Policy::new("p", "aggregate")), permission)
    }

    #[test]
    fn test_effect_starts_unset() {
        let permission = ResourcePermission::new(ResourceId::new());
        let evaluation = fixture(&permission);
        assert_eq!(evaluation.effect(), None);
    }

    #[test]
    fn test_grant_sets_permit() {
        let permission = ResourcePermission::new(ResourceId::new());
        let mut evaluation = fixture(&permission);
        evaluation.grant();
        assert_eq!(evaluation.effect(), Some(Effect::Permit));
    }

    #[test]
    fn test_deny_if_no_effect_is_fail_closed() {
        let permission = ResourcePermission::new(ResourceId::new());
        let mut evaluation = fixture(&permission);
        evaluation.deny_if_no_effect();
        assert_eq!(evaluation.effect(), Some(Effect::Deny));
    }

    #[test]
    fn test_deny_if_no_effect_keeps_existing_vote() {
        let permission = ResourcePermission::new(ResourceId::new());
        let mut evaluation = fixture(&permission);
        evaluation.grant();
        evaluation.deny_if_no_effect();
        assert_eq!(evaluation.effect(), Some(Effect::Permit));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "effect already resolved")]
    fn test_double_transition_is_loud_in_debug() {
        let permission = ResourcePermission::new(ResourceId::new());
        let mut evaluation = fixture(&permission);
        evaluation.grant();
        evaluation.deny();
    }

    #[test]
    fn test_child_links_parent() {
        let permission = ResourcePermission::new(ResourceId::new());
        let parent = Arc::new(Policy::new("parent", "aggregate"));
        let leaf = Arc::new(Policy::new("leaf", "role"));
        let child = Evaluation::child(Arc::clone(&leaf), Arc::clone(&parent), &permission);
        assert_eq!(child.parent_policy().unwrap().id(), parent.id());
        assert_eq!(child.policy().id(), leaf.id());
    }
}
