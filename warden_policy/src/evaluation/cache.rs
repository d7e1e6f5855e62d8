//! Per-request decision memoization.

use std::collections::HashMap;

use warden_core::id::PolicyId;
use warden_core::types::Effect;

use crate::model::ResourcePermission;

/// Memoization of resolved (policy, permission) effects within one
/// top-level evaluation.
///
/// The cache is what guarantees that a sub-policy reachable from several
/// parents is evaluated once per permission and that every parent observes
/// the same effect. It lives exactly as long as one top-level request and
/// is deliberately not thread-safe: concurrent requests must each get
/// their own instance.
#[derive(Debug, Default)]
pub struct DecisionCache {
    entries: HashMap<PolicyId, HashMap<ResourcePermission, Effect>>,
}

impl DecisionCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a previously resolved effect.
    pub fn get(&self, policy: PolicyId, permission: &ResourcePermission) -> Option<Effect> {
        self.entries
            .get(&policy)
            .and_then(|decisions| decisions.get(permission))
            .copied()
    }

    /// Record a resolved effect.
    pub fn insert(&mut self, policy: PolicyId, permission: ResourcePermission, effect: Effect) {
        self.entries
            .entry(policy)
            .or_default()
            .insert(permission, effect);
    }

    /// Number of (policy, permission) pairs resolved so far.
    pub fn len(&self) -> usize {
        self.entries.values().map(HashMap::len).sum()
    }

    /// Whether nothing has been resolved yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warden_core::id::ResourceId;

    #[test]
    fn test_miss_then_hit() {
        let mut cache = DecisionCache::new();
        let policy = PolicyId::new();
        let permission = ResourcePermission::new(ResourceId::new());

        assert!(cache.is_empty());
        assert_eq!(cache.get(policy, &permission), None);
        cache.insert(policy, permission.clone(), Effect::Permit);
        assert_eq!(cache.get(policy, &permission), Some(Effect::Permit));
        assert!(!cache.is_empty());
    }

    #[test]
    fn test_entries_are_keyed_by_permission() {
        let mut cache = DecisionCache::new();
        let policy = PolicyId::new();
        let resource = ResourceId::new();
        let read = ResourcePermission::new(resource).with_scope("read");
        let write = ResourcePermission::new(resource).with_scope("write");

        cache.insert(policy, read.clone(), Effect::Permit);
        assert_eq!(cache.get(policy, &read), Some(Effect::Permit));
        assert_eq!(cache.get(policy, &write), None);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_entries_are_keyed_by_policy() {
        let mut cache = DecisionCache::new();
        let permission = ResourcePermission::new(ResourceId::new());
        let a = PolicyId::new();
        let b = PolicyId::new();

        cache.insert(a, permission.clone(), Effect::Deny);
        assert_eq!(cache.get(b, &permission), None);
    }
}
