//! Shared per-request evaluation state.

use std::collections::HashSet;

use warden_core::id::PolicyId;

use super::DecisionCache;
use crate::provider::ProviderRegistry;
use crate::store::PolicyStore;

/// The mutable state threaded through one top-level evaluation's recursive
/// descent.
///
/// The context owns the [`DecisionCache`] and the cycle guard and borrows
/// the registry and store handles. It is created fresh for each top-level
/// request and passed by mutable reference through every recursive provider
/// call, which is what keeps the cache request-scoped instead of global.
pub struct EvaluationContext<'a> {
    /// Provider lookup by policy type.
    providers: &'a ProviderRegistry,

    /// Policy lookup by id.
    store: &'a dyn PolicyStore,

    /// Memoized (policy, permission) effects for this request.
    cache: DecisionCache,

    /// Policies currently on the recursion stack. Distinct from the cache:
    /// a cyclic graph would recurse forever before its first cache insert.
    in_flight: HashSet<PolicyId>,
}

impl<'a> EvaluationContext<'a> {
    /// Create a fresh context for one top-level evaluation.
    pub fn new(providers: &'a ProviderRegistry, store: &'a dyn PolicyStore) -> Self {
        Self {
            providers,
            store,
            cache: DecisionCache::new(),
            in_flight: HashSet::new(),
        }
    }

    /// The provider registry.
    pub fn providers(&self) -> &'a ProviderRegistry {
        self.providers
    }

    /// The policy store.
    pub fn store(&self) -> &'a dyn PolicyStore {
        self.store
    }

    /// The decision cache.
    pub fn cache(&self) -> &DecisionCache {
        &self.cache
    }

    /// Mutable access to the decision cache.
    pub fn cache_mut(&mut self) -> &mut DecisionCache {
        &mut self.cache
    }

    /// Mark a policy as being on the recursion stack. Returns `false` if it
    /// already is, which means the association graph has a cycle.
    pub fn enter(&mut self, policy: PolicyId) -> bool {
        self.in_flight.insert(policy)
    }

    /// Clear the in-flight mark once the policy's effect is resolved.
    pub fn leave(&mut self, policy: PolicyId) {
        self.in_flight.remove(&policy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryPolicyStore;

    #[test]
    fn test_enter_detects_reentry() {
        let providers = ProviderRegistry::new();
        let store = MemoryPolicyStore::new();
        let mut ctx = EvaluationContext::new(&providers, &store);
        let policy = PolicyId::new();

        assert!(ctx.enter(policy));
        assert!(!ctx.enter(policy));
        ctx.leave(policy);
        assert!(ctx.enter(policy));
    }
}
