//! Policy storage.
//!
//! The engine resolves associated policies by id through this interface,
//! which is what lets several parents share one sub-policy definition.

use std::sync::Arc;

use dashmap::DashMap;

use warden_core::id::PolicyId;

use crate::model::Policy;

/// Interface for policy storage.
pub trait PolicyStore: Send + Sync {
    /// Add a policy to the store, returning the stored handle.
    fn add_policy(&self, policy: Policy) -> Arc<Policy>;

    /// Look up a policy by id.
    fn policy(&self, id: PolicyId) -> Option<Arc<Policy>>;

    /// Remove a policy from the store. Returns whether it was present.
    fn remove_policy(&self, id: PolicyId) -> bool;

    /// All policies in the store.
    fn all_policies(&self) -> Vec<Arc<Policy>>;
}

/// In-memory policy store.
#[derive(Default)]
pub struct MemoryPolicyStore {
    /// All policies, indexed by id.
    policies: DashMap<PolicyId, Arc<Policy>>,
}

impl MemoryPolicyStore {
    /// Create a new in-memory policy store.
    pub fn new() -> Self {
        Self {
            policies: DashMap::new(),
        }
    }
}

impl PolicyStore for MemoryPolicyStore {
    fn add_policy(&self, policy: Policy) -> Arc<Policy> {
        let policy = Arc::new(policy);
        self.policies.insert(policy.id(), Arc::clone(&policy));
        policy
    }

    fn policy(&self, id: PolicyId) -> Option<Arc<Policy>> {
        self.policies.get(&id).map(|entry| Arc::clone(entry.value()))
    }

    fn remove_policy(&self, id: PolicyId) -> bool {
        self.policies.remove(&id).is_some()
    }

    fn all_policies(&self) -> Vec<Arc<Policy>> {
        self.policies
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect()
    }
}
