//! Provider registration and lookup.

use std::sync::Arc;

use dashmap::DashMap;

use super::PolicyProvider;

/// Registry of policy providers, keyed by policy type.
///
/// A policy referencing a type with no registered provider is a deployment
/// inconsistency; the engine surfaces it as a fatal
/// [`ProviderNotFound`](warden_core::error::EvaluationError::ProviderNotFound)
/// rather than a deny, so operators can tell broken registration apart
/// from a legitimate denial.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: DashMap<String, Arc<dyn PolicyProvider>>,
}

impl ProviderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            providers: DashMap::new(),
        }
    }

    /// Register a provider under its policy type, replacing any previous
    /// provider for that type.
    pub fn register(&self, provider: Arc<dyn PolicyProvider>) {
        self.providers
            .insert(provider.policy_type().to_string(), provider);
    }

    /// Look up the provider for a policy type.
    pub fn get(&self, policy_type: &str) -> Option<Arc<dyn PolicyProvider>> {
        self.providers
            .get(policy_type)
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Whether a provider is registered for a policy type.
    pub fn is_registered(&self, policy_type: &str) -> bool {
        self.providers.contains_key(policy_type)
    }
}
