//! The top-level policy evaluator.

use std::sync::Arc;

use warden_core::error::{EvaluationError, Result};
use warden_core::id::PolicyId;
use warden_core::types::Effect;

use super::audit::{AuditEntry, AuditLog};
use crate::evaluation::{Evaluation, EvaluationContext};
use crate::model::ResourcePermission;
use crate::provider::ProviderRegistry;
use crate::store::PolicyStore;

/// Entry point for top-level permission checks.
///
/// The evaluator owns the provider registry and store handles and an audit
/// log; each call to [`evaluate`](Self::evaluate) gets a fresh
/// [`EvaluationContext`], so concurrent callers never share a decision
/// cache.
pub struct PolicyEvaluator {
    providers: Arc<ProviderRegistry>,
    store: Arc<dyn PolicyStore>,
    audit: AuditLog,
}

impl PolicyEvaluator {
    /// Create a new evaluator over a provider registry and policy store.
    pub fn new(providers: Arc<ProviderRegistry>, store: Arc<dyn PolicyStore>) -> Self {
        Self {
            providers,
            store,
            audit: AuditLog::new(),
        }
    }

    /// The provider registry.
    pub fn providers(&self) -> &ProviderRegistry {
        &self.providers
    }

    /// The policy store.
    pub fn store(&self) -> &dyn PolicyStore {
        self.store.as_ref()
    }

    /// Evaluate a root policy against a permission.
    ///
    /// Returns the final effect, or an error if the deployment is
    /// inconsistent (missing policy, missing provider, cyclic graph). An
    /// error is never a disguised deny; callers should treat it as an
    /// internal failure, distinct from an ordinary `Effect::Deny`.
    pub fn evaluate(&self, policy: PolicyId, permission: &ResourcePermission) -> Result<Effect> {
        let policy = self
            .store
            .policy(policy)
            .ok_or(EvaluationError::PolicyNotFound(policy))?;

        let provider = self.providers.get(policy.policy_type()).ok_or_else(|| {
            EvaluationError::ProviderNotFound {
                policy_type: policy.policy_type().to_string(),
            }
        })?;

        let mut ctx = EvaluationContext::new(&self.providers, self.store.as_ref());
        if !ctx.enter(policy.id()) {
            return Err(EvaluationError::CycleDetected(policy.id()).into());
        }

        let mut evaluation = Evaluation::root(Arc::clone(&policy), permission);
        provider.evaluate(&mut evaluation, &mut ctx)?;
        evaluation.deny_if_no_effect();

        let effect = evaluation.effect().unwrap_or(Effect::Deny);
        self.audit.record(&policy, permission, effect);
        tracing::debug!(
            policy = %policy.id(),
            resource = %permission.resource(),
            permission = %permission,
            cached_decisions = ctx.cache().len(),
            ?effect,
            "policy evaluation complete"
        );
        Ok(effect)
    }

    /// Audit entries for all completed evaluations, oldest first.
    pub fn audit_entries(&self) -> Vec<AuditEntry> {
        self.audit.entries()
    }
}
