//! Aggregation of associated-policy decisions.
//!
//! This is the shared algorithm behind every composite policy type: resolve
//! each associated policy's effect (through the decision cache where
//! possible), then fold the effects through the policy's decision strategy.

use std::sync::Arc;

use warden_core::error::EvaluationError;
use warden_core::types::Effect;

use super::PolicyProvider;
use crate::evaluation::{Evaluation, EvaluationContext};

/// Resolve a composite policy's effect by aggregating its associated
/// policies.
///
/// For each associated policy, a cached effect for this permission is
/// reused as-is; otherwise the policy's provider is invoked on a fresh
/// child evaluation, the fail-closed default is applied, and the result is
/// recorded in the cache for any sibling or cousin evaluation in the same
/// request. The collected effects are then folded through the policy's
/// decision strategy and exactly one of `grant`/`deny` is called on
/// `evaluation`.
///
/// Fails with [`EvaluationError::ProviderNotFound`] if an associated policy
/// references an unregistered type, with
/// [`EvaluationError::PolicyNotFound`] if an associated id is missing from
/// the store, and with [`EvaluationError::CycleDetected`] if an associated
/// policy is already on the recursion stack. All three abort the whole
/// top-level evaluation.
pub fn evaluate_associated_policies(
    evaluation: &mut Evaluation<'_>,
    ctx: &mut EvaluationContext<'_>,
) -> Result<(), EvaluationError> {
    let policy = Arc::clone(evaluation.policy());
    let permission = evaluation.permission();
    let mut effects = Vec::with_capacity(policy.associated_policies().len());

    for &associated_id in policy.associated_policies() {
        let associated = ctx
            .store()
            .policy(associated_id)
            .ok_or(EvaluationError::PolicyNotFound(associated_id))?;

        let mut child =
            Evaluation::child(Arc::clone(&associated), Arc::clone(&policy), permission);

        match ctx.cache().get(associated_id, permission) {
            Some(cached) => {
                tracing::trace!(policy = %associated_id, effect = ?cached, "decision cache hit");
                child.set_effect(cached);
            }
            None => {
                if !ctx.enter(associated_id) {
                    return Err(EvaluationError::CycleDetected(associated_id));
                }
                let provider = ctx.providers().get(associated.policy_type()).ok_or_else(
                    || EvaluationError::ProviderNotFound {
                        policy_type: associated.policy_type().to_string(),
                    },
                )?;

                let outcome = provider.evaluate(&mut child, ctx);
                ctx.leave(associated_id);
                outcome?;

                child.deny_if_no_effect();
                let effect = child.effect().unwrap_or(Effect::Deny);
                ctx.cache_mut()
                    .insert(associated_id, permission.clone(), effect);
            }
        }

        effects.push(child.effect().unwrap_or(Effect::Deny));
    }

    let strategy = policy.decision_strategy();
    let granted = strategy.grants(&effects);
    tracing::debug!(
        policy = %policy.id(),
        ?strategy,
        votes = effects.len(),
        permits = effects.iter().filter(|e| e.is_permit()).count(),
        granted,
        "aggregated associated policies"
    );

    if granted {
        evaluation.grant();
    } else {
        evaluation.deny();
    }
    Ok(())
}

/// Composite policy provider: a policy of type `aggregate` has no logic of
/// its own and simply combines its associated policies.
#[derive(Debug, Default)]
pub struct AggregatePolicyProvider;

impl AggregatePolicyProvider {
    /// The policy type this provider is registered under.
    pub const TYPE: &'static str = "aggregate";

    /// Create a new aggregate provider.
    pub fn new() -> Self {
        Self
    }
}

impl PolicyProvider for AggregatePolicyProvider {
    fn policy_type(&self) -> &str {
        Self::TYPE
    }

    fn evaluate(
        &self,
        evaluation: &mut Evaluation<'_>,
        ctx: &mut EvaluationContext<'_>,
    ) -> Result<(), EvaluationError> {
        evaluate_associated_policies(evaluation, ctx)
    }
}
