//! Decision vocabulary for policy evaluation.
//!
//! This module defines the effect a single policy yields and the strategies
//! used to fold many sub-policy effects into one verdict.

use serde::{Deserialize, Deserializer, Serialize};

/// The outcome of evaluating one policy against one permission.
///
/// "Not yet decided" is not an effect; an in-flight evaluation represents it
/// as the absence of an effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Effect {
    /// Access is permitted.
    Permit,
    /// Access is denied.
    Deny,
}

impl Effect {
    /// Whether this effect permits access.
    pub fn is_permit(&self) -> bool {
        matches!(self, Effect::Permit)
    }
}

/// Strategy for combining the effects of a policy's associated policies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DecisionStrategy {
    /// Grant if at least one associated policy permits.
    Affirmative,
    /// Grant only if there is at least one associated policy and all of
    /// them permit. This is the default, and the fallback for any
    /// unrecognized strategy value.
    #[default]
    Unanimous,
    /// Grant if the permits reach at least half of the votes.
    Consensus,
}

impl DecisionStrategy {
    /// Fold a set of child effects into a single grant/deny verdict.
    ///
    /// The combinators are order-independent; only the counts matter.
    /// An empty effect set grants under `Consensus` (`0 >= 0`) but denies
    /// under `Unanimous` and `Affirmative`.
    pub fn grants(&self, effects: &[Effect]) -> bool {
        let total = effects.len();
        let permits = effects.iter().filter(|e| e.is_permit()).count();

        match self {
            DecisionStrategy::Affirmative => permits >= 1,
            DecisionStrategy::Consensus => permits >= total / 2,
            DecisionStrategy::Unanimous => total >= 1 && permits == total,
        }
    }
}

// Unrecognized strategy values deserialize to Unanimous, the fail-closed
// default, rather than rejecting the whole policy document.
impl<'de> Deserialize<'de> for DecisionStrategy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.as_str() {
            "AFFIRMATIVE" => DecisionStrategy::Affirmative,
            "CONSENSUS" => DecisionStrategy::Consensus,
            _ => DecisionStrategy::Unanimous,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use super::Effect::{Deny, Permit};

    #[test]
    fn test_affirmative_grants_on_any_permit() {
        let strategy = DecisionStrategy::Affirmative;
        assert!(strategy.grants(&[Deny, Deny, Permit]));
        assert!(strategy.grants(&[Permit]));
        assert!(!strategy.grants(&[Deny, Deny]));
        assert!(!strategy.grants(&[]));
    }

    #[test]
    fn test_unanimous_requires_all_permits() {
        let strategy = DecisionStrategy::Unanimous;
        assert!(strategy.grants(&[Permit, Permit]));
        assert!(!strategy.grants(&[Permit, Deny]));
        assert!(!strategy.grants(&[Deny]));
        // An empty associated-policy set denies under UNANIMOUS.
        assert!(!strategy.grants(&[]));
    }

    #[test]
    fn test_consensus_is_majority_with_integer_division() {
        let strategy = DecisionStrategy::Consensus;
        // N=3, P=1, threshold floor(3/2)=1: boundary case grants.
        assert!(strategy.grants(&[Permit, Deny, Deny]));
        assert!(!strategy.grants(&[Deny, Deny, Deny]));
        assert!(strategy.grants(&[Permit, Permit, Deny, Deny]));
    }

    #[test]
    fn test_consensus_grants_on_empty_set() {
        // Documented quirk: 0 >= 0/2 holds, so an empty set grants.
        assert!(DecisionStrategy::Consensus.grants(&[]));
    }

    #[test]
    fn test_default_strategy_is_unanimous() {
        assert_eq!(DecisionStrategy::default(), DecisionStrategy::Unanimous);
    }

    #[test]
    fn test_unknown_strategy_falls_back_to_unanimous() {
        let strategy: DecisionStrategy = serde_json::from_str("\"WEIGHTED\"").unwrap();
        assert_eq!(strategy, DecisionStrategy::Unanimous);

        let strategy: DecisionStrategy = serde_json::from_str("\"AFFIRMATIVE\"").unwrap();
        assert_eq!(strategy, DecisionStrategy::Affirmative);
    }

    #[test]
    fn test_effect_serialization() {
        assert_eq!(serde_json::to_string(&Effect::Permit).unwrap(), "\"PERMIT\"");
        let effect: Effect = serde_json::from_str("\"DENY\"").unwrap();
        assert_eq!(effect, Effect::Deny);
    }
}
