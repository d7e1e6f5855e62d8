//! Audit trail for completed evaluations.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use dashmap::DashMap;

use warden_core::id::PolicyId;
use warden_core::types::Effect;

use crate::model::{Policy, ResourcePermission};

/// Audit entry for one completed top-level evaluation.
#[derive(Debug, Clone)]
pub struct AuditEntry {
    /// Unique, monotonically increasing audit id.
    pub id: u64,

    /// The root policy that was evaluated.
    pub policy_id: PolicyId,

    /// The root policy's name.
    pub policy_name: String,

    /// The permission that was checked.
    pub permission: ResourcePermission,

    /// The final effect.
    pub effect: Effect,

    /// When the decision was made.
    pub timestamp: DateTime<Utc>,
}

/// In-memory audit log for policy decisions.
pub(crate) struct AuditLog {
    entries: DashMap<u64, AuditEntry>,
    next_id: AtomicU64,
}

impl AuditLog {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Record a completed decision, returning its audit id.
    pub fn record(&self, policy: &Policy, permission: &ResourcePermission, effect: Effect) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.entries.insert(
            id,
            AuditEntry {
                id,
                policy_id: policy.id(),
                policy_name: policy.name().to_string(),
                permission: permission.clone(),
                effect,
                timestamp: Utc::now(),
            },
        );
        id
    }

    /// All entries, ordered by audit id.
    pub fn entries(&self) -> Vec<AuditEntry> {
        let mut entries: Vec<AuditEntry> =
            self.entries.iter().map(|e| e.value().clone()).collect();
        entries.sort_by_key(|entry| entry.id);
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warden_core::id::ResourceId;

    #[test]
    fn test_entries_are_ordered_by_id() {
        let log = AuditLog::new();
        let policy = Policy::new("root", "aggregate");
        let permission = ResourcePermission::new(ResourceId::new());

        log.record(&policy, &permission, Effect::Deny);
        log.record(&policy, &permission, Effect::Permit);

        let entries = log.entries();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].id < entries[1].id);
        assert_eq!(entries[0].effect, Effect::Deny);
        assert_eq!(entries[1].effect, Effect::Permit);
    }
}
