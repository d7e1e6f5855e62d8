//! Resource permissions.

use std::fmt;

use serde::{Deserialize, Serialize};

use warden_core::id::ResourceId;

/// A specific resource/scope access request checked against the policy
/// graph.
///
/// Permissions are cheap to clone and usable as map keys; the decision
/// cache relies on their equality staying stable for the lifetime of one
/// top-level evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourcePermission {
    /// The resource being accessed.
    resource: ResourceId,

    /// The scope of the access, if the check is scope-specific.
    scope: Option<String>,
}

impl ResourcePermission {
    /// Create a permission for a resource without a specific scope.
    pub fn new(resource: ResourceId) -> Self {
        Self {
            resource,
            scope: None,
        }
    }

    /// Narrow the permission to a specific scope.
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// The resource being accessed.
    pub fn resource(&self) -> ResourceId {
        self.resource
    }

    /// The scope of the access, if any.
    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }
}

impl fmt::Display for ResourcePermission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.scope {
            Some(scope) => write!(f, "{}#{}", self.resource, scope),
            None => write!(f, "{}", self.resource),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scoped_and_unscoped_permissions_differ() {
        let resource = ResourceId::new();
        let unscoped = ResourcePermission::new(resource);
        let scoped = ResourcePermission::new(resource).with_scope("view");
        assert_ne!(unscoped, scoped);
        assert_eq!(scoped.scope(), Some("view"));
    }

    #[test]
    fn test_display_includes_scope() {
        let resource = ResourceId::nil();
        let scoped = ResourcePermission::new(resource).with_scope("edit");
        assert!(scoped.to_string().ends_with("#edit"));
    }
}
