//! Policy and permission models.
//!
//! These types describe the static side of authorization: the policy graph
//! and the permission being checked. The engine consumes them read-only.

mod permission;
mod policy;

pub use permission::ResourcePermission;
pub use policy::Policy;
