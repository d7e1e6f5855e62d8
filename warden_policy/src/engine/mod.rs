//! Top-level evaluation entry point.

mod audit;
mod evaluator;

pub use audit::AuditEntry;
pub use evaluator::PolicyEvaluator;
