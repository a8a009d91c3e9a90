//! Domain error types.
//!
//! These errors represent invariant violations when assembling domain
//! values. They are distinct from data-loading errors.

use super::StopId;

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Plan has no steps
    #[error("plan must have at least one step")]
    EmptyPlan,

    /// Consecutive steps don't meet at the same stop
    #[error("step ending at {0} does not connect to step starting at {1}")]
    StepsNotConnected(StopId, StopId),
}
