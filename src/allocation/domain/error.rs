//! Error types for allocation validation and lifecycle.

use super::{AllocationId, AllocationStatus};
use thiserror::Error;

/// Errors returned while constructing or mutating allocations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AllocationDomainError {
    /// A planned slot has no duration.
    #[error("planned duration must be at least one minute")]
    EmptyPlan,

    /// The requested status change is not permitted.
    #[error("allocation {allocation_id} cannot move from {from} to {to}")]
    InvalidStatusTransition {
        /// Allocation identifier.
        allocation_id: AllocationId,
        /// Current status.
        from: AllocationStatus,
        /// Requested status.
        to: AllocationStatus,
    },

    /// The allocation has recorded real progress and cannot be discarded.
    #[error("allocation {0} has recorded progress and cannot be removed")]
    NotRemovable(AllocationId),
}

/// Error returned while parsing allocation statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown allocation status: {0}")]
pub struct ParseAllocationStatusError(pub String);
