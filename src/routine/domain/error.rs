//! Error types for routine template validation and lifecycle.

use super::{RoutineId, RoutineStatus};
use thiserror::Error;

/// Errors returned while constructing or mutating routine templates.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoutineDomainError {
    /// The routine title is empty after trimming.
    #[error("routine {0} needs a title before it can be activated")]
    MissingTitle(RoutineId),

    /// The routine has no assignees.
    #[error("routine {0} needs at least one assignee before it can be activated")]
    NoAssignees(RoutineId),

    /// The requested status change is not permitted.
    #[error("routine {routine_id} cannot move from {from} to {to}")]
    InvalidStatusTransition {
        /// Routine identifier.
        routine_id: RoutineId,
        /// Current status.
        from: RoutineStatus,
        /// Requested status.
        to: RoutineStatus,
    },

    /// The routine is not active and cannot be deployed.
    #[error("routine {routine_id} is {status} and cannot be deployed")]
    NotDeployable {
        /// Routine identifier.
        routine_id: RoutineId,
        /// Current status.
        status: RoutineStatus,
    },

    /// The routine has completed and can no longer be edited.
    #[error("routine {0} has completed and can no longer be edited")]
    Completed(RoutineId),

    /// The rotation index does not address an assignee.
    #[error("rotation index {index} is out of range for {assignees} assignees")]
    RotationIndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of assignees.
        assignees: usize,
    },

    /// The monthly recurrence day is outside `1..=31`.
    #[error("invalid day of month {0}, expected a value between 1 and 31")]
    InvalidDayOfMonth(u32),
}

/// Error returned while parsing routine enums from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {kind}: {value}")]
pub struct ParseRoutineValueError {
    /// Enum being parsed.
    pub kind: &'static str,
    /// Rejected raw value.
    pub value: String,
}
