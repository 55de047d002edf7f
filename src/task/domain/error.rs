//! Error types for task domain validation and parsing.

use super::{TaskId, TaskStatus};
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The time budget value is zero.
    #[error("time budget must be a positive value")]
    EmptyBudget,

    /// The rating is outside the accepted range.
    #[error("invalid rating {0}, expected a value between 1 and 5")]
    InvalidRating(u8),

    /// The submission summary is empty after trimming.
    #[error("submission summary must not be empty")]
    EmptySubmission,

    /// The requested state transition is not permitted.
    #[error("task {task_id} cannot transition from {from} to {to}")]
    InvalidStateTransition {
        /// Identifier of the task whose transition was rejected.
        task_id: TaskId,
        /// Current lifecycle state.
        from: TaskStatus,
        /// Requested target state.
        to: TaskStatus,
    },

    /// The task details can no longer be edited in its current state.
    #[error("task {task_id} cannot be edited while {status}")]
    NotEditable {
        /// Identifier of the task.
        task_id: TaskId,
        /// Current lifecycle state.
        status: TaskStatus,
    },
}

/// Error returned while parsing task enums from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {kind}: {value}")]
pub struct ParseTaskValueError {
    /// Enum being parsed.
    pub kind: &'static str,
    /// Rejected raw value.
    pub value: String,
}

impl ParseTaskValueError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}
