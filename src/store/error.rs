//! Errors surfaced at the store's command boundary.

use crate::allocation::services::AllocationError;
use crate::directory::{
    domain::{DirectoryDomainError, UserId},
    services::DirectoryError,
};
use crate::focus::services::FocusSessionError;
use crate::knowledge::services::KnowledgeError;
use crate::routine::services::RoutineError;
use crate::task::{domain::TaskDomainError, services::TaskLifecycleError};
use thiserror::Error;

/// Errors returned by [`super::ChronosStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// Directory operation failed.
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    /// Task operation failed.
    #[error(transparent)]
    Task(#[from] TaskLifecycleError),
    /// Allocation operation failed.
    #[error(transparent)]
    Allocation(#[from] AllocationError),
    /// Focus session operation failed.
    #[error(transparent)]
    Focus(#[from] FocusSessionError),
    /// Routine operation failed.
    #[error(transparent)]
    Routine(#[from] RoutineError),
    /// Knowledge base operation failed.
    #[error(transparent)]
    Knowledge(#[from] KnowledgeError),
    /// The referenced user is deactivated.
    #[error("user {0} is inactive")]
    InactiveUser(UserId),
}

impl From<DirectoryDomainError> for StoreError {
    fn from(err: DirectoryDomainError) -> Self {
        Self::Directory(DirectoryError::Domain(err))
    }
}

impl From<TaskDomainError> for StoreError {
    fn from(err: TaskDomainError) -> Self {
        Self::Task(TaskLifecycleError::Domain(err))
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
