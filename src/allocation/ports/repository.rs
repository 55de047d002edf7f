//! Repository port for task allocations.

use crate::allocation::domain::{AllocationId, TaskAllocation};
use crate::directory::domain::UserId;
use crate::task::domain::TaskId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for allocation repository operations.
pub type AllocationRepositoryResult<T> = Result<T, AllocationRepositoryError>;

/// Allocation persistence contract.
#[async_trait]
pub trait AllocationRepository: Send + Sync {
    /// Stores a new allocation.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationRepositoryError::DuplicateAllocation`] when the ID
    /// already exists.
    async fn store(&self, allocation: &TaskAllocation) -> AllocationRepositoryResult<()>;

    /// Persists changes to an existing allocation.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationRepositoryError::NotFound`] when the allocation
    /// does not exist.
    async fn update(&self, allocation: &TaskAllocation) -> AllocationRepositoryResult<()>;

    /// Deletes an allocation.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationRepositoryError::NotFound`] when the allocation
    /// does not exist.
    async fn remove(&self, id: AllocationId) -> AllocationRepositoryResult<()>;

    /// Finds an allocation by identifier.
    async fn find_by_id(&self, id: AllocationId)
    -> AllocationRepositoryResult<Option<TaskAllocation>>;

    /// Returns allocations for a task in creation order.
    async fn find_by_task(&self, task_id: TaskId) -> AllocationRepositoryResult<Vec<TaskAllocation>>;

    /// Returns allocations for a user in creation order.
    async fn find_by_user(&self, user_id: UserId) -> AllocationRepositoryResult<Vec<TaskAllocation>>;

    /// Returns all allocations in creation order.
    async fn list(&self) -> AllocationRepositoryResult<Vec<TaskAllocation>>;
}

/// Errors returned by allocation repository implementations.
#[derive(Debug, Clone, Error)]
pub enum AllocationRepositoryError {
    /// An allocation with the same identifier already exists.
    #[error("duplicate allocation identifier: {0}")]
    DuplicateAllocation(AllocationId),

    /// The allocation was not found.
    #[error("allocation not found: {0}")]
    NotFound(AllocationId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl AllocationRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
