//! In-memory repository for task allocations.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::allocation::{
    domain::{AllocationId, TaskAllocation},
    ports::{AllocationRepository, AllocationRepositoryError, AllocationRepositoryResult},
};
use crate::directory::domain::UserId;
use crate::task::domain::TaskId;

/// Thread-safe in-memory allocation repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAllocationRepository {
    allocations: Arc<RwLock<Vec<TaskAllocation>>>,
}

impl InMemoryAllocationRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn filtered(
        &self,
        predicate: impl Fn(&TaskAllocation) -> bool,
    ) -> AllocationRepositoryResult<Vec<TaskAllocation>> {
        let allocations = self.allocations.read().map_err(|err| {
            AllocationRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(allocations
            .iter()
            .filter(|allocation| predicate(allocation))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl AllocationRepository for InMemoryAllocationRepository {
    async fn store(&self, allocation: &TaskAllocation) -> AllocationRepositoryResult<()> {
        let mut allocations = self.allocations.write().map_err(|err| {
            AllocationRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if allocations
            .iter()
            .any(|existing| existing.id() == allocation.id())
        {
            return Err(AllocationRepositoryError::DuplicateAllocation(
                allocation.id(),
            ));
        }
        allocations.push(allocation.clone());
        Ok(())
    }

    async fn update(&self, allocation: &TaskAllocation) -> AllocationRepositoryResult<()> {
        let mut allocations = self.allocations.write().map_err(|err| {
            AllocationRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let slot = allocations
            .iter_mut()
            .find(|existing| existing.id() == allocation.id())
            .ok_or(AllocationRepositoryError::NotFound(allocation.id()))?;
        slot.clone_from(allocation);
        Ok(())
    }

    async fn remove(&self, id: AllocationId) -> AllocationRepositoryResult<()> {
        let mut allocations = self.allocations.write().map_err(|err| {
            AllocationRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let before = allocations.len();
        allocations.retain(|allocation| allocation.id() != id);
        if allocations.len() == before {
            return Err(AllocationRepositoryError::NotFound(id));
        }
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: AllocationId,
    ) -> AllocationRepositoryResult<Option<TaskAllocation>> {
        Ok(self
            .filtered(|allocation| allocation.id() == id)?
            .into_iter()
            .next())
    }

    async fn find_by_task(&self, task_id: TaskId) -> AllocationRepositoryResult<Vec<TaskAllocation>> {
        self.filtered(|allocation| allocation.task_id() == task_id)
    }

    async fn find_by_user(&self, user_id: UserId) -> AllocationRepositoryResult<Vec<TaskAllocation>> {
        self.filtered(|allocation| allocation.user_id() == user_id)
    }

    async fn list(&self) -> AllocationRepositoryResult<Vec<TaskAllocation>> {
        self.filtered(|_| true)
    }
}
