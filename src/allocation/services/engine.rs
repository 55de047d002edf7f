//! Allocation engine: planning, progress tracking and cleanup of task slots.

use crate::allocation::{
    domain::{AllocationDomainError, AllocationId, AllocationStatus, TaskAllocation},
    ports::{AllocationRepository, AllocationRepositoryError},
};
use crate::directory::domain::UserId;
use crate::task::domain::TaskId;
use chrono::{NaiveDate, NaiveTime, TimeDelta};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Seconds of progress below which a started allocation may be discarded.
pub const DEFAULT_REMOVAL_GRACE_SECONDS: i64 = 180;

/// Request payload for planning an allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanAllocationRequest {
    task_id: TaskId,
    user_id: UserId,
    date: NaiveDate,
    start_time: Option<NaiveTime>,
    planned_minutes: u32,
}

impl PlanAllocationRequest {
    /// Creates a request for a slot on `date` without a fixed start time.
    #[must_use]
    pub const fn new(task_id: TaskId, user_id: UserId, date: NaiveDate, planned_minutes: u32) -> Self {
        Self {
            task_id,
            user_id,
            date,
            start_time: None,
            planned_minutes,
        }
    }

    /// Returns the task to allocate.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the user doing the work.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Pins the slot to a start time.
    #[must_use]
    pub const fn with_start_time(mut self, start_time: NaiveTime) -> Self {
        self.start_time = Some(start_time);
        self
    }
}

/// Service-level errors for allocation operations.
#[derive(Debug, Error)]
pub enum AllocationError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] AllocationDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] AllocationRepositoryError),
}

/// Result type for allocation service operations.
pub type AllocationResult<T> = Result<T, AllocationError>;

/// Allocation orchestration service.
pub struct AllocationEngine<R, C>
where
    R: AllocationRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    removal_grace: TimeDelta,
}

impl<R, C> Clone for AllocationEngine<R, C>
where
    R: AllocationRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
            removal_grace: self.removal_grace,
        }
    }
}

impl<R, C> AllocationEngine<R, C>
where
    R: AllocationRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new allocation engine with the default removal grace period.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            repository,
            clock,
            removal_grace: TimeDelta::seconds(DEFAULT_REMOVAL_GRACE_SECONDS),
        }
    }

    /// Overrides the removal grace period.
    #[must_use]
    pub const fn with_removal_grace_seconds(mut self, seconds: i64) -> Self {
        self.removal_grace = TimeDelta::seconds(seconds);
        self
    }

    /// Returns the configured removal grace period.
    #[must_use]
    pub const fn removal_grace(&self) -> TimeDelta {
        self.removal_grace
    }

    /// Schedules a planned slot.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationError::Domain`] when the plan is empty, or
    /// [`AllocationError::Repository`] when persistence fails.
    pub async fn plan(&self, request: PlanAllocationRequest) -> AllocationResult<TaskAllocation> {
        let allocation = TaskAllocation::plan(
            request.task_id,
            request.user_id,
            request.date,
            request.start_time,
            request.planned_minutes,
            &*self.clock,
        )?;
        self.repository.store(&allocation).await?;
        info!(
            allocation_id = %allocation.id(),
            task_id = %allocation.task_id(),
            user_id = %allocation.user_id(),
            date = %allocation.date(),
            "planned allocation"
        );
        Ok(allocation)
    }

    /// Creates an allocation that is already running.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationError::Repository`] when persistence fails.
    pub async fn start_now(
        &self,
        task_id: TaskId,
        user_id: UserId,
        planned_minutes: u32,
    ) -> AllocationResult<TaskAllocation> {
        let allocation = TaskAllocation::start_now(task_id, user_id, planned_minutes, &*self.clock);
        self.repository.store(&allocation).await?;
        info!(
            allocation_id = %allocation.id(),
            task_id = %task_id,
            user_id = %user_id,
            "started allocation"
        );
        Ok(allocation)
    }

    /// Retrieves an allocation by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationRepositoryError::NotFound`] wrapped in
    /// [`AllocationError::Repository`] when the allocation does not exist.
    pub async fn find(&self, allocation_id: AllocationId) -> AllocationResult<TaskAllocation> {
        debug!(allocation_id = %allocation_id, "loading allocation");
        let allocation = self
            .repository
            .find_by_id(allocation_id)
            .await?
            .ok_or(AllocationRepositoryError::NotFound(allocation_id))?;
        Ok(allocation)
    }

    /// Starts a planned slot.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationError::Domain`] unless the slot is planned.
    pub async fn start(&self, allocation_id: AllocationId) -> AllocationResult<TaskAllocation> {
        self.mutate(allocation_id, |allocation, clock| allocation.start(clock))
            .await
    }

    /// Pauses a running attempt with the time spent so far.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationError::Domain`] unless the attempt is running.
    pub async fn pause(
        &self,
        allocation_id: AllocationId,
        accumulated_seconds: u64,
    ) -> AllocationResult<TaskAllocation> {
        self.mutate(allocation_id, |allocation, clock| {
            allocation.pause(accumulated_seconds, clock)
        })
        .await
    }

    /// Resumes a paused attempt.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationError::Domain`] unless the attempt is paused.
    pub async fn resume(&self, allocation_id: AllocationId) -> AllocationResult<TaskAllocation> {
        self.mutate(allocation_id, |allocation, clock| allocation.resume(clock))
            .await
    }

    /// Finalizes an attempt as done or overrun.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationError::Domain`] unless the attempt is running or
    /// paused.
    pub async fn finish(
        &self,
        allocation_id: AllocationId,
        accumulated_seconds: u64,
        overrun: bool,
    ) -> AllocationResult<TaskAllocation> {
        let allocation = self
            .mutate(allocation_id, |allocation, clock| {
                allocation.finish(accumulated_seconds, overrun, clock)
            })
            .await?;
        info!(
            allocation_id = %allocation_id,
            status = %allocation.status(),
            accumulated_seconds,
            "finished allocation"
        );
        Ok(allocation)
    }

    /// Discards an allocation that has not made meaningful progress.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationDomainError::NotRemovable`] when the allocation is
    /// final or has progressed past the grace period.
    pub async fn remove(&self, allocation_id: AllocationId) -> AllocationResult<()> {
        let allocation = self.find(allocation_id).await?;
        if !allocation.is_removable(self.clock.utc(), self.removal_grace) {
            return Err(AllocationDomainError::NotRemovable(allocation_id).into());
        }
        self.repository.remove(allocation_id).await?;
        info!(allocation_id = %allocation_id, "removed allocation");
        Ok(())
    }

    /// Marks planned slots dated before `today` as missed.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationError::Repository`] when persistence fails.
    pub async fn sweep_missed(&self, today: NaiveDate) -> AllocationResult<Vec<TaskAllocation>> {
        let mut missed = Vec::new();
        for mut allocation in self.repository.list().await? {
            if allocation.status() != AllocationStatus::Planned || allocation.date() >= today {
                continue;
            }
            allocation.mark_missed(&*self.clock)?;
            self.repository.update(&allocation).await?;
            missed.push(allocation);
        }
        if !missed.is_empty() {
            info!(count = missed.len(), today = %today, "marked allocations missed");
        }
        Ok(missed)
    }

    /// Counts the user's running allocations.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationError::Repository`] when the lookup fails.
    pub async fn running_count(&self, user_id: UserId) -> AllocationResult<usize> {
        Ok(self
            .repository
            .find_by_user(user_id)
            .await?
            .iter()
            .filter(|allocation| allocation.status() == AllocationStatus::Running)
            .count())
    }

    /// Lists allocations for a task.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationError::Repository`] when the lookup fails.
    pub async fn for_task(&self, task_id: TaskId) -> AllocationResult<Vec<TaskAllocation>> {
        Ok(self.repository.find_by_task(task_id).await?)
    }

    /// Lists allocations for a user.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationError::Repository`] when the lookup fails.
    pub async fn for_user(&self, user_id: UserId) -> AllocationResult<Vec<TaskAllocation>> {
        Ok(self.repository.find_by_user(user_id).await?)
    }

    /// Lists a user's allocations on one date.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationError::Repository`] when the lookup fails.
    pub async fn for_user_on(
        &self,
        user_id: UserId,
        date: NaiveDate,
    ) -> AllocationResult<Vec<TaskAllocation>> {
        let mut allocations = self.repository.find_by_user(user_id).await?;
        allocations.retain(|allocation| allocation.date() == date);
        Ok(allocations)
    }

    /// Lists all allocations.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationError::Repository`] when the lookup fails.
    pub async fn list(&self) -> AllocationResult<Vec<TaskAllocation>> {
        Ok(self.repository.list().await?)
    }

    async fn mutate<F>(&self, allocation_id: AllocationId, apply: F) -> AllocationResult<TaskAllocation>
    where
        F: FnOnce(&mut TaskAllocation, &C) -> Result<(), AllocationDomainError> + Send,
    {
        let mut allocation = self.find(allocation_id).await?;
        apply(&mut allocation, &*self.clock)?;
        self.repository.update(&allocation).await?;
        Ok(allocation)
    }
}
