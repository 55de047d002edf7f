//! Task allocation aggregate: one scheduled or actual execution attempt.

use super::{AllocationDomainError, AllocationId, AllocationStatus};
use crate::directory::domain::UserId;
use crate::task::domain::TaskId;
use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// One execution attempt of a task by a user.
///
/// `accumulated_seconds` is authoritative for the time actually spent,
/// independent of the task's nominal budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskAllocation {
    id: AllocationId,
    task_id: TaskId,
    user_id: UserId,
    date: NaiveDate,
    start_time: Option<NaiveTime>,
    planned_minutes: u32,
    status: AllocationStatus,
    accumulated_seconds: u64,
    actual_start_at: Option<DateTime<Utc>>,
    actual_end_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TaskAllocation {
    /// Schedules a slot for later.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationDomainError::EmptyPlan`] when `planned_minutes` is
    /// zero.
    pub fn plan(
        task_id: TaskId,
        user_id: UserId,
        date: NaiveDate,
        start_time: Option<NaiveTime>,
        planned_minutes: u32,
        clock: &impl Clock,
    ) -> Result<Self, AllocationDomainError> {
        if planned_minutes == 0 {
            return Err(AllocationDomainError::EmptyPlan);
        }
        let timestamp = clock.utc();
        Ok(Self {
            id: AllocationId::new(),
            task_id,
            user_id,
            date,
            start_time,
            planned_minutes,
            status: AllocationStatus::Planned,
            accumulated_seconds: 0,
            actual_start_at: None,
            actual_end_at: None,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Creates an allocation that starts running immediately with no
    /// accumulated time.
    #[must_use]
    pub fn start_now(
        task_id: TaskId,
        user_id: UserId,
        planned_minutes: u32,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: AllocationId::new(),
            task_id,
            user_id,
            date: timestamp.date_naive(),
            start_time: Some(timestamp.time()),
            planned_minutes,
            status: AllocationStatus::Running,
            accumulated_seconds: 0,
            actual_start_at: Some(timestamp),
            actual_end_at: None,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Returns the allocation identifier.
    #[must_use]
    pub const fn id(&self) -> AllocationId {
        self.id
    }

    /// Returns the allocated task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the working user.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the scheduled date.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the scheduled start time, if any.
    #[must_use]
    pub const fn start_time(&self) -> Option<NaiveTime> {
        self.start_time
    }

    /// Returns the planned duration in minutes.
    #[must_use]
    pub const fn planned_minutes(&self) -> u32 {
        self.planned_minutes
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> AllocationStatus {
        self.status
    }

    /// Returns the seconds actually spent.
    #[must_use]
    pub const fn accumulated_seconds(&self) -> u64 {
        self.accumulated_seconds
    }

    /// Returns when work actually started.
    #[must_use]
    pub const fn actual_start_at(&self) -> Option<DateTime<Utc>> {
        self.actual_start_at
    }

    /// Returns when work actually ended.
    #[must_use]
    pub const fn actual_end_at(&self) -> Option<DateTime<Utc>> {
        self.actual_end_at
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Starts a planned slot.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationDomainError::InvalidStatusTransition`] unless the
    /// allocation is planned.
    pub fn start(&mut self, clock: &impl Clock) -> Result<(), AllocationDomainError> {
        self.move_to(AllocationStatus::Running)?;
        let timestamp = clock.utc();
        self.actual_start_at = Some(timestamp);
        self.updated_at = timestamp;
        Ok(())
    }

    /// Pauses a running attempt, recording the time spent so far.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationDomainError::InvalidStatusTransition`] unless the
    /// allocation is running.
    pub fn pause(
        &mut self,
        accumulated_seconds: u64,
        clock: &impl Clock,
    ) -> Result<(), AllocationDomainError> {
        self.move_to(AllocationStatus::Paused)?;
        self.accumulated_seconds = accumulated_seconds;
        self.touch(clock);
        Ok(())
    }

    /// Resumes a paused attempt.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationDomainError::InvalidStatusTransition`] unless the
    /// allocation is paused.
    pub fn resume(&mut self, clock: &impl Clock) -> Result<(), AllocationDomainError> {
        if self.status != AllocationStatus::Paused {
            return Err(self.invalid_transition(AllocationStatus::Running));
        }
        self.move_to(AllocationStatus::Running)?;
        self.touch(clock);
        Ok(())
    }

    /// Finalizes an in-flight attempt as done or overrun.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationDomainError::InvalidStatusTransition`] unless the
    /// allocation is running or paused.
    pub fn finish(
        &mut self,
        accumulated_seconds: u64,
        overrun: bool,
        clock: &impl Clock,
    ) -> Result<(), AllocationDomainError> {
        let target = if overrun {
            AllocationStatus::Overrun
        } else {
            AllocationStatus::Done
        };
        self.move_to(target)?;
        let timestamp = clock.utc();
        self.accumulated_seconds = accumulated_seconds;
        self.actual_end_at = Some(timestamp);
        self.updated_at = timestamp;
        Ok(())
    }

    /// Marks a planned slot as missed.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationDomainError::InvalidStatusTransition`] unless the
    /// allocation is planned.
    pub fn mark_missed(&mut self, clock: &impl Clock) -> Result<(), AllocationDomainError> {
        self.move_to(AllocationStatus::Missed)?;
        self.touch(clock);
        Ok(())
    }

    /// Returns whether the allocation can be discarded without losing real
    /// progress.
    ///
    /// Planned slots are always removable. Running attempts are removable
    /// while less than `grace` has passed since they started; paused
    /// attempts while their accumulated time is below `grace`.
    #[must_use]
    pub fn is_removable(&self, now: DateTime<Utc>, grace: TimeDelta) -> bool {
        let grace_seconds = u64::try_from(grace.num_seconds()).unwrap_or(0);
        match self.status {
            AllocationStatus::Planned => true,
            AllocationStatus::Running => self
                .actual_start_at
                .is_none_or(|started| now.signed_duration_since(started) < grace),
            AllocationStatus::Paused => self.accumulated_seconds < grace_seconds,
            AllocationStatus::Done | AllocationStatus::Missed | AllocationStatus::Overrun => false,
        }
    }

    fn move_to(&mut self, target: AllocationStatus) -> Result<(), AllocationDomainError> {
        if !self.status.can_transition_to(target) {
            return Err(self.invalid_transition(target));
        }
        self.status = target;
        Ok(())
    }

    const fn invalid_transition(&self, to: AllocationStatus) -> AllocationDomainError {
        AllocationDomainError::InvalidStatusTransition {
            allocation_id: self.id,
            from: self.status,
            to,
        }
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
