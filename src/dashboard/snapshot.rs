//! Owned task and allocation snapshot feeding the aggregators.

use super::{
    DEFAULT_APPROACHING_WINDOW_HOURS, DueBuckets, PlannedMinutes, QuadrantCounts, ReportPeriod,
    StatusCounts, actual_seconds_by_user, due_buckets, planned_minutes, quadrant_counts,
    status_counts,
};
use crate::allocation::domain::TaskAllocation;
use crate::directory::domain::UserId;
use crate::task::domain::Task;
use chrono::{DateTime, TimeDelta, Utc};

/// Point-in-time copy of the records the dashboard reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSnapshot {
    tasks: Vec<Task>,
    allocations: Vec<TaskAllocation>,
    approaching_window: TimeDelta,
}

impl DashboardSnapshot {
    /// Wraps task and allocation records with the default approaching
    /// window.
    #[must_use]
    pub fn new(tasks: Vec<Task>, allocations: Vec<TaskAllocation>) -> Self {
        Self {
            tasks,
            allocations,
            approaching_window: TimeDelta::hours(DEFAULT_APPROACHING_WINDOW_HOURS),
        }
    }

    /// Overrides the approaching window.
    #[must_use]
    pub const fn with_approaching_window(mut self, window: TimeDelta) -> Self {
        self.approaching_window = window;
        self
    }

    /// Narrows the snapshot to one user's tasks and allocations.
    #[must_use]
    pub fn for_user(&self, user_id: UserId) -> Self {
        Self {
            tasks: self
                .tasks
                .iter()
                .filter(|task| task.involves(user_id))
                .cloned()
                .collect(),
            allocations: self
                .allocations
                .iter()
                .filter(|allocation| allocation.user_id() == user_id)
                .cloned()
                .collect(),
            approaching_window: self.approaching_window,
        }
    }

    /// Returns the captured tasks.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the captured allocations.
    #[must_use]
    pub fn allocations(&self) -> &[TaskAllocation] {
        &self.allocations
    }

    /// Groups tasks by due-date urgency.
    #[must_use]
    pub fn due_buckets(&self, now: DateTime<Utc>) -> DueBuckets<'_> {
        due_buckets(&self.tasks, now, self.approaching_window)
    }

    /// Sums planned minutes per budget kind.
    #[must_use]
    pub fn planned_minutes(&self, period: &ReportPeriod) -> PlannedMinutes {
        planned_minutes(&self.tasks, period)
    }

    /// Sums tracked seconds per user.
    #[must_use]
    pub fn actual_seconds_by_user(&self, period: &ReportPeriod) -> Vec<(UserId, u64)> {
        actual_seconds_by_user(&self.allocations, period)
    }

    /// Counts tasks by status.
    #[must_use]
    pub fn status_counts(&self) -> StatusCounts {
        status_counts(&self.tasks)
    }

    /// Counts tasks by quadrant.
    #[must_use]
    pub fn quadrant_counts(&self) -> QuadrantCounts {
        quadrant_counts(&self.tasks)
    }
}
