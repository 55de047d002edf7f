//! Planned and tracked time totals.

use super::ReportPeriod;
use crate::allocation::domain::TaskAllocation;
use crate::directory::domain::UserId;
use crate::task::domain::{Task, TaskStatus, TimeType};

/// Planned minutes split by budget kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlannedMinutes {
    /// Minutes from `misc` budgets.
    pub misc: u64,
    /// Minutes from `daily` (hour-based) budgets.
    pub daily: u64,
    /// Minutes from `long` (day-based) budgets.
    pub long: u64,
}

impl PlannedMinutes {
    /// Returns the minutes recorded for one budget kind.
    #[must_use]
    pub const fn for_type(&self, time_type: TimeType) -> u64 {
        match time_type {
            TimeType::Misc => self.misc,
            TimeType::Daily => self.daily,
            TimeType::Long => self.long,
        }
    }

    /// Returns the total across budget kinds.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.misc
            .saturating_add(self.daily)
            .saturating_add(self.long)
    }

    /// Returns the total as fractional hours for display.
    #[must_use]
    pub fn total_hours(&self) -> f64 {
        minutes_to_hours(self.total())
    }

    const fn add(&mut self, time_type: TimeType, minutes: u64) {
        let slot = match time_type {
            TimeType::Misc => &mut self.misc,
            TimeType::Daily => &mut self.daily,
            TimeType::Long => &mut self.long,
        };
        *slot = slot.saturating_add(minutes);
    }
}

/// Converts whole minutes to fractional hours for display.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "hours are a display-only projection of integer minutes"
)]
pub fn minutes_to_hours(minutes: u64) -> f64 {
    minutes as f64 / 60.0
}

/// Sums planned minutes per budget kind for tasks falling in `period`.
///
/// A task falls in the period by its due time, or by its creation time when
/// it has no due time. Archived tasks are excluded.
#[must_use]
pub fn planned_minutes(tasks: &[Task], period: &ReportPeriod) -> PlannedMinutes {
    let mut totals = PlannedMinutes::default();
    for task in tasks {
        if task.status() == TaskStatus::Archived {
            continue;
        }
        let anchor = task.due_at().unwrap_or_else(|| task.created_at());
        if period.contains(anchor) {
            let budget = task.budget();
            totals.add(budget.time_type(), budget.as_minutes());
        }
    }
    totals
}

/// Sums tracked seconds per user for allocations that started in `period`.
///
/// Allocations that never started are skipped. Users appear in the order
/// their first allocation does.
#[must_use]
pub fn actual_seconds_by_user(
    allocations: &[TaskAllocation],
    period: &ReportPeriod,
) -> Vec<(UserId, u64)> {
    let mut totals: Vec<(UserId, u64)> = Vec::new();
    for allocation in allocations {
        let Some(started) = allocation.actual_start_at() else {
            continue;
        };
        if !period.contains(started) {
            continue;
        }
        let user_id = allocation.user_id();
        if !totals.iter().any(|(seen, _)| *seen == user_id) {
            totals.push((user_id, 0));
        }
        for (seen, total) in &mut totals {
            if *seen == user_id {
                *total = total.saturating_add(allocation.accumulated_seconds());
            }
        }
    }
    totals
}

/// Number of tasks in each status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    /// Tasks not started.
    pub todo: usize,
    /// Tasks in progress.
    pub doing: usize,
    /// Tasks waiting for review.
    pub submitted: usize,
    /// Finished tasks.
    pub done: usize,
    /// Archived tasks.
    pub archived: usize,
}

impl StatusCounts {
    /// Returns the count for one status.
    #[must_use]
    pub const fn get(&self, status: TaskStatus) -> usize {
        match status {
            TaskStatus::Todo => self.todo,
            TaskStatus::Doing => self.doing,
            TaskStatus::Submitted => self.submitted,
            TaskStatus::Done => self.done,
            TaskStatus::Archived => self.archived,
        }
    }
}

/// Counts tasks by status.
#[must_use]
pub fn status_counts(tasks: &[Task]) -> StatusCounts {
    let mut counts = StatusCounts::default();
    for task in tasks {
        let slot = match task.status() {
            TaskStatus::Todo => &mut counts.todo,
            TaskStatus::Doing => &mut counts.doing,
            TaskStatus::Submitted => &mut counts.submitted,
            TaskStatus::Done => &mut counts.done,
            TaskStatus::Archived => &mut counts.archived,
        };
        *slot = slot.saturating_add(1);
    }
    counts
}
