//! Unit tests for the dashboard aggregators.


use crate::directory::domain::UserId;
use crate::task::domain::{Task, TaskDetails, TaskStatus, TimeBudget};
use crate::test_support::ManualClock;
use chrono::{DateTime, Utc};

/// Builds a task created at the clock's current instant.
fn task(clock: &ManualClock, budget: TimeBudget, due_at: Option<DateTime<Utc>>) -> Task {
    let details = due_at.into_iter().fold(
        TaskDetails::new("Dashboard task", budget).expect("valid details"),
        TaskDetails::with_due_at,
    );
    Task::new(UserId::new(), details, clock)
}

/// Walks a fresh task forward to `status`.
fn advance_to(task: &mut Task, status: TaskStatus, clock: &ManualClock) {
    let path: &[TaskStatus] = match status {
        TaskStatus::Todo => &[],
        TaskStatus::Doing => &[TaskStatus::Doing],
        TaskStatus::Submitted => &[TaskStatus::Doing, TaskStatus::Submitted],
        TaskStatus::Done => &[TaskStatus::Doing, TaskStatus::Done],
        TaskStatus::Archived => &[TaskStatus::Archived],
    };
    for step in path {
        task.transition_to(*step, clock).expect("forward transition");
    }
}
