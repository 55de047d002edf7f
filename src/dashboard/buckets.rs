//! Due-date buckets for the dashboard overview.

use crate::task::domain::{Task, TaskStatus};
use chrono::{DateTime, TimeDelta, Utc};

/// Hours ahead of `now` that count as approaching.
pub const DEFAULT_APPROACHING_WINDOW_HOURS: i64 = 24;

/// Tasks grouped by due-date urgency.
///
/// A task is overdue until it is done or archived, so late submissions
/// stay overdue while waiting for review. `due_today` and `approaching`
/// only consider open (`todo` or `doing`) tasks. A task due later today
/// appears in both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DueBuckets<'a> {
    /// Unfinished tasks whose due time has passed.
    pub overdue: Vec<&'a Task>,
    /// Open tasks due on the current UTC date.
    pub due_today: Vec<&'a Task>,
    /// Tasks waiting for review.
    pub submitted: Vec<&'a Task>,
    /// Open tasks due between now and the end of the window.
    pub approaching: Vec<&'a Task>,
}

/// Groups tasks by due-date urgency relative to `now`.
#[must_use]
pub fn due_buckets(tasks: &[Task], now: DateTime<Utc>, window: TimeDelta) -> DueBuckets<'_> {
    let horizon = now.checked_add_signed(window).unwrap_or(DateTime::<Utc>::MAX_UTC);
    let today = now.date_naive();
    let mut buckets = DueBuckets::default();
    for task in tasks {
        if task.status() == TaskStatus::Submitted {
            buckets.submitted.push(task);
        }
        if is_overdue(task, now) {
            buckets.overdue.push(task);
        }
        let Some(due_at) = task.due_at() else {
            continue;
        };
        if !task.status().is_open() {
            continue;
        }
        if due_at.date_naive() == today {
            buckets.due_today.push(task);
        }
        if now <= due_at && due_at <= horizon {
            buckets.approaching.push(task);
        }
    }
    buckets
}

/// Returns whether a task that is not yet done is past due at `now`.
#[must_use]
pub fn is_overdue(task: &Task, now: DateTime<Utc>) -> bool {
    matches!(
        task.status(),
        TaskStatus::Todo | TaskStatus::Doing | TaskStatus::Submitted
    ) && task.due_at().is_some_and(|due_at| due_at < now)
}
