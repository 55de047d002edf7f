//! Unit tests for task status transition rules.

use crate::directory::domain::UserId;
use crate::task::domain::{Task, TaskDetails, TaskDomainError, TaskStatus, TimeBudget};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

#[fixture]
fn clock() -> DefaultClock {
    DefaultClock
}

#[fixture]
fn todo_task(clock: DefaultClock) -> Task {
    let details = TaskDetails::new("Triage inbox", TimeBudget::minutes(15).expect("budget"))
        .expect("valid details");
    Task::new(UserId::new(), details, &clock)
}

#[rstest]
#[case(TaskStatus::Todo, TaskStatus::Todo, false)]
#[case(TaskStatus::Todo, TaskStatus::Doing, true)]
#[case(TaskStatus::Todo, TaskStatus::Submitted, false)]
#[case(TaskStatus::Todo, TaskStatus::Done, false)]
#[case(TaskStatus::Todo, TaskStatus::Archived, true)]
#[case(TaskStatus::Doing, TaskStatus::Todo, false)]
#[case(TaskStatus::Doing, TaskStatus::Doing, false)]
#[case(TaskStatus::Doing, TaskStatus::Submitted, true)]
#[case(TaskStatus::Doing, TaskStatus::Done, true)]
#[case(TaskStatus::Doing, TaskStatus::Archived, false)]
#[case(TaskStatus::Submitted, TaskStatus::Todo, false)]
#[case(TaskStatus::Submitted, TaskStatus::Doing, false)]
#[case(TaskStatus::Submitted, TaskStatus::Submitted, false)]
#[case(TaskStatus::Submitted, TaskStatus::Done, true)]
#[case(TaskStatus::Submitted, TaskStatus::Archived, false)]
#[case(TaskStatus::Done, TaskStatus::Todo, false)]
#[case(TaskStatus::Done, TaskStatus::Doing, false)]
#[case(TaskStatus::Done, TaskStatus::Submitted, false)]
#[case(TaskStatus::Done, TaskStatus::Done, false)]
#[case(TaskStatus::Done, TaskStatus::Archived, true)]
#[case(TaskStatus::Archived, TaskStatus::Todo, false)]
#[case(TaskStatus::Archived, TaskStatus::Doing, false)]
#[case(TaskStatus::Archived, TaskStatus::Submitted, false)]
#[case(TaskStatus::Archived, TaskStatus::Done, false)]
#[case(TaskStatus::Archived, TaskStatus::Archived, false)]
fn can_transition_to_returns_expected(
    #[case] from: TaskStatus,
    #[case] to: TaskStatus,
    #[case] expected: bool,
) {
    assert_eq!(from.can_transition_to(to), expected);
}

#[rstest]
#[case(TaskStatus::Todo, true)]
#[case(TaskStatus::Doing, true)]
#[case(TaskStatus::Submitted, false)]
#[case(TaskStatus::Done, false)]
#[case(TaskStatus::Archived, false)]
fn open_statuses_are_todo_and_doing(#[case] status: TaskStatus, #[case] open: bool) {
    assert_eq!(status.is_open(), open);
}

#[rstest]
fn forward_path_reaches_archived(mut todo_task: Task, clock: DefaultClock) {
    for target in [
        TaskStatus::Doing,
        TaskStatus::Submitted,
        TaskStatus::Done,
        TaskStatus::Archived,
    ] {
        todo_task
            .transition_to(target, &clock)
            .expect("forward transition should succeed");
        assert_eq!(todo_task.status(), target);
    }
}

#[rstest]
fn invalid_transition_reports_both_states(mut todo_task: Task, clock: DefaultClock) {
    let task_id = todo_task.id();
    let result = todo_task.transition_to(TaskStatus::Done, &clock);

    assert_eq!(
        result,
        Err(TaskDomainError::InvalidStateTransition {
            task_id,
            from: TaskStatus::Todo,
            to: TaskStatus::Done,
        })
    );
    assert_eq!(todo_task.status(), TaskStatus::Todo);
}

#[rstest]
fn begin_work_is_idempotent_while_doing(mut todo_task: Task, clock: DefaultClock) {
    todo_task.begin_work(&clock).expect("todo can start");
    todo_task.begin_work(&clock).expect("doing stays doing");
    assert_eq!(todo_task.status(), TaskStatus::Doing);
}

#[rstest]
#[case("todo", TaskStatus::Todo)]
#[case("Doing", TaskStatus::Doing)]
#[case(" submitted ", TaskStatus::Submitted)]
#[case("DONE", TaskStatus::Done)]
#[case("archived", TaskStatus::Archived)]
fn status_parses_case_insensitively(#[case] raw: &str, #[case] expected: TaskStatus) {
    assert_eq!(TaskStatus::try_from(raw), Ok(expected));
}
