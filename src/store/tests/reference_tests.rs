//! Tests for cross-context reference checks at the command boundary.

use std::sync::Arc;

use super::{create_task, details, register};
use crate::allocation::services::PlanAllocationRequest;
use crate::classifier::adapters::KeywordClassifier;
use crate::config::ChronosConfig;
use crate::directory::{
    domain::{DirectoryDomainError, UserId},
    services::{CreateProjectRequest, DirectoryError},
};
use crate::routine::domain::{Recurrence, RoutineDefinition};
use crate::store::{ChronosStore, Command, CommandOutcome, StoreError};
use crate::task::{domain::TimeBudget, services::CreateTaskRequest};
use crate::test_support::{ManualClock, monday_morning};
use rstest::{fixture, rstest};

type TestStore = ChronosStore<KeywordClassifier, ManualClock>;

#[fixture]
fn store() -> TestStore {
    ChronosStore::new(
        ChronosConfig::default(),
        Arc::new(KeywordClassifier::new()),
        Arc::new(ManualClock::at(monday_morning())),
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_owner_is_rejected(store: TestStore) {
    let ghost = UserId::new();

    let result = store
        .apply(Command::CreateTask(CreateTaskRequest::new(
            ghost,
            details("Orphan"),
        )))
        .await;

    assert!(matches!(
        result,
        Err(StoreError::Directory(DirectoryError::UserNotFound(id))) if id == ghost
    ));
    assert!(store.tasks().await.expect("listing").is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn inactive_assignee_is_rejected(store: TestStore) {
    let owner = register(&store, "Owner").await;
    let leaver = register(&store, "Leaver").await;
    store
        .apply(Command::DeactivateUser(leaver))
        .await
        .expect("deactivate");

    let result = store
        .apply(Command::CreateTask(CreateTaskRequest::new(
            owner,
            details("Hand over").with_assignee(leaver),
        )))
        .await;

    assert!(matches!(result, Err(StoreError::InactiveUser(id)) if id == leaver));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn archived_project_rejects_new_tasks(store: TestStore) {
    let owner = register(&store, "Owner").await;
    let project = match store
        .apply(Command::CreateProject(CreateProjectRequest::new("Legacy", owner)))
        .await
    {
        Ok(CommandOutcome::Project(project)) => project,
        other => panic!("expected a project, got {other:?}"),
    };
    store
        .apply(Command::ArchiveProject(project.id()))
        .await
        .expect("archive");

    let result = store
        .apply(Command::CreateTask(CreateTaskRequest::new(
            owner,
            details("Late addition").with_project(project.id()),
        )))
        .await;

    assert!(matches!(
        result,
        Err(StoreError::Directory(DirectoryError::Domain(
            DirectoryDomainError::ProjectArchived(id)
        ))) if id == project.id()
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn revision_cannot_move_task_into_archived_project(store: TestStore) {
    let owner = register(&store, "Owner").await;
    let (task, _) = create_task(&store, owner, details("Movable")).await;
    let project = match store
        .apply(Command::CreateProject(CreateProjectRequest::new("Closed", owner)))
        .await
    {
        Ok(CommandOutcome::Project(project)) => project,
        other => panic!("expected a project, got {other:?}"),
    };
    store
        .apply(Command::ArchiveProject(project.id()))
        .await
        .expect("archive");

    let result = store
        .apply(Command::ReviseTask {
            task_id: task.id(),
            details: details("Movable").with_project(project.id()),
        })
        .await;

    assert!(result.is_err());
    assert_eq!(
        store.task(task.id()).await.expect("lookup").project_id(),
        None
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn allocation_needs_active_user(store: TestStore) {
    let owner = register(&store, "Owner").await;
    let (task, _) = create_task(&store, owner, details("Plan me")).await;
    let ghost = UserId::new();

    let result = store
        .apply(Command::PlanAllocation(PlanAllocationRequest::new(
            task.id(),
            ghost,
            monday_morning().date_naive(),
            30,
        )))
        .await;

    assert!(matches!(
        result,
        Err(StoreError::Directory(DirectoryError::UserNotFound(_)))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn routine_assignees_must_be_active(store: TestStore) {
    let owner = register(&store, "Owner").await;
    let leaver = register(&store, "Leaver").await;
    store
        .apply(Command::DeactivateUser(leaver))
        .await
        .expect("deactivate");

    let result = store
        .apply(Command::CreateRoutine {
            owner_id: owner,
            definition: RoutineDefinition::new(
                "Water plants",
                TimeBudget::minutes(5).expect("budget"),
                Recurrence::Daily,
            )
            .with_assignees([leaver]),
        })
        .await;

    assert!(matches!(result, Err(StoreError::InactiveUser(id)) if id == leaver));
}
