//! End-to-end command flows through the store.

use std::sync::Arc;

use super::{create_task, details, register};
use crate::allocation::{
    domain::{AllocationId, AllocationStatus},
    services::PlanAllocationRequest,
};
use crate::classifier::{adapters::{KeywordClassifier, UnavailableClassifier}, ports::TagClassifier};
use crate::config::ChronosConfig;
use crate::directory::{domain::UserId, services::CreateTaskTemplateRequest};
use crate::focus::{domain::DebriefRequest, services::FocusSessionError};
use crate::routine::domain::{AssignmentStrategy, Recurrence, RoutineDefinition};
use crate::store::{ChronosStore, Command, CommandOutcome, StoreError, TemplateInstance};
use crate::task::{
    domain::{GoalCategory, TaskId, TaskStatus, TimeBudget},
    services::TaskLifecycleError,
};
use crate::test_support::{ManualClock, monday_morning};
use chrono::{Days, TimeDelta};
use rstest::rstest;

fn store_with<X: TagClassifier>(classifier: X) -> (ChronosStore<X, ManualClock>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::at(monday_morning()));
    let store = ChronosStore::new(
        ChronosConfig::default(),
        Arc::new(classifier),
        Arc::clone(&clock),
    );
    (store, clock)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn risky_task_carries_hint() {
    let (store, _) = store_with(KeywordClassifier::new());
    let owner = register(&store, "Owner").await;

    let (task, risk_hint) = create_task(
        &store,
        owner,
        details("Migrate billing database").with_description("Needs a maintenance window"),
    )
    .await;

    assert_eq!(task.status(), TaskStatus::Todo);
    assert!(risk_hint.is_some_and(|hint| hint.contains("rollback")));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unavailable_classifier_does_not_block_creation() {
    let (store, _) = store_with(UnavailableClassifier);
    let owner = register(&store, "Owner").await;

    let (task, risk_hint) = create_task(&store, owner, details("Migrate database")).await;

    assert!(risk_hint.is_none());
    assert_eq!(store.tasks().await.expect("listing"), vec![task]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn template_instance_takes_defaults_and_overrides() {
    let (store, _) = store_with(KeywordClassifier::new());
    let owner = register(&store, "Owner").await;
    let assignee = register(&store, "Helper").await;
    let template = match store
        .apply(Command::CreateTaskTemplate(
            CreateTaskTemplateRequest::new(
                "invoice-run",
                "Send monthly invoices",
                TimeBudget::hours(2).expect("budget"),
            )
            .with_goal(GoalCategory::Growth)
            .with_tags(["finance".to_owned()]),
        ))
        .await
    {
        Ok(CommandOutcome::TaskTemplate(template)) => template,
        other => panic!("expected a template, got {other:?}"),
    };
    let due_at = monday_morning() + TimeDelta::days(3);

    let outcome = store
        .apply(Command::InstantiateTemplate {
            template_id: template.id(),
            owner_id: owner,
            instance: TemplateInstance {
                due_at: Some(due_at),
                assignee_id: Some(assignee),
                ..TemplateInstance::default()
            },
        })
        .await
        .expect("instantiate");

    let CommandOutcome::TaskCreated { task, .. } = outcome else {
        panic!("expected a created task, got {outcome:?}");
    };
    assert_eq!(task.title(), "Send monthly invoices");
    assert_eq!(task.budget(), TimeBudget::hours(2).expect("budget"));
    assert_eq!(task.goal(), Some(GoalCategory::Growth));
    assert_eq!(task.tags(), &["finance".to_owned()]);
    assert_eq!(task.due_at(), Some(due_at));
    assert_eq!(task.assignee_id(), Some(assignee));
    assert_eq!(task.responsible_id(), assignee);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn focus_debrief_flow_links_knowledge() {
    let (store, clock) = store_with(KeywordClassifier::new());
    let owner = register(&store, "Owner").await;
    let (task, _) = create_task(&store, owner, details("Fix login crash")).await;

    let started = store
        .apply(Command::StartFocus {
            task_id: task.id(),
            user_id: owner,
        })
        .await
        .expect("start focus");
    let CommandOutcome::Focus(status) = started else {
        panic!("expected focus status, got {started:?}");
    };
    clock.advance(900);
    let finished = store
        .apply(Command::FinalizeFocus(
            DebriefRequest::new(status.allocation_id, "Null check was missing in the handler")
                .with_rating(5)
                .save_to_knowledge(true),
        ))
        .await
        .expect("debrief");

    let CommandOutcome::FocusCompleted(outcome) = finished else {
        panic!("expected a completed debrief, got {finished:?}");
    };
    assert_eq!(outcome.task.status(), TaskStatus::Done);
    assert!(outcome.task.tags().contains(&"bugfix".to_owned()));
    assert_eq!(outcome.allocation.accumulated_seconds(), 900);
    let entry = outcome.knowledge_entry.clone().expect("entry");
    assert_eq!(
        store.search_knowledge("bugfix").await.expect("search"),
        vec![entry]
    );

    let delete = store.apply(Command::DeleteTask(task.id())).await;
    assert!(matches!(
        delete,
        Err(StoreError::Task(TaskLifecycleError::LinkedToKnowledge(id))) if id == task.id()
    ));
    store
        .apply(Command::ArchiveTask(task.id()))
        .await
        .expect("archive");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sweep_marks_stale_plans_missed() {
    let (store, _) = store_with(KeywordClassifier::new());
    let owner = register(&store, "Owner").await;
    let (task, _) = create_task(&store, owner, details("Weekly sync notes")).await;
    let today = monday_morning().date_naive();
    let yesterday = today.checked_sub_days(Days::new(1)).expect("valid date");
    for date in [yesterday, today] {
        store
            .apply(Command::PlanAllocation(PlanAllocationRequest::new(
                task.id(),
                owner,
                date,
                30,
            )))
            .await
            .expect("plan");
    }

    let outcome = store
        .apply(Command::SweepMissed { today })
        .await
        .expect("sweep");

    let CommandOutcome::AllocationsMissed(missed) = outcome else {
        panic!("expected missed allocations, got {outcome:?}");
    };
    assert_eq!(missed.len(), 1);
    assert!(missed.iter().all(|allocation| allocation.date() == yesterday
        && allocation.status() == AllocationStatus::Missed));
    assert_eq!(
        store
            .allocations_for_user_on(owner, today)
            .await
            .expect("lookup")
            .iter()
            .map(|allocation| allocation.status())
            .collect::<Vec<_>>(),
        vec![AllocationStatus::Planned]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deployed_routine_tasks_reach_dashboard() {
    let (store, _) = store_with(KeywordClassifier::new());
    let owner = register(&store, "Owner").await;
    let helper = register(&store, "Helper").await;
    let routine = match store
        .apply(Command::CreateRoutine {
            owner_id: owner,
            definition: RoutineDefinition::new(
                "Stand-up notes",
                TimeBudget::minutes(15).expect("budget"),
                Recurrence::Workday,
            )
            .with_strategy(AssignmentStrategy::Static)
            .with_assignees([owner, helper]),
        })
        .await
    {
        Ok(CommandOutcome::Routine(routine)) => routine,
        other => panic!("expected a routine, got {other:?}"),
    };
    store
        .apply(Command::ActivateRoutine(routine.id()))
        .await
        .expect("activate");

    store
        .apply(Command::DeployRoutine {
            routine_id: routine.id(),
            on_date: monday_morning().date_naive(),
        })
        .await
        .expect("deploy");

    let snapshot = store.dashboard().await.expect("snapshot");
    let buckets = snapshot.due_buckets(monday_morning());
    assert_eq!(buckets.due_today.len(), 2);
    assert_eq!(buckets.approaching.len(), 2);
    assert_eq!(snapshot.for_user(helper).tasks().len(), 1);
    assert_eq!(
        store
            .routines_due_on(monday_morning().date_naive())
            .await
            .expect("lookup")
            .len(),
        1
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cloned_store_shares_state() {
    let (store, _) = store_with(KeywordClassifier::new());
    let handle = store.clone();

    let owner = register(&handle, "Owner").await;
    let (task, _) = create_task(&handle, owner, details("Review rota")).await;

    assert_eq!(store.user(owner).await.expect("lookup").id(), owner);
    assert_eq!(store.task(task.id()).await.expect("lookup"), task);
}

async fn start_focus<X: TagClassifier>(
    store: &ChronosStore<X, ManualClock>,
    task_id: TaskId,
    user_id: UserId,
) -> AllocationId {
    match store.apply(Command::StartFocus { task_id, user_id }).await {
        Ok(CommandOutcome::Focus(status)) => status.allocation_id,
        other => panic!("expected focus status, got {other:?}"),
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn removing_live_allocation_within_grace_closes_session() {
    let (store, clock) = store_with(KeywordClassifier::new());
    let owner = register(&store, "Owner").await;
    let (task, _) = create_task(&store, owner, details("Started by mistake")).await;
    let allocation_id = start_focus(&store, task.id(), owner).await;
    clock.advance(45);

    let removed = store
        .apply(Command::RemoveAllocation(allocation_id))
        .await
        .expect("remove");

    assert!(matches!(removed, CommandOutcome::AllocationRemoved(id) if id == allocation_id));
    assert!(matches!(
        store.focus_status(allocation_id),
        Err(StoreError::Focus(FocusSessionError::SessionNotFound(id))) if id == allocation_id
    ));
    assert!(store.allocations_for_task(task.id()).await.expect("lookup").is_empty());
    let restarted = start_focus(&store, task.id(), owner).await;
    assert_ne!(restarted, allocation_id);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn removing_live_allocation_past_grace_requires_debrief() {
    let (store, clock) = store_with(KeywordClassifier::new());
    let owner = register(&store, "Owner").await;
    let (task, _) = create_task(&store, owner, details("Long running fix")).await;
    let allocation_id = start_focus(&store, task.id(), owner).await;
    clock.advance(600);

    let removed = store.apply(Command::RemoveAllocation(allocation_id)).await;

    assert!(matches!(
        removed,
        Err(StoreError::Focus(FocusSessionError::DebriefRequired { elapsed_seconds: 600, .. }))
    ));
    let allocation = store.allocation(allocation_id).await.expect("lookup");
    assert_eq!(allocation.status(), AllocationStatus::Running);
    assert_eq!(
        store.focus_status(allocation_id).expect("status").elapsed_seconds,
        600
    );
}
