//! Focus session flows through the command interface.

use super::helpers::{Harness, harness, start_focus};
use crate::test_helpers::{create_task, register, store_with};
use chronos::{
    allocation::{domain::AllocationStatus, services::PlanAllocationRequest},
    classifier::adapters::KeywordClassifier,
    config::ChronosConfig,
    focus::{
        domain::{DebriefRequest, FocusError},
        services::FocusSessionError,
    },
    store::{Command, CommandOutcome, StoreError},
    task::domain::{TaskDetails, TaskStatus, TimeBudget},
};
use mockable::Clock;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn overrun_session_records_reason_in_knowledge(harness: Harness) -> Result<(), eyre::Report> {
    let Harness { store, clock } = harness;
    let owner = register(&store, "Ada").await?;
    let task = create_task(
        &store,
        owner,
        TaskDetails::new("Write deployment runbook", TimeBudget::minutes(5)?)?,
    )
    .await?;
    let status = start_focus(&store, task.id(), owner).await?;

    clock.advance(200);
    store.apply(Command::PauseFocus(status.allocation_id)).await?;
    clock.advance(1_000);
    store
        .apply(Command::ResumeFocus(status.allocation_id))
        .await?;
    clock.advance(150);
    let running = store.focus_status(status.allocation_id)?;
    eyre::ensure!(running.elapsed_seconds == 350, "paused time must not count");
    eyre::ensure!(running.overrun, "350s exceeds a five minute budget");

    let rejected = store
        .apply(Command::FinalizeFocus(DebriefRequest::new(
            status.allocation_id,
            "Runbook covers rollback now",
        )))
        .await;
    eyre::ensure!(
        matches!(
            rejected,
            Err(StoreError::Focus(FocusSessionError::Focus(
                FocusError::OverrunReasonRequired { .. }
            )))
        ),
        "expected missing overrun reason, got {rejected:?}"
    );

    let outcome = store
        .apply(Command::FinalizeFocus(
            DebriefRequest::new(status.allocation_id, "Runbook covers rollback now")
                .with_overrun_reason("Staging credentials had expired")
                .save_to_knowledge(true),
        ))
        .await?;
    let CommandOutcome::FocusCompleted(completed) = outcome else {
        return Err(eyre::eyre!("expected a completed debrief, got {outcome:?}"));
    };

    eyre::ensure!(completed.task.status() == TaskStatus::Done, "task must be done");
    eyre::ensure!(
        completed.allocation.status() == AllocationStatus::Overrun,
        "allocation must be overrun"
    );
    let entry = completed
        .knowledge_entry
        .clone()
        .ok_or_else(|| eyre::eyre!("expected a knowledge entry"))?;
    eyre::ensure!(
        entry.overrun_reason() == Some("Staging credentials had expired"),
        "overrun reason must be kept"
    );
    eyre::ensure!(
        entry.body().contains("Time spent: 0h 05m 50s"),
        "body must report tracked time"
    );
    let stored = store.knowledge_entry(entry.id()).await?;
    eyre::ensure!(stored == entry, "entry must be retrievable");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn strict_config_allows_one_running_session() -> Result<(), eyre::Report> {
    let (store, _clock) = store_with(ChronosConfig::strict(), KeywordClassifier::new());
    let owner = register(&store, "Lin").await?;
    let first = create_task(
        &store,
        owner,
        TaskDetails::new("Review pull requests", TimeBudget::hours(1)?)?,
    )
    .await?;
    let second = create_task(
        &store,
        owner,
        TaskDetails::new("Answer support mail", TimeBudget::hours(1)?)?,
    )
    .await?;
    start_focus(&store, first.id(), owner).await?;

    let result = store
        .apply(Command::StartFocus {
            task_id: second.id(),
            user_id: owner,
        })
        .await;

    eyre::ensure!(
        matches!(
            result,
            Err(StoreError::Focus(FocusSessionError::TooManyRunning { limit: 1, .. }))
        ),
        "expected the running limit, got {result:?}"
    );
    eyre::ensure!(
        store.task(second.id()).await?.status() == TaskStatus::Todo,
        "rejected start must not move the task"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn planned_slot_runs_and_cancels_within_grace(harness: Harness) -> Result<(), eyre::Report> {
    let Harness { store, clock } = harness;
    let owner = register(&store, "Sam").await?;
    let task = create_task(
        &store,
        owner,
        TaskDetails::new("Sketch onboarding flow", TimeBudget::hours(2)?)?,
    )
    .await?;
    let planned = store
        .apply(Command::PlanAllocation(PlanAllocationRequest::new(
            task.id(),
            owner,
            clock.utc().date_naive(),
            120,
        )))
        .await?;
    let CommandOutcome::Allocation(slot) = planned else {
        return Err(eyre::eyre!("expected an allocation, got {planned:?}"));
    };

    store.apply(Command::StartPlannedFocus(slot.id())).await?;
    clock.advance(60);
    store.apply(Command::CancelFocus(slot.id())).await?;

    eyre::ensure!(
        store.allocations_for_task(task.id()).await?.is_empty(),
        "cancelled slot must be removed"
    );
    eyre::ensure!(
        store.task(task.id()).await?.status() == TaskStatus::Doing,
        "task stays in progress after a cancelled session"
    );
    Ok(())
}
