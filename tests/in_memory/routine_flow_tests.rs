//! Routine activation and deployment through the command interface.

use super::helpers::{Harness, TestStore, harness};
use crate::test_helpers::register;
use chrono::{NaiveDate, Weekday};
use chronos::{
    directory::domain::UserId,
    routine::{
        domain::{AssignmentStrategy, Recurrence, RoutineDefinition, RoutineId, RoutineStatus},
        services::Deployment,
    },
    store::{Command, CommandOutcome, StoreError},
    task::domain::{TaskStatus, TimeBudget},
};
use rstest::rstest;

async fn active_routine(
    store: &TestStore,
    owner_id: UserId,
    definition: RoutineDefinition,
) -> Result<RoutineId, eyre::Report> {
    let created = store
        .apply(Command::CreateRoutine {
            owner_id,
            definition,
        })
        .await?;
    let CommandOutcome::Routine(routine) = created else {
        return Err(eyre::eyre!("expected a routine, got {created:?}"));
    };
    store.apply(Command::ActivateRoutine(routine.id())).await?;
    Ok(routine.id())
}

async fn deploy(
    store: &TestStore,
    routine_id: RoutineId,
    on_date: NaiveDate,
) -> Result<Deployment, eyre::Report> {
    match store
        .apply(Command::DeployRoutine {
            routine_id,
            on_date,
        })
        .await?
    {
        CommandOutcome::Deployment(deployment) => Ok(deployment),
        other => Err(eyre::eyre!("expected a deployment, got {other:?}")),
    }
}

fn date(year: i32, month: u32, day: u32) -> Result<NaiveDate, eyre::Report> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| eyre::eyre!("invalid date"))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn weekly_rotation_hands_standup_notes_around(harness: Harness) -> Result<(), eyre::Report> {
    let Harness { store, .. } = harness;
    let owner = register(&store, "Grace").await?;
    let first = register(&store, "Linus").await?;
    let second = register(&store, "Barbara").await?;
    let routine_id = active_routine(
        &store,
        owner,
        RoutineDefinition::new(
            "Write standup notes",
            TimeBudget::minutes(15)?,
            Recurrence::Weekly {
                weekday: Weekday::Mon,
            },
        )
        .with_strategy(AssignmentStrategy::Rotating)
        .with_assignees([first, second]),
    )
    .await?;

    let mondays = [date(2025, 3, 10)?, date(2025, 3, 17)?, date(2025, 3, 24)?];
    eyre::ensure!(
        store.routines_due_on(date(2025, 3, 10)?).await?.len() == 1,
        "routine fires on Mondays"
    );
    eyre::ensure!(
        store.routines_due_on(date(2025, 3, 11)?).await?.is_empty(),
        "routine does not fire on Tuesdays"
    );

    let mut assignees = Vec::new();
    for monday in mondays {
        let deployment = deploy(&store, routine_id, monday).await?;
        let [task] = deployment.tasks.as_slice() else {
            return Err(eyre::eyre!("rotating deployment spawns one task"));
        };
        eyre::ensure!(task.routine_id() == Some(routine_id), "task links its routine");
        eyre::ensure!(task.status() == TaskStatus::Todo, "spawned tasks start in todo");
        assignees.push(task.responsible_id());
    }

    eyre::ensure!(
        assignees == vec![first, second, first],
        "assignees must rotate, got {assignees:?}"
    );
    eyre::ensure!(
        store.tasks_involving(second).await?.len() == 1,
        "second assignee owns one deployment"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn frozen_routine_stops_deploying_until_thawed(harness: Harness) -> Result<(), eyre::Report> {
    let Harness { store, .. } = harness;
    let owner = register(&store, "Grace").await?;
    let routine_id = active_routine(
        &store,
        owner,
        RoutineDefinition::new(
            "Rotate on-call pager",
            TimeBudget::minutes(10)?,
            Recurrence::Daily,
        )
        .with_assignees([owner]),
    )
    .await?;
    let monday = date(2025, 3, 10)?;

    store
        .apply(Command::ToggleRoutineFrozen(routine_id))
        .await?;
    eyre::ensure!(
        store.routine(routine_id).await?.status() == RoutineStatus::Frozen,
        "toggle freezes an active routine"
    );
    eyre::ensure!(
        store.routines_due_on(monday).await?.is_empty(),
        "frozen routines are never due"
    );
    let frozen = store
        .apply(Command::DeployRoutine {
            routine_id,
            on_date: monday,
        })
        .await;
    eyre::ensure!(
        matches!(frozen, Err(StoreError::Routine(_))),
        "frozen routine must not deploy, got {frozen:?}"
    );

    store
        .apply(Command::ToggleRoutineFrozen(routine_id))
        .await?;
    let deployment = deploy(&store, routine_id, monday).await?;
    eyre::ensure!(deployment.tasks.len() == 1, "thawed routine deploys again");
    eyre::ensure!(
        store.tasks().await?.len() == 1,
        "failed deployment must not spawn tasks"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deactivated_assignee_blocks_routine_creation(harness: Harness) -> Result<(), eyre::Report> {
    let Harness { store, .. } = harness;
    let owner = register(&store, "Grace").await?;
    let leaver = register(&store, "Dennis").await?;
    store.apply(Command::DeactivateUser(leaver)).await?;

    let result = store
        .apply(Command::CreateRoutine {
            owner_id: owner,
            definition: RoutineDefinition::new(
                "Archive old tickets",
                TimeBudget::minutes(20)?,
                Recurrence::Workday,
            )
            .with_assignees([owner, leaver]),
        })
        .await;

    eyre::ensure!(
        matches!(result, Err(StoreError::InactiveUser(id)) if id == leaver),
        "expected inactive assignee, got {result:?}"
    );
    Ok(())
}
