//! Dashboard aggregates over a populated store.

use super::helpers::{Harness, harness, start_focus};
use crate::test_helpers::{create_task, register};
use chrono::TimeDelta;
use chronos::{
    dashboard::{Quadrant, ReportPeriod},
    focus::domain::DebriefRequest,
    store::Command,
    task::domain::{GoalCategory, TaskDetails, TimeBudget},
};
use mockable::Clock;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn dashboard_reflects_buckets_hours_and_quadrants(
    harness: Harness,
) -> Result<(), eyre::Report> {
    let Harness { store, clock } = harness;
    let now = clock.utc();
    let ada = register(&store, "Ada").await?;
    let bob = register(&store, "Bob").await?;

    let overdue = create_task(
        &store,
        ada,
        TaskDetails::new("Renew TLS certificate", TimeBudget::minutes(45)?)?
            .with_due_at(now - TimeDelta::hours(2))
            .with_goal(GoalCategory::Operations),
    )
    .await?;
    let soon = create_task(
        &store,
        ada,
        TaskDetails::new("Draft quarterly plan", TimeBudget::hours(3)?)?
            .with_due_at(now + TimeDelta::hours(20))
            .with_goal(GoalCategory::Strategy),
    )
    .await?;
    let worked = create_task(
        &store,
        bob,
        TaskDetails::new("Pair on parser fix", TimeBudget::minutes(30)?)?
            .with_goal(GoalCategory::Growth),
    )
    .await?;

    let session = start_focus(&store, worked.id(), bob).await?;
    clock.advance(1_200);
    store
        .apply(Command::FinalizeFocus(DebriefRequest::new(
            session.allocation_id,
            "Parser handles nested lists",
        )))
        .await?;

    let snapshot = store.dashboard().await?;
    let buckets = snapshot.due_buckets(clock.utc());
    eyre::ensure!(
        buckets.overdue.iter().any(|task| task.id() == overdue.id()),
        "past due task must be overdue"
    );
    eyre::ensure!(
        buckets.approaching.iter().any(|task| task.id() == soon.id()),
        "task due within a day must be approaching"
    );
    eyre::ensure!(
        buckets.overdue.iter().all(|task| task.id() != worked.id()),
        "undated task is never overdue"
    );

    let today = ReportPeriod::day(now.date_naive());
    let planned = snapshot.planned_minutes(&today);
    eyre::ensure!(planned.misc == 75, "misc minutes: {}", planned.misc);
    eyre::ensure!(planned.daily == 0, "daily task is due tomorrow");
    eyre::ensure!(
        snapshot.actual_seconds_by_user(&today) == vec![(bob, 1_200)],
        "only bob tracked time today"
    );

    let quadrants = snapshot.quadrant_counts();
    eyre::ensure!(
        quadrants.get(Quadrant::of(GoalCategory::Strategy)) == 1,
        "strategic task counted"
    );
    eyre::ensure!(quadrants.unclassified == 0, "every task has a goal");

    let bobs_view = snapshot.for_user(bob);
    eyre::ensure!(bobs_view.tasks().len() == 1, "bob sees only his task");
    eyre::ensure!(bobs_view.status_counts().done == 1, "bob's task is done");
    Ok(())
}
