//! Then steps for focus debrief BDD scenarios.

use super::world::{FocusWorld, run_async};
use chronos::{
    allocation::domain::AllocationStatus,
    focus::{domain::FocusError, services::FocusSessionError},
    store::StoreError,
    task::domain::TaskStatus,
};
use rstest_bdd_macros::then;

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &FocusWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let task = run_async(world.store.task(world.task()?.id()))?;
    eyre::ensure!(
        task.status() == expected,
        "expected task status {expected}, found {}",
        task.status()
    );
    Ok(())
}

#[then(r#"the allocation status is "{status}""#)]
fn allocation_status_is(world: &FocusWorld, status: String) -> Result<(), eyre::Report> {
    let expected = AllocationStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let allocation = run_async(world.store.allocation(world.session()?.allocation_id))?;
    eyre::ensure!(
        allocation.status() == expected,
        "expected allocation status {expected}, found {}",
        allocation.status()
    );
    Ok(())
}

#[then("the allocation tracked {seconds:u64} seconds")]
fn allocation_tracked(world: &FocusWorld, seconds: u64) -> Result<(), eyre::Report> {
    let allocation = run_async(world.store.allocation(world.session()?.allocation_id))?;
    eyre::ensure!(
        allocation.accumulated_seconds() == seconds,
        "expected {seconds}s tracked, found {}s",
        allocation.accumulated_seconds()
    );
    Ok(())
}

#[then("the debrief is rejected for a missing overrun reason")]
fn debrief_rejected_for_overrun(world: &FocusWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_debrief
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing debrief result"))?;
    eyre::ensure!(
        matches!(
            result,
            Err(StoreError::Focus(FocusSessionError::Focus(
                FocusError::OverrunReasonRequired { .. }
            )))
        ),
        "expected a missing overrun reason, got {result:?}"
    );
    Ok(())
}

#[then(r#"the knowledge base has an entry tagged "{tag}""#)]
fn knowledge_entry_tagged(world: &FocusWorld, tag: String) -> Result<(), eyre::Report> {
    let entries = run_async(world.store.search_knowledge(&tag))?;
    let task_id = world.task()?.id();
    eyre::ensure!(
        entries.iter().any(|entry| entry.task_id() == task_id),
        "no knowledge entry for the task is tagged {tag}"
    );
    Ok(())
}

#[then("the knowledge base has an entry with no tags")]
fn knowledge_entry_untagged(world: &FocusWorld) -> Result<(), eyre::Report> {
    let entries = run_async(world.store.knowledge_entries())?;
    let [entry] = entries.as_slice() else {
        return Err(eyre::eyre!("expected one knowledge entry, found {}", entries.len()));
    };
    eyre::ensure!(entry.tags().is_empty(), "unexpected tags {:?}", entry.tags());
    Ok(())
}

#[then("the knowledge base is empty")]
fn knowledge_base_empty(world: &FocusWorld) -> Result<(), eyre::Report> {
    let entries = run_async(world.store.knowledge_entries())?;
    eyre::ensure!(entries.is_empty(), "expected no entries, found {}", entries.len());
    Ok(())
}

#[then("the task has no allocations")]
fn task_has_no_allocations(world: &FocusWorld) -> Result<(), eyre::Report> {
    let allocations = run_async(world.store.allocations_for_task(world.task()?.id()))?;
    eyre::ensure!(
        allocations.is_empty(),
        "expected no allocations, found {}",
        allocations.len()
    );
    Ok(())
}
