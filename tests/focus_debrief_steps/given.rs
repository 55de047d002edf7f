//! Given steps for focus debrief BDD scenarios.

use std::sync::atomic::Ordering;

use super::world::{FocusWorld, run_async};
use crate::test_helpers::{create_task, register};
use chronos::task::domain::{TaskDetails, TimeBudget};
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given(r#"a registered user "{name}""#)]
fn registered_user(world: &mut FocusWorld, name: String) -> Result<(), eyre::Report> {
    let user_id = run_async(register(&world.store, &name)).wrap_err("register scenario user")?;
    world.user_id = Some(user_id);
    Ok(())
}

#[given(r#"a task "{title}" with a budget of {minutes:u32} minutes"#)]
fn task_with_budget(
    world: &mut FocusWorld,
    title: String,
    minutes: u32,
) -> Result<(), eyre::Report> {
    let owner_id = world.user_id()?;
    let details = TaskDetails::new(title, TimeBudget::minutes(minutes)?)?;
    let task = run_async(create_task(&world.store, owner_id, details))
        .wrap_err("create scenario task")?;
    world.task = Some(task);
    Ok(())
}

#[given("the classifier is offline")]
fn classifier_offline(world: &mut FocusWorld) {
    world.classifier_offline.store(true, Ordering::SeqCst);
}
