//! When steps for focus debrief BDD scenarios.

use super::world::{FocusWorld, run_async};
use chronos::{
    focus::domain::DebriefRequest,
    store::{Command, CommandOutcome},
};
use eyre::WrapErr;
use rstest_bdd_macros::when;

#[when("the user starts focusing on the task")]
fn start_focusing(world: &mut FocusWorld) -> Result<(), eyre::Report> {
    let command = Command::StartFocus {
        task_id: world.task()?.id(),
        user_id: world.user_id()?,
    };
    let outcome = run_async(world.store.apply(command)).wrap_err("start focus session")?;
    let CommandOutcome::Focus(status) = outcome else {
        return Err(eyre::eyre!("expected focus status, got {outcome:?}"));
    };
    world.session = Some(status);
    Ok(())
}

#[when("{seconds:i64} seconds pass")]
fn seconds_pass(world: &mut FocusWorld, seconds: i64) {
    world.clock.advance(seconds);
}

#[when("the user pauses the session")]
fn pause_session(world: &mut FocusWorld) -> Result<(), eyre::Report> {
    let allocation_id = world.session()?.allocation_id;
    run_async(world.store.apply(Command::PauseFocus(allocation_id)))
        .wrap_err("pause focus session")?;
    Ok(())
}

#[when("the user resumes the session")]
fn resume_session(world: &mut FocusWorld) -> Result<(), eyre::Report> {
    let allocation_id = world.session()?.allocation_id;
    run_async(world.store.apply(Command::ResumeFocus(allocation_id)))
        .wrap_err("resume focus session")?;
    Ok(())
}

#[when("the user cancels the session")]
fn cancel_session(world: &mut FocusWorld) -> Result<(), eyre::Report> {
    let allocation_id = world.session()?.allocation_id;
    run_async(world.store.apply(Command::CancelFocus(allocation_id)))
        .wrap_err("cancel focus session")?;
    Ok(())
}

#[when(r#"the user finishes with reflection "{reflection}""#)]
fn finish_with_reflection(world: &mut FocusWorld, reflection: String) -> Result<(), eyre::Report> {
    let debrief = DebriefRequest::new(world.session()?.allocation_id, reflection)
        .save_to_knowledge(true);
    finalize(world, debrief);
    Ok(())
}

#[when(r#"the user explains the overrun with "{reason}" and reflection "{reflection}""#)]
fn finish_with_overrun_reason(
    world: &mut FocusWorld,
    reason: String,
    reflection: String,
) -> Result<(), eyre::Report> {
    let debrief = DebriefRequest::new(world.session()?.allocation_id, reflection)
        .with_overrun_reason(reason)
        .save_to_knowledge(true);
    finalize(world, debrief);
    Ok(())
}

fn finalize(world: &mut FocusWorld, debrief: DebriefRequest) {
    let result = run_async(world.store.apply(Command::FinalizeFocus(debrief)));
    world.last_debrief = Some(result);
}
