//! Unit tests for the pure focus timer.

use crate::focus::domain::{FocusError, FocusTimer, TimerState};
use crate::test_support::monday_morning;
use chrono::{DateTime, TimeDelta, Utc};
use rstest::rstest;

fn at(seconds: i64) -> DateTime<Utc> {
    monday_morning() + TimeDelta::seconds(seconds)
}

#[rstest]
fn start_resets_and_counts_from_zero() {
    let mut timer = FocusTimer::new();
    timer.start(at(0));
    timer.pause(at(100)).expect("pause");

    timer.start(at(200));

    assert_eq!(timer.elapsed(at(200)), 0);
    assert_eq!(timer.elapsed(at(230)), 30);
    assert_eq!(timer.state(), TimerState::Running);
}

#[rstest]
fn pause_and_resume_exclude_paused_time() {
    let mut timer = FocusTimer::new();
    timer.start(at(0));
    assert_eq!(timer.pause(at(120)), Ok(120));
    assert_eq!(timer.elapsed(at(500)), 120);

    timer.resume(at(500)).expect("resume");

    assert_eq!(timer.elapsed(at(560)), 180);
    assert_eq!(timer.stop(at(600)), Ok(220));
    assert_eq!(timer.state(), TimerState::Stopped);
}

#[rstest]
fn stop_while_paused_keeps_banked_time() {
    let mut timer = FocusTimer::new();
    timer.start(at(0));
    timer.pause(at(45)).expect("pause");

    assert_eq!(timer.stop(at(4_000)), Ok(45));
}

#[rstest]
fn clock_regression_counts_as_zero() {
    let mut timer = FocusTimer::new();
    timer.start(at(100));

    assert_eq!(timer.elapsed(at(40)), 0);
    assert_eq!(timer.pause(at(40)), Ok(0));
}

#[rstest]
#[case(TimerState::Idle, "pause")]
#[case(TimerState::Paused, "pause")]
fn pause_requires_running(#[case] state: TimerState, #[case] action: &'static str) {
    let mut timer = FocusTimer::new();
    if state == TimerState::Paused {
        timer.start(at(0));
        timer.pause(at(1)).expect("pause");
    }

    assert_eq!(
        timer.pause(at(2)),
        Err(FocusError::InvalidTimerState { state, action })
    );
}

#[rstest]
fn resume_requires_paused() {
    let mut timer = FocusTimer::new();
    timer.start(at(0));
    assert_eq!(
        timer.resume(at(1)),
        Err(FocusError::InvalidTimerState {
            state: TimerState::Running,
            action: "resume",
        })
    );
}

#[rstest]
fn stop_requires_started_timer() {
    let mut timer = FocusTimer::new();
    assert!(timer.stop(at(0)).is_err());
    timer.start(at(0));
    timer.stop(at(1)).expect("stop");
    assert!(timer.stop(at(2)).is_err());
}
