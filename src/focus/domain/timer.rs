//! Pure stopwatch tracking running (non-paused) time.

use super::FocusError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a [`FocusTimer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerState {
    /// Never started.
    Idle,
    /// Counting time.
    Running,
    /// Holding banked time.
    Paused,
    /// Finished; the elapsed value is frozen.
    Stopped,
}

impl TimerState {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Stopped => "stopped",
        }
    }
}

impl fmt::Display for TimerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Clock-driven stopwatch.
///
/// The timer never reads a clock itself: every operation receives `now`.
/// Spans where `now` precedes the last resume are counted as zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusTimer {
    state: TimerState,
    banked_seconds: u64,
    running_since: Option<DateTime<Utc>>,
}

impl Default for FocusTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl FocusTimer {
    /// Creates an idle timer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: TimerState::Idle,
            banked_seconds: 0,
            running_since: None,
        }
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> TimerState {
        self.state
    }

    /// Resets elapsed time to zero and starts counting.
    pub const fn start(&mut self, now: DateTime<Utc>) {
        self.state = TimerState::Running;
        self.banked_seconds = 0;
        self.running_since = Some(now);
    }

    /// Banks the running span and stops counting.
    ///
    /// # Errors
    ///
    /// Returns [`FocusError::InvalidTimerState`] unless the timer is running.
    pub fn pause(&mut self, now: DateTime<Utc>) -> Result<u64, FocusError> {
        if self.state != TimerState::Running {
            return Err(self.invalid("pause"));
        }
        self.bank(now);
        self.state = TimerState::Paused;
        Ok(self.banked_seconds)
    }

    /// Continues counting without resetting banked time.
    ///
    /// # Errors
    ///
    /// Returns [`FocusError::InvalidTimerState`] unless the timer is paused.
    pub fn resume(&mut self, now: DateTime<Utc>) -> Result<(), FocusError> {
        if self.state != TimerState::Paused {
            return Err(self.invalid("resume"));
        }
        self.state = TimerState::Running;
        self.running_since = Some(now);
        Ok(())
    }

    /// Stops the timer and returns the total running seconds.
    ///
    /// # Errors
    ///
    /// Returns [`FocusError::InvalidTimerState`] when the timer was never
    /// started or is already stopped.
    pub fn stop(&mut self, now: DateTime<Utc>) -> Result<u64, FocusError> {
        match self.state {
            TimerState::Running => self.bank(now),
            TimerState::Paused => {}
            TimerState::Idle | TimerState::Stopped => return Err(self.invalid("stop")),
        }
        self.state = TimerState::Stopped;
        Ok(self.banked_seconds)
    }

    /// Returns the running seconds as of `now`.
    #[must_use]
    pub fn elapsed(&self, now: DateTime<Utc>) -> u64 {
        match (self.state, self.running_since) {
            (TimerState::Running, Some(since)) => {
                self.banked_seconds.saturating_add(span_seconds(since, now))
            }
            _ => self.banked_seconds,
        }
    }

    fn bank(&mut self, now: DateTime<Utc>) {
        if let Some(since) = self.running_since.take() {
            self.banked_seconds = self.banked_seconds.saturating_add(span_seconds(since, now));
        }
    }

    const fn invalid(&self, action: &'static str) -> FocusError {
        FocusError::InvalidTimerState {
            state: self.state,
            action,
        }
    }
}

fn span_seconds(since: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    u64::try_from(now.signed_duration_since(since).num_seconds()).unwrap_or(0)
}
