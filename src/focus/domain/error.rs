//! Error types for focus timers and debriefs.

use super::TimerState;
use thiserror::Error;

/// Errors raised by the focus timer and debrief validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FocusError {
    /// The timer cannot perform the requested action in its current state.
    #[error("cannot {action} a timer that is {state}")]
    InvalidTimerState {
        /// Current timer state.
        state: TimerState,
        /// Attempted action.
        action: &'static str,
    },

    /// The reflection is shorter than the minimum length.
    #[error("reflection must be at least {min_chars} characters")]
    ReflectionTooShort {
        /// Minimum number of characters.
        min_chars: usize,
    },

    /// The attempt overran its budget without a sufficient explanation.
    #[error("overrun reason of at least {min_chars} characters is required")]
    OverrunReasonRequired {
        /// Minimum number of characters.
        min_chars: usize,
    },

    /// The rating is outside 1 to 5.
    #[error("rating must be between 1 and 5, got {0}")]
    InvalidRating(u8),
}
