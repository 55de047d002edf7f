//! Focus timer and debrief domain types.

mod debrief;
mod error;
mod timer;

pub use debrief::{DEFAULT_MIN_TEXT_CHARS, DebriefRequest};
pub use error::FocusError;
pub use timer::{FocusTimer, TimerState};
