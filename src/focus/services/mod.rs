//! Focus session orchestration.

mod session;

pub use session::{
    DEFAULT_MAX_RUNNING_PER_USER, FocusOutcome, FocusSessionError, FocusSessionResult,
    FocusSessionService, FocusStatus,
};
