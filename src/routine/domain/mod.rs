//! Domain model for routine templates.
//!
//! Routines are deployed on demand; the recurrence rule only answers
//! whether a routine is due on a given date.

mod error;
mod ids;
mod recurrence;
mod routine;
mod status;

pub use error::{ParseRoutineValueError, RoutineDomainError};
pub use ids::RoutineId;
pub use recurrence::{AssignmentStrategy, Recurrence};
pub use routine::{RoutineDefinition, RoutineTemplate};
pub use status::RoutineStatus;
