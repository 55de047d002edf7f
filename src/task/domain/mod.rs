//! Domain model for task lifecycle management.
//!
//! Tasks carry a nominal time budget, an optional goal category used by the
//! dashboard, and a forward-only lifecycle. Infrastructure concerns stay
//! outside of the domain boundary.

mod budget;
mod error;
mod goal;
mod ids;
mod status;
mod submission;
mod task;

pub use budget::{TimeBudget, TimeType, WORKDAY_HOURS};
pub use error::{ParseTaskValueError, TaskDomainError};
pub use goal::GoalCategory;
pub use ids::TaskId;
pub use status::TaskStatus;
pub use submission::{Rating, Submission};
pub use task::{Task, TaskDetails};
