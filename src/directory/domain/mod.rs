//! Domain model for the team directory and admin console.
//!
//! Directory records are flat: beyond field validation their only
//! invariants are identifier references checked by the store.

mod announcement;
mod error;
mod feature_request;
mod ids;
mod project;
mod task_template;
mod user;

pub use announcement::Announcement;
pub use error::{DirectoryDomainError, ParseDirectoryValueError};
pub use feature_request::{FeatureRequest, FeatureRequestStatus};
pub use ids::{AnnouncementId, FeatureRequestId, ProjectId, TaskTemplateId, UserId};
pub use project::Project;
pub use task_template::TaskTemplate;
pub use user::{User, UserRole};
