//! Error types for directory record validation.

use super::{FeatureRequestId, ProjectId, UserId};
use thiserror::Error;

/// Errors returned while constructing or mutating directory records.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DirectoryDomainError {
    /// A required name is empty after trimming.
    #[error("name must not be empty")]
    EmptyName,

    /// A required title is empty after trimming.
    #[error("title must not be empty")]
    EmptyTitle,

    /// The email address is malformed.
    #[error("invalid email address '{0}'")]
    InvalidEmail(String),

    /// The project has been archived and no longer accepts changes.
    #[error("project {0} is archived")]
    ProjectArchived(ProjectId),

    /// The user has already voted for the feature request.
    #[error("user {user_id} already voted for feature request {request_id}")]
    AlreadyVoted {
        /// Feature request identifier.
        request_id: FeatureRequestId,
        /// Voting user identifier.
        user_id: UserId,
    },
}

/// Error returned while parsing directory enums from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {kind} value: {value}")]
pub struct ParseDirectoryValueError {
    /// Enum being parsed.
    pub kind: &'static str,
    /// Rejected raw value.
    pub value: String,
}

/// Trims `value` and rejects it when empty.
pub(crate) fn non_empty(
    value: impl Into<String>,
    error: DirectoryDomainError,
) -> Result<String, DirectoryDomainError> {
    let raw = value.into();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(error);
    }
    Ok(trimmed.to_owned())
}
