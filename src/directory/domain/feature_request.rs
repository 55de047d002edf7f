//! Feature requests collected from team members.

use super::{
    DirectoryDomainError, FeatureRequestId, ParseDirectoryValueError, UserId, error::non_empty,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Triage status of a feature request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureRequestStatus {
    /// Awaiting triage.
    Open,
    /// Accepted onto the roadmap.
    Planned,
    /// Delivered.
    Shipped,
    /// Rejected.
    Declined,
}

impl FeatureRequestStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Planned => "planned",
            Self::Shipped => "shipped",
            Self::Declined => "declined",
        }
    }
}

impl TryFrom<&str> for FeatureRequestStatus {
    type Error = ParseDirectoryValueError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "planned" => Ok(Self::Planned),
            "shipped" => Ok(Self::Shipped),
            "declined" => Ok(Self::Declined),
            _ => Err(ParseDirectoryValueError {
                kind: "feature request status",
                value: value.to_owned(),
            }),
        }
    }
}

/// A request for new functionality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureRequest {
    id: FeatureRequestId,
    title: String,
    description: String,
    requester_id: UserId,
    status: FeatureRequestStatus,
    voters: BTreeSet<UserId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl FeatureRequest {
    /// Creates an open feature request.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryDomainError::EmptyTitle`] for a blank title.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        requester_id: UserId,
        clock: &impl Clock,
    ) -> Result<Self, DirectoryDomainError> {
        let timestamp = clock.utc();
        Ok(Self {
            id: FeatureRequestId::new(),
            title: non_empty(title, DirectoryDomainError::EmptyTitle)?,
            description: description.into(),
            requester_id,
            status: FeatureRequestStatus::Open,
            voters: BTreeSet::new(),
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Returns the request identifier.
    #[must_use]
    pub const fn id(&self) -> FeatureRequestId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the requesting user.
    #[must_use]
    pub const fn requester_id(&self) -> UserId {
        self.requester_id
    }

    /// Returns the triage status.
    #[must_use]
    pub const fn status(&self) -> FeatureRequestStatus {
        self.status
    }

    /// Returns the number of votes.
    #[must_use]
    pub fn votes(&self) -> usize {
        self.voters.len()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Records a vote.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryDomainError::AlreadyVoted`] when the user voted
    /// before.
    pub fn vote(&mut self, user_id: UserId, clock: &impl Clock) -> Result<(), DirectoryDomainError> {
        if !self.voters.insert(user_id) {
            return Err(DirectoryDomainError::AlreadyVoted {
                request_id: self.id,
                user_id,
            });
        }
        self.updated_at = clock.utc();
        Ok(())
    }

    /// Updates the triage status.
    pub fn set_status(&mut self, status: FeatureRequestStatus, clock: &impl Clock) {
        self.status = status;
        self.updated_at = clock.utc();
    }
}
