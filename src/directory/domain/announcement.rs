//! Team-wide announcements posted from the admin console.

use super::{AnnouncementId, DirectoryDomainError, UserId, error::non_empty};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// An announcement shown to every team member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    id: AnnouncementId,
    title: String,
    body: String,
    author_id: UserId,
    pinned: bool,
    created_at: DateTime<Utc>,
}

impl Announcement {
    /// Creates an announcement.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryDomainError::EmptyTitle`] for a blank title.
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        author_id: UserId,
        pinned: bool,
        clock: &impl Clock,
    ) -> Result<Self, DirectoryDomainError> {
        Ok(Self {
            id: AnnouncementId::new(),
            title: non_empty(title, DirectoryDomainError::EmptyTitle)?,
            body: body.into(),
            author_id,
            pinned,
            created_at: clock.utc(),
        })
    }

    /// Returns the announcement identifier.
    #[must_use]
    pub const fn id(&self) -> AnnouncementId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the body text.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the author.
    #[must_use]
    pub const fn author_id(&self) -> UserId {
        self.author_id
    }

    /// Returns whether the announcement is pinned.
    #[must_use]
    pub const fn is_pinned(&self) -> bool {
        self.pinned
    }

    /// Returns the posting timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
