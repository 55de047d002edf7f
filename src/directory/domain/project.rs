//! Project records grouping related tasks.

use super::{DirectoryDomainError, ProjectId, UserId, error::non_empty};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A named project that tasks may belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    name: String,
    description: Option<String>,
    owner_id: UserId,
    archived: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Project {
    /// Creates an open project.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryDomainError::EmptyName`] for a blank name.
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        owner_id: UserId,
        clock: &impl Clock,
    ) -> Result<Self, DirectoryDomainError> {
        let timestamp = clock.utc();
        Ok(Self {
            id: ProjectId::new(),
            name: non_empty(name, DirectoryDomainError::EmptyName)?,
            description: description.filter(|text| !text.trim().is_empty()),
            owner_id,
            archived: false,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the project name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the optional description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn owner_id(&self) -> UserId {
        self.owner_id
    }

    /// Returns whether the project is archived.
    #[must_use]
    pub const fn is_archived(&self) -> bool {
        self.archived
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Renames the project.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryDomainError::ProjectArchived`] for archived projects
    /// and [`DirectoryDomainError::EmptyName`] for a blank name.
    pub fn rename(
        &mut self,
        name: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<(), DirectoryDomainError> {
        self.ensure_open()?;
        self.name = non_empty(name, DirectoryDomainError::EmptyName)?;
        self.updated_at = clock.utc();
        Ok(())
    }

    /// Archives the project. Archiving twice is a no-op.
    pub fn archive(&mut self, clock: &impl Clock) {
        if !self.archived {
            self.archived = true;
            self.updated_at = clock.utc();
        }
    }

    /// Fails when the project can no longer accept new tasks.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryDomainError::ProjectArchived`] for archived projects.
    pub const fn ensure_open(&self) -> Result<(), DirectoryDomainError> {
        if self.archived {
            return Err(DirectoryDomainError::ProjectArchived(self.id));
        }
        Ok(())
    }
}
