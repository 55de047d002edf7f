//! Team member records.

use super::{DirectoryDomainError, ParseDirectoryValueError, UserId, error::non_empty};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Access role of a team member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Regular member.
    Member,
    /// Administrator with access to the admin console.
    Admin,
}

impl UserRole {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Admin => "admin",
        }
    }
}

impl TryFrom<&str> for UserRole {
    type Error = ParseDirectoryValueError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "member" => Ok(Self::Member),
            "admin" => Ok(Self::Admin),
            _ => Err(ParseDirectoryValueError {
                kind: "user role",
                value: value.to_owned(),
            }),
        }
    }
}

/// A team member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    name: String,
    email: String,
    role: UserRole,
    active: bool,
    created_at: DateTime<Utc>,
}

impl User {
    /// Creates an active member.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryDomainError::EmptyName`] for a blank name or
    /// [`DirectoryDomainError::InvalidEmail`] when the address has no local
    /// part or domain.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        role: UserRole,
        clock: &impl Clock,
    ) -> Result<Self, DirectoryDomainError> {
        Ok(Self {
            id: UserId::new(),
            name: non_empty(name, DirectoryDomainError::EmptyName)?,
            email: validate_email(email.into())?,
            role,
            active: true,
            created_at: clock.utc(),
        })
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the normalized email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the access role.
    #[must_use]
    pub const fn role(&self) -> UserRole {
        self.role
    }

    /// Returns whether the user may still be assigned work.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Returns the registration timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Changes the access role.
    pub const fn set_role(&mut self, role: UserRole) {
        self.role = role;
    }

    /// Marks the user inactive.
    pub const fn deactivate(&mut self) {
        self.active = false;
    }
}

fn validate_email(raw: String) -> Result<String, DirectoryDomainError> {
    let normalized = raw.trim().to_ascii_lowercase();
    let is_valid = normalized
        .split_once('@')
        .is_some_and(|(local, domain)| {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@')
        })
        && !normalized.chars().any(char::is_whitespace);
    if !is_valid {
        return Err(DirectoryDomainError::InvalidEmail(raw));
    }
    Ok(normalized)
}
