//! Submission records captured when work on a task is handed in.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};

/// Self-assessed quality rating between 1 and 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// Creates a validated rating.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidRating`] outside `1..=5`.
    pub const fn new(value: u8) -> Result<Self, TaskDomainError> {
        if value == 0 || value > 5 {
            return Err(TaskDomainError::InvalidRating(value));
        }
        Ok(Self(value))
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = TaskDomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

/// Summary of finished work attached to a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    summary: String,
    overrun_reason: Option<String>,
    rating: Option<Rating>,
}

impl Submission {
    /// Creates a submission with a required summary.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptySubmission`] when the summary is blank.
    pub fn new(summary: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = summary.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptySubmission);
        }
        Ok(Self {
            summary: trimmed.to_owned(),
            overrun_reason: None,
            rating: None,
        })
    }

    /// Records why the work exceeded its budget.
    #[must_use]
    pub fn with_overrun_reason(mut self, reason: impl Into<String>) -> Self {
        let raw = reason.into();
        let trimmed = raw.trim();
        self.overrun_reason = (!trimmed.is_empty()).then(|| trimmed.to_owned());
        self
    }

    /// Attaches a self-assessed rating.
    #[must_use]
    pub const fn with_rating(mut self, rating: Rating) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Returns the work summary.
    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Returns the overrun explanation, if any.
    #[must_use]
    pub fn overrun_reason(&self) -> Option<&str> {
        self.overrun_reason.as_deref()
    }

    /// Returns the rating, if any.
    #[must_use]
    pub const fn rating(&self) -> Option<Rating> {
        self.rating
    }
}
