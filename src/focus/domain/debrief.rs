//! Debrief payload completing a focus session.

use super::FocusError;
use crate::allocation::domain::AllocationId;
use crate::task::domain::{Rating, Submission};
use serde::{Deserialize, Serialize};

/// Minimum trimmed length of reflections and overrun reasons.
pub const DEFAULT_MIN_TEXT_CHARS: usize = 5;

/// User input collected when a focus session ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebriefRequest {
    allocation_id: AllocationId,
    reflection: String,
    overrun_reason: Option<String>,
    rating: Option<u8>,
    save_to_knowledge: bool,
}

impl DebriefRequest {
    /// Creates a debrief for the session on `allocation_id`.
    #[must_use]
    pub fn new(allocation_id: AllocationId, reflection: impl Into<String>) -> Self {
        Self {
            allocation_id,
            reflection: reflection.into(),
            overrun_reason: None,
            rating: None,
            save_to_knowledge: false,
        }
    }

    /// Explains why the budget was exceeded.
    #[must_use]
    pub fn with_overrun_reason(mut self, reason: impl Into<String>) -> Self {
        self.overrun_reason = Some(reason.into());
        self
    }

    /// Rates the work from 1 to 5.
    #[must_use]
    pub const fn with_rating(mut self, rating: u8) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Opts into recording a knowledge base write-up.
    #[must_use]
    pub const fn save_to_knowledge(mut self, save: bool) -> Self {
        self.save_to_knowledge = save;
        self
    }

    /// Returns the session's allocation.
    #[must_use]
    pub const fn allocation_id(&self) -> AllocationId {
        self.allocation_id
    }

    /// Returns the reflection text.
    #[must_use]
    pub fn reflection(&self) -> &str {
        &self.reflection
    }

    /// Returns the overrun reason, if provided.
    #[must_use]
    pub fn overrun_reason(&self) -> Option<&str> {
        self.overrun_reason.as_deref()
    }

    /// Returns whether a knowledge write-up is requested.
    #[must_use]
    pub const fn saves_to_knowledge(&self) -> bool {
        self.save_to_knowledge
    }

    /// Validates the debrief and converts it into a task submission.
    ///
    /// # Errors
    ///
    /// Returns [`FocusError`] when the reflection is too short, an overrun
    /// lacks a sufficient reason or the rating is out of range.
    pub fn to_submission(&self, overrun: bool, min_chars: usize) -> Result<Submission, FocusError> {
        if !meets_minimum(&self.reflection, min_chars) {
            return Err(FocusError::ReflectionTooShort { min_chars });
        }
        let reason = self
            .overrun_reason
            .as_deref()
            .map(str::trim)
            .filter(|reason| !reason.is_empty());
        if overrun && !reason.is_some_and(|text| meets_minimum(text, min_chars)) {
            return Err(FocusError::OverrunReasonRequired { min_chars });
        }
        let mut submission = Submission::new(self.reflection.trim())
            .map_err(|_| FocusError::ReflectionTooShort { min_chars })?;
        if let Some(text) = reason {
            submission = submission.with_overrun_reason(text);
        }
        if let Some(value) = self.rating {
            let rating = Rating::new(value).map_err(|_| FocusError::InvalidRating(value))?;
            submission = submission.with_rating(rating);
        }
        Ok(submission)
    }
}

fn meets_minimum(text: &str, min_chars: usize) -> bool {
    text.trim().chars().count() >= min_chars
}
