//! Routine lifecycle status.

use super::ParseRoutineValueError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a routine template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutineStatus {
    /// Being written; not yet deployable.
    Draft,
    /// Deployable.
    Active,
    /// Recurrence paused.
    Frozen,
    /// Finished for good.
    Completed,
}

impl RoutineStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Frozen => "frozen",
            Self::Completed => "completed",
        }
    }

    /// Returns whether the routine may move to `target`.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Draft | Self::Frozen, Self::Active)
                | (Self::Active, Self::Frozen | Self::Completed)
        )
    }
}

impl TryFrom<&str> for RoutineStatus {
    type Error = ParseRoutineValueError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "draft" => Ok(Self::Draft),
            "active" => Ok(Self::Active),
            "frozen" => Ok(Self::Frozen),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseRoutineValueError {
                kind: "routine status",
                value: value.to_owned(),
            }),
        }
    }
}

impl fmt::Display for RoutineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
