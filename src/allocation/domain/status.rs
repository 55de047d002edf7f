//! Allocation lifecycle status.

use super::ParseAllocationStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a task allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationStatus {
    /// Scheduled but not started.
    Planned,
    /// Timer running.
    Running,
    /// Timer paused without finalizing.
    Paused,
    /// Finished within budget.
    Done,
    /// Scheduled slot passed without being started.
    Missed,
    /// Finished after exceeding the task budget.
    Overrun,
}

impl AllocationStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Done => "done",
            Self::Missed => "missed",
            Self::Overrun => "overrun",
        }
    }

    /// Returns whether an execution attempt is in flight.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Running | Self::Paused)
    }

    /// Returns whether the allocation has been finalized.
    #[must_use]
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Done | Self::Missed | Self::Overrun)
    }

    /// Returns whether the allocation may move to `target`.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Planned, Self::Running | Self::Missed)
                | (Self::Running, Self::Paused | Self::Done | Self::Overrun)
                | (Self::Paused, Self::Running | Self::Done | Self::Overrun)
        )
    }
}

impl TryFrom<&str> for AllocationStatus {
    type Error = ParseAllocationStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "planned" => Ok(Self::Planned),
            "running" => Ok(Self::Running),
            "paused" => Ok(Self::Paused),
            "done" => Ok(Self::Done),
            "missed" => Ok(Self::Missed),
            "overrun" => Ok(Self::Overrun),
            _ => Err(ParseAllocationStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for AllocationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
