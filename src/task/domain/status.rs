//! Task lifecycle status and its forward-only state machine.

use super::ParseTaskValueError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task has been created but work has not started.
    Todo,
    /// Task is being worked on.
    Doing,
    /// Work has been handed in for review.
    Submitted,
    /// Task has been completed.
    Done,
    /// Task has been put away.
    Archived,
}

impl TaskStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Todo,
        Self::Doing,
        Self::Submitted,
        Self::Done,
        Self::Archived,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::Doing => "doing",
            Self::Submitted => "submitted",
            Self::Done => "done",
            Self::Archived => "archived",
        }
    }

    /// Returns whether work on the task is still outstanding.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Todo | Self::Doing)
    }

    /// Returns whether no further transition is possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Archived)
    }

    /// Returns whether a forward transition to `target` is permitted.
    ///
    /// Backward moves are only reachable through explicit reject and reopen
    /// actions and are therefore not reported here.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Todo, Self::Doing | Self::Archived)
                | (Self::Doing, Self::Submitted | Self::Done)
                | (Self::Submitted, Self::Done)
                | (Self::Done, Self::Archived)
        )
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskValueError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "todo" => Ok(Self::Todo),
            "doing" => Ok(Self::Doing),
            "submitted" => Ok(Self::Submitted),
            "done" => Ok(Self::Done),
            "archived" => Ok(Self::Archived),
            _ => Err(ParseTaskValueError::new("task status", value)),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
