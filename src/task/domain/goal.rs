//! Goal categories used for strategic classification of tasks.

use super::ParseTaskValueError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Business goal a task contributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalCategory {
    /// Long-range direction and planning.
    Strategy,
    /// New products and experiments.
    Innovation,
    /// Revenue and market expansion.
    Growth,
    /// Customer relationships and support.
    Customer,
    /// Day-to-day running of the business.
    Operations,
    /// Quality assurance and defect work.
    Quality,
    /// Skills and knowledge building.
    Learning,
    /// Administrative overhead.
    Admin,
}

impl GoalCategory {
    /// All goal categories in display order.
    pub const ALL: [Self; 8] = [
        Self::Strategy,
        Self::Innovation,
        Self::Growth,
        Self::Customer,
        Self::Operations,
        Self::Quality,
        Self::Learning,
        Self::Admin,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Strategy => "strategy",
            Self::Innovation => "innovation",
            Self::Growth => "growth",
            Self::Customer => "customer",
            Self::Operations => "operations",
            Self::Quality => "quality",
            Self::Learning => "learning",
            Self::Admin => "admin",
        }
    }
}

impl TryFrom<&str> for GoalCategory {
    type Error = ParseTaskValueError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|goal| goal.as_str() == normalized)
            .ok_or_else(|| ParseTaskValueError::new("goal category", value))
    }
}

impl fmt::Display for GoalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
