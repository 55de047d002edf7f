//! Fixed four-bucket classification of goal categories.

use crate::task::domain::{GoalCategory, Task};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Dashboard quadrant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quadrant {
    /// Long-range direction and new bets.
    Strategic,
    /// Customer and business growth.
    Growth,
    /// Keeping the lights on.
    Operational,
    /// Learning and administration.
    Support,
}

impl Quadrant {
    /// All quadrants in display order.
    pub const ALL: [Self; 4] = [Self::Strategic, Self::Growth, Self::Operational, Self::Support];

    /// Returns the quadrant a goal category belongs to.
    #[must_use]
    pub const fn of(goal: GoalCategory) -> Self {
        match goal {
            GoalCategory::Strategy | GoalCategory::Innovation => Self::Strategic,
            GoalCategory::Growth | GoalCategory::Customer => Self::Growth,
            GoalCategory::Operations | GoalCategory::Quality => Self::Operational,
            GoalCategory::Learning | GoalCategory::Admin => Self::Support,
        }
    }

    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Strategic => "strategic",
            Self::Growth => "growth",
            Self::Operational => "operational",
            Self::Support => "support",
        }
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns the task's quadrant, or `None` when it has no goal.
#[must_use]
pub fn quadrant_of(task: &Task) -> Option<Quadrant> {
    task.goal().map(Quadrant::of)
}

/// Task counts per quadrant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuadrantCounts {
    /// Strategic tasks.
    pub strategic: usize,
    /// Growth tasks.
    pub growth: usize,
    /// Operational tasks.
    pub operational: usize,
    /// Support tasks.
    pub support: usize,
    /// Tasks without a goal category.
    pub unclassified: usize,
}

impl QuadrantCounts {
    /// Returns the count for one quadrant.
    #[must_use]
    pub const fn get(&self, quadrant: Quadrant) -> usize {
        match quadrant {
            Quadrant::Strategic => self.strategic,
            Quadrant::Growth => self.growth,
            Quadrant::Operational => self.operational,
            Quadrant::Support => self.support,
        }
    }
}

/// Counts tasks per quadrant.
#[must_use]
pub fn quadrant_counts(tasks: &[Task]) -> QuadrantCounts {
    let mut counts = QuadrantCounts::default();
    for task in tasks {
        let slot = match quadrant_of(task) {
            Some(Quadrant::Strategic) => &mut counts.strategic,
            Some(Quadrant::Growth) => &mut counts.growth,
            Some(Quadrant::Operational) => &mut counts.operational,
            Some(Quadrant::Support) => &mut counts.support,
            None => &mut counts.unclassified,
        };
        *slot = slot.saturating_add(1);
    }
    counts
}
