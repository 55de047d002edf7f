//! Nominal time budgets attached to tasks.

use super::{ParseTaskValueError, TaskDomainError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Working hours counted for one day of a long task.
pub const WORKDAY_HOURS: u64 = 8;

const SECONDS_PER_MINUTE: u64 = 60;
const MINUTES_PER_HOUR: u64 = 60;

/// Unit family of a task's time budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeType {
    /// Small errands measured in minutes.
    Misc,
    /// Day-scale work measured in hours.
    Daily,
    /// Multi-day work measured in working days.
    Long,
}

impl TimeType {
    /// All time types in display order.
    pub const ALL: [Self; 3] = [Self::Misc, Self::Daily, Self::Long];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Misc => "misc",
            Self::Daily => "daily",
            Self::Long => "long",
        }
    }

    /// Minutes represented by one unit of this time type.
    #[must_use]
    pub const fn minutes_per_unit(self) -> u64 {
        match self {
            Self::Misc => 1,
            Self::Daily => MINUTES_PER_HOUR,
            Self::Long => WORKDAY_HOURS * MINUTES_PER_HOUR,
        }
    }

    /// Seconds represented by one unit of this time type.
    #[must_use]
    pub const fn seconds_per_unit(self) -> u64 {
        self.minutes_per_unit() * SECONDS_PER_MINUTE
    }
}

impl TryFrom<&str> for TimeType {
    type Error = ParseTaskValueError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "misc" => Ok(Self::Misc),
            "daily" => Ok(Self::Daily),
            "long" => Ok(Self::Long),
            _ => Err(ParseTaskValueError::new("time type", value)),
        }
    }
}

impl fmt::Display for TimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A task's nominal time budget in type-specific units.
///
/// `Misc` values are minutes, `Daily` values are hours and `Long` values are
/// working days of [`WORKDAY_HOURS`] hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeBudget {
    time_type: TimeType,
    time_value: u32,
}

impl TimeBudget {
    /// Creates a validated budget.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyBudget`] when `time_value` is zero.
    pub const fn new(time_type: TimeType, time_value: u32) -> Result<Self, TaskDomainError> {
        if time_value == 0 {
            return Err(TaskDomainError::EmptyBudget);
        }
        Ok(Self {
            time_type,
            time_value,
        })
    }

    /// Budget of `minutes` minutes.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyBudget`] when `minutes` is zero.
    pub const fn minutes(minutes: u32) -> Result<Self, TaskDomainError> {
        Self::new(TimeType::Misc, minutes)
    }

    /// Budget of `hours` hours.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyBudget`] when `hours` is zero.
    pub const fn hours(hours: u32) -> Result<Self, TaskDomainError> {
        Self::new(TimeType::Daily, hours)
    }

    /// Budget of `days` working days.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyBudget`] when `days` is zero.
    pub const fn days(days: u32) -> Result<Self, TaskDomainError> {
        Self::new(TimeType::Long, days)
    }

    /// Returns the unit family.
    #[must_use]
    pub const fn time_type(self) -> TimeType {
        self.time_type
    }

    /// Returns the value in type-specific units.
    #[must_use]
    pub const fn time_value(self) -> u32 {
        self.time_value
    }

    /// Returns the budget in seconds.
    #[must_use]
    pub const fn as_seconds(self) -> u64 {
        self.time_value as u64 * self.time_type.seconds_per_unit()
    }

    /// Returns the budget in whole minutes.
    #[must_use]
    pub const fn as_minutes(self) -> u64 {
        self.time_value as u64 * self.time_type.minutes_per_unit()
    }

    /// Returns whether `elapsed_seconds` exceeds the budget.
    #[must_use]
    pub const fn is_overrun(self, elapsed_seconds: u64) -> bool {
        elapsed_seconds > self.as_seconds()
    }
}

impl fmt::Display for TimeBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = match self.time_type {
            TimeType::Misc => "min",
            TimeType::Daily => "h",
            TimeType::Long => "d",
        };
        write!(f, "{}{unit}", self.time_value)
    }
}
