//! Recurrence rules and assignment strategies for routines.

use super::{ParseRoutineValueError, RoutineDomainError};
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// When a routine is meant to produce work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Recurrence {
    /// Every calendar day.
    Daily,
    /// Monday to Friday.
    Workday,
    /// Once a week on the given weekday.
    Weekly {
        /// Day of the week the routine fires on.
        weekday: Weekday,
    },
    /// Once a month on the given day.
    Monthly {
        /// Day of the month, clamped to the month's last day.
        day: u32,
    },
}

impl Recurrence {
    /// Creates a validated monthly recurrence.
    ///
    /// # Errors
    ///
    /// Returns [`RoutineDomainError::InvalidDayOfMonth`] outside `1..=31`.
    pub const fn monthly(day: u32) -> Result<Self, RoutineDomainError> {
        if day == 0 || day > 31 {
            return Err(RoutineDomainError::InvalidDayOfMonth(day));
        }
        Ok(Self::Monthly { day })
    }

    /// Returns the rule name in canonical storage format.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Workday => "workday",
            Self::Weekly { .. } => "weekly",
            Self::Monthly { .. } => "monthly",
        }
    }

    /// Returns whether the rule fires on `date`.
    ///
    /// Monthly rules whose day exceeds the month length fire on the month's
    /// last day.
    #[must_use]
    pub fn fires_on(self, date: NaiveDate) -> bool {
        match self {
            Self::Daily => true,
            Self::Workday => !matches!(date.weekday(), Weekday::Sat | Weekday::Sun),
            Self::Weekly { weekday } => date.weekday() == weekday,
            Self::Monthly { day } => {
                date.day() == day || (is_last_day_of_month(date) && day > date.day())
            }
        }
    }
}

fn is_last_day_of_month(date: NaiveDate) -> bool {
    date.succ_opt()
        .is_none_or(|next| next.month() != date.month())
}

/// How deployed instances are assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStrategy {
    /// Every assignee receives their own copy.
    Static,
    /// One assignee per deployment, cycling through the list.
    Rotating,
}

impl AssignmentStrategy {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Rotating => "rotating",
        }
    }
}

impl TryFrom<&str> for AssignmentStrategy {
    type Error = ParseRoutineValueError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "static" => Ok(Self::Static),
            "rotating" => Ok(Self::Rotating),
            _ => Err(ParseRoutineValueError {
                kind: "assignment strategy",
                value: value.to_owned(),
            }),
        }
    }
}
