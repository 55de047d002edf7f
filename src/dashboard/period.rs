//! Half-open UTC reporting periods.

use super::DashboardError;
use chrono::{DateTime, Datelike, Days, Months, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// A `[start, end)` interval in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReportPeriod {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl ReportPeriod {
    /// Covers a single calendar day.
    #[must_use]
    pub fn day(date: NaiveDate) -> Self {
        let start = midnight(date);
        Self {
            start,
            end: date.succ_opt().map_or(DateTime::<Utc>::MAX_UTC, midnight),
        }
    }

    /// Covers the Monday-to-Sunday week containing `date`.
    #[must_use]
    pub fn week_containing(date: NaiveDate) -> Self {
        let offset = Days::new(u64::from(date.weekday().num_days_from_monday()));
        let monday = date.checked_sub_days(offset).unwrap_or(NaiveDate::MIN);
        Self {
            start: midnight(monday),
            end: monday
                .checked_add_days(Days::new(7))
                .map_or(DateTime::<Utc>::MAX_UTC, midnight),
        }
    }

    /// Covers a calendar month.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::InvalidMonth`] when `month` is outside 1 to
    /// 12 or the year is out of range.
    pub fn month(year: i32, month: u32) -> Result<Self, DashboardError> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or(DashboardError::InvalidMonth { year, month })?;
        let next = first
            .checked_add_months(Months::new(1))
            .ok_or(DashboardError::InvalidMonth { year, month })?;
        Ok(Self {
            start: midnight(first),
            end: midnight(next),
        })
    }

    /// Covers an arbitrary range.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::InvalidRange`] when `end` precedes `start`.
    pub fn custom(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, DashboardError> {
        if end < start {
            return Err(DashboardError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Returns the inclusive start.
    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Returns the exclusive end.
    #[must_use]
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Returns whether `instant` falls inside the period.
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}
