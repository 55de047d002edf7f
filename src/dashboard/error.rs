//! Errors raised while building dashboard reports.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors for report period construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    /// The custom range ends before it starts.
    #[error("report range ends at {end} before it starts at {start}")]
    InvalidRange {
        /// Inclusive start.
        start: DateTime<Utc>,
        /// Exclusive end.
        end: DateTime<Utc>,
    },

    /// The year and month do not name a calendar month.
    #[error("invalid calendar month {year}-{month:02}")]
    InvalidMonth {
        /// Calendar year.
        year: i32,
        /// Calendar month, 1-based.
        month: u32,
    },
}
