//! Dashboard aggregators.
//!
//! Pure functions over task and allocation snapshots. Every function takes
//! the reference instant explicitly, so reports are reproducible.

mod buckets;
mod error;
mod hours;
mod period;
mod quadrant;
mod snapshot;

pub use buckets::{DEFAULT_APPROACHING_WINDOW_HOURS, DueBuckets, due_buckets, is_overdue};
pub use error::DashboardError;
pub use hours::{
    PlannedMinutes, StatusCounts, actual_seconds_by_user, minutes_to_hours, planned_minutes,
    status_counts,
};
pub use period::ReportPeriod;
pub use quadrant::{Quadrant, QuadrantCounts, quadrant_counts, quadrant_of};
pub use snapshot::DashboardSnapshot;

#[cfg(test)]
mod tests;
