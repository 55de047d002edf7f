//! Runtime configuration for the Chronos core.
//!
//! # Examples
//!
//! ```
//! use chronos::config::ChronosConfig;
//!
//! let config = ChronosConfig::default();
//! assert_eq!(config.max_running_per_user, 2);
//!
//! let strict = ChronosConfig::strict();
//! assert_eq!(strict.max_running_per_user, 1);
//! ```

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tunable limits and logging settings.
///
/// Missing JSON fields take their default values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChronosConfig {
    /// Minimum trimmed length of debrief reflections and overrun reasons.
    pub min_debrief_chars: usize,
    /// Running allocations a user may hold at once.
    pub max_running_per_user: usize,
    /// Progress in seconds below which a started allocation may be removed.
    pub removal_grace_seconds: i64,
    /// Hours ahead of now that count as approaching on the dashboard.
    pub approaching_window_hours: i64,
    /// Default `tracing` filter directive, overridden by `RUST_LOG`.
    pub log_filter: String,
    /// Whether logs are emitted as JSON lines.
    pub json_logs: bool,
}

impl Default for ChronosConfig {
    fn default() -> Self {
        Self {
            min_debrief_chars: 5,
            max_running_per_user: 2,
            removal_grace_seconds: 180,
            approaching_window_hours: 24,
            log_filter: "info".to_owned(),
            json_logs: false,
        }
    }
}

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON document could not be parsed.
    #[error("invalid configuration document: {0}")]
    Parse(#[from] serde_json::Error),
    /// A value is outside its allowed range.
    #[error("invalid configuration value for {field}: {reason}")]
    OutOfRange {
        /// Offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: &'static str,
    },
}

impl ChronosConfig {
    /// Creates a strict configuration: one running allocation per user,
    /// longer debriefs, a shorter grace period and a two-day horizon.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            min_debrief_chars: 20,
            max_running_per_user: 1,
            removal_grace_seconds: 60,
            approaching_window_hours: 48,
            ..Self::default()
        }
    }

    /// Parses and validates a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::OutOfRange`] for invalid values.
    pub fn from_json(document: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(document)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::OutOfRange`] for the first invalid value.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.max_running_per_user == 0 {
            return Err(ConfigError::OutOfRange {
                field: "max_running_per_user",
                reason: "must allow at least one running allocation",
            });
        }
        if self.removal_grace_seconds < 0 {
            return Err(ConfigError::OutOfRange {
                field: "removal_grace_seconds",
                reason: "must not be negative",
            });
        }
        if self.approaching_window_hours <= 0 {
            return Err(ConfigError::OutOfRange {
                field: "approaching_window_hours",
                reason: "must be positive",
            });
        }
        Ok(())
    }

    /// Returns the dashboard approaching window.
    #[must_use]
    pub fn approaching_window(&self) -> TimeDelta {
        TimeDelta::try_hours(self.approaching_window_hours).unwrap_or(TimeDelta::MAX)
    }
}
