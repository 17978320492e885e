//! Match and scheduler configuration.
//!
//! Callers configure a match at creation time with a `MatchConfig`.
//! The same configuration is shared by every game of a series.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Configuration for a match (and the series it may belong to).
///
/// ## Example
///
/// ```
/// use rust_duel::core::MatchConfig;
///
/// let config = MatchConfig::default()
///     .with_max_health(6)
///     .with_best_of(3);
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.wins_needed(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Starting and maximum health of both combatants.
    pub max_health: u32,

    /// Seconds each selection phase lasts before a timeout is forced.
    pub turn_time_limit_secs: u64,

    /// Number of games in the series (1 for a single match).
    pub best_of: u32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_health: 10,
            turn_time_limit_secs: 30,
            best_of: 1,
        }
    }
}

impl MatchConfig {
    /// Set the maximum health.
    #[must_use]
    pub fn with_max_health(mut self, max_health: u32) -> Self {
        self.max_health = max_health;
        self
    }

    /// Set the selection time limit in seconds.
    #[must_use]
    pub fn with_turn_time_limit(mut self, secs: u64) -> Self {
        self.turn_time_limit_secs = secs;
        self
    }

    /// Set the series length.
    #[must_use]
    pub fn with_best_of(mut self, best_of: u32) -> Self {
        self.best_of = best_of;
        self
    }

    /// Check the configuration is playable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_health == 0 {
            return Err(ConfigError::ZeroMaxHealth);
        }
        if self.turn_time_limit_secs == 0 {
            return Err(ConfigError::ZeroTimeLimit);
        }
        if self.best_of == 0 || self.best_of % 2 == 0 {
            return Err(ConfigError::InvalidBestOf(self.best_of));
        }
        Ok(())
    }

    /// Games a side must win to take the series.
    #[must_use]
    pub fn wins_needed(&self) -> u32 {
        self.best_of.div_ceil(2)
    }

    /// Selection time limit as a chrono duration.
    #[must_use]
    pub fn turn_time_limit(&self) -> chrono::Duration {
        chrono::Duration::seconds(i64::try_from(self.turn_time_limit_secs).unwrap_or(i64::MAX))
    }
}

/// Timeout scheduler configuration.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// How often deadlines are scanned.
    pub tick_interval: Duration,
    /// How long an ended match stays registered before it is reaped.
    pub ended_grace: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(1),
            ended_grace: Duration::from_secs(60),
        }
    }
}
