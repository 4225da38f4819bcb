//! Configuration for planning runs.

use crate::planning::services::CapacityModel;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// What the allocator does with a sprint whose workload exceeds the budget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RebalancePolicy {
    /// Record and log the overrun, leave the sprint untouched.
    #[default]
    Advisory,
    /// Trim hours from the lowest-priority tasks until the sprint fits.
    TrimLowestPriority,
}

/// Tunables for a planning run.
///
/// # Examples
///
/// ```
/// use cadence::planning::config::{PlanningConfig, RebalancePolicy};
///
/// let config = PlanningConfig::from_json_str(r#"{"drafting_concurrency": 4}"#)
///     .expect("valid config");
/// assert_eq!(config.drafting_concurrency, 4);
/// assert_eq!(config.rebalance, RebalancePolicy::Advisory);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanningConfig {
    /// Discount applied to raw team capacity.
    pub efficiency_factor: f64,
    /// Upper bound on each oracle call, in seconds.
    pub oracle_timeout_secs: u64,
    /// Upper bound on each store call, in seconds.
    pub store_timeout_secs: u64,
    /// Maximum concurrent per-epic task-drafting calls.
    pub drafting_concurrency: usize,
    /// Handling of over-budget sprints.
    pub rebalance: RebalancePolicy,
    /// Whether oracle-drafted tasks are written back through the store.
    pub persist_drafted_tasks: bool,
}

impl PlanningConfig {
    /// Parses and validates a JSON configuration document.
    ///
    /// Missing fields take their default values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or any validation
    /// error from [`PlanningConfig::validate`].
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EfficiencyOutOfRange`],
    /// [`ConfigError::ZeroTimeout`], or [`ConfigError::ZeroConcurrency`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.efficiency_factor > 0.0 && self.efficiency_factor <= 1.0) {
            return Err(ConfigError::EfficiencyOutOfRange(self.efficiency_factor));
        }
        if self.oracle_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout("oracle_timeout_secs"));
        }
        if self.store_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout("store_timeout_secs"));
        }
        if self.drafting_concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }
        Ok(())
    }

    /// Returns the oracle call bound.
    #[must_use]
    pub const fn oracle_timeout(&self) -> Duration {
        Duration::from_secs(self.oracle_timeout_secs)
    }

    /// Returns the store call bound.
    #[must_use]
    pub const fn store_timeout(&self) -> Duration {
        Duration::from_secs(self.store_timeout_secs)
    }
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self {
            efficiency_factor: CapacityModel::DEFAULT_EFFICIENCY,
            oracle_timeout_secs: 120,
            store_timeout_secs: 10,
            drafting_concurrency: 1,
            rebalance: RebalancePolicy::Advisory,
            persist_drafted_tasks: false,
        }
    }
}

/// Errors returned while loading a [`PlanningConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid configuration JSON.
    #[error("failed to parse planning config: {0}")]
    Parse(#[source] serde_json::Error),

    /// The efficiency factor is outside `(0, 1]`.
    #[error("efficiency factor {0} must be within (0, 1]")]
    EfficiencyOutOfRange(f64),

    /// A timeout is zero.
    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    /// Drafting concurrency is zero.
    #[error("drafting_concurrency must be greater than zero")]
    ZeroConcurrency,
}
