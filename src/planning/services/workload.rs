//! Workload normalisation of oracle effort estimates.

use crate::planning::domain::{Backlog, CapacityBudget, ConstraintViolation, checked_hours};
use std::num::NonZeroU32;
use tracing::debug;

/// Rescales raw "ideal solo hours" into hours consistent with team capacity.
///
/// `normalized = raw * 0.5 * (hours_per_day / team_size)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkloadNormalizer {
    hours_per_day: u32,
    team_size: NonZeroU32,
}

impl WorkloadNormalizer {
    const SOLO_DISCOUNT: f64 = 0.5;

    /// Creates a normaliser for the given cadence and team.
    #[must_use]
    pub const fn new(hours_per_day: u32, team_size: NonZeroU32) -> Self {
        Self {
            hours_per_day,
            team_size,
        }
    }

    /// Creates a normaliser from a capacity budget.
    ///
    /// Returns `None` for a budget with no team members.
    #[must_use]
    pub fn from_budget(budget: &CapacityBudget) -> Option<Self> {
        NonZeroU32::new(budget.team_size()).map(|team| Self::new(budget.hours_per_day(), team))
    }

    /// Normalises one raw hour figure.
    ///
    /// # Errors
    ///
    /// Returns [`ConstraintViolation::InvalidWorkloadValue`] when `raw_hours`
    /// is negative or not finite.
    pub fn normalize(&self, context: &str, raw_hours: f64) -> Result<f64, ConstraintViolation> {
        let raw = checked_hours(context, raw_hours)?;
        let share = f64::from(self.hours_per_day) / f64::from(self.team_size.get());
        Ok(raw * Self::SOLO_DISCOUNT * share)
    }

    /// Normalises every task in the backlog in place.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConstraintViolation::InvalidWorkloadValue`]
    /// encountered; tasks before it are already rescaled.
    pub fn normalize_backlog(&self, backlog: &mut Backlog) -> Result<(), ConstraintViolation> {
        for task in backlog.tasks_mut() {
            let normalized = self.normalize(task.title(), task.expected_hours())?;
            debug!(
                task = task.title(),
                raw_hours = task.expected_hours(),
                normalized,
                "normalised task workload"
            );
            task.set_expected_hours(normalized);
        }
        Ok(())
    }
}
