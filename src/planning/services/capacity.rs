//! Capacity model: derives the per-cycle effective-hours budget.

use crate::planning::domain::{CapacityBudget, ConstraintViolation};
use chrono::NaiveDate;
use tracing::info;

/// Working cadence selected from the project length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cadence {
    /// Development hours per member per day.
    pub hours_per_day: u32,
    /// Sprint cycle length in calendar days.
    pub cycle_days: u32,
}

/// Derives capacity budgets from project calendars and team sizes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapacityModel {
    efficiency_factor: f64,
}

impl CapacityModel {
    /// Efficiency discount applied when none is configured.
    pub const DEFAULT_EFFICIENCY: f64 = 0.6;

    /// Creates a model with the given efficiency discount.
    #[must_use]
    pub const fn new(efficiency_factor: f64) -> Self {
        Self { efficiency_factor }
    }

    /// Selects the working cadence for a project of `project_days` days.
    ///
    /// Longer projects assume fewer daily hours and longer cycles.
    #[must_use]
    pub const fn cadence_for(project_days: i64) -> Cadence {
        let (hours_per_day, cycle_days) = match project_days {
            ..=90 => (8, 14),
            91..=180 => (6, 14),
            181..=270 => (4, 21),
            271..=365 => (2, 21),
            _ => (1, 28),
        };
        Cadence {
            hours_per_day,
            cycle_days,
        }
    }

    /// Computes the budget for a project calendar and team size.
    ///
    /// # Errors
    ///
    /// Returns [`ConstraintViolation::InvalidProjectRange`] when `end`
    /// precedes `start` or the team is empty.
    pub fn budget(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        team_size: usize,
    ) -> Result<CapacityBudget, ConstraintViolation> {
        let invalid = || ConstraintViolation::InvalidProjectRange {
            start,
            end,
            team_size,
        };
        if end < start || team_size == 0 {
            return Err(invalid());
        }
        let members = u32::try_from(team_size).map_err(|_overflow| invalid())?;
        let project_days = (end - start).num_days();
        let cadence = Self::cadence_for(project_days);
        let budget = CapacityBudget::from_parts(
            project_days,
            cadence.cycle_days,
            cadence.hours_per_day,
            self.efficiency_factor,
            members,
        );
        info!(
            project_days,
            team_size,
            hours_per_day = cadence.hours_per_day,
            cycle_days = cadence.cycle_days,
            efficiency_factor = self.efficiency_factor,
            effective_hours = budget.effective_hours(),
            "computed sprint capacity budget"
        );
        Ok(budget)
    }
}

impl Default for CapacityModel {
    fn default() -> Self {
        Self::new(Self::DEFAULT_EFFICIENCY)
    }
}
