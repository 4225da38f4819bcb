//! Per-cycle capacity budget derived from the project calendar and team.

use serde::Serialize;

/// Effective-hours budget for one sprint cycle.
///
/// Computed fresh for every planning run and never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CapacityBudget {
    project_days: i64,
    cycle_days: u32,
    hours_per_day: u32,
    efficiency_factor: f64,
    team_size: u32,
    effective_hours: f64,
}

impl CapacityBudget {
    pub(crate) fn from_parts(
        project_days: i64,
        cycle_days: u32,
        hours_per_day: u32,
        efficiency_factor: f64,
        team_size: u32,
    ) -> Self {
        let effective_hours = f64::from(team_size)
            * f64::from(cycle_days)
            * f64::from(hours_per_day)
            * efficiency_factor;
        Self {
            project_days,
            cycle_days,
            hours_per_day,
            efficiency_factor,
            team_size,
            effective_hours,
        }
    }

    /// Returns the project length in calendar days.
    #[must_use]
    pub const fn project_days(&self) -> i64 {
        self.project_days
    }

    /// Returns the sprint cycle length in calendar days.
    #[must_use]
    pub const fn cycle_days(&self) -> u32 {
        self.cycle_days
    }

    /// Returns the development hours assumed per member per day.
    #[must_use]
    pub const fn hours_per_day(&self) -> u32 {
        self.hours_per_day
    }

    /// Returns the efficiency discount applied to raw capacity.
    #[must_use]
    pub const fn efficiency_factor(&self) -> f64 {
        self.efficiency_factor
    }

    /// Returns the number of team members.
    #[must_use]
    pub const fn team_size(&self) -> u32 {
        self.team_size
    }

    /// Returns the effective hours a sprint may hold.
    #[must_use]
    pub const fn effective_hours(&self) -> f64 {
        self.effective_hours
    }

    /// Returns how many cycles cover the project calendar, at least one.
    #[must_use]
    pub fn sprint_count(&self) -> u32 {
        let days = u64::try_from(self.project_days).unwrap_or(0);
        let cycle = u64::from(self.cycle_days.max(1));
        let count = days.div_ceil(cycle).max(1);
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    /// Applies the scalar values reported by a sprint proposal.
    ///
    /// Each value that is present replaces its computed counterpart; absent
    /// values keep the computed one. Values are not recombined, so an
    /// overridden cycle length does not change the effective hours.
    #[must_use]
    pub fn with_overrides(self, overrides: &CapacityOverrides) -> Self {
        Self {
            cycle_days: overrides.cycle_days.unwrap_or(self.cycle_days),
            hours_per_day: overrides.hours_per_day.unwrap_or(self.hours_per_day),
            effective_hours: overrides.effective_hours.unwrap_or(self.effective_hours),
            ..self
        }
    }
}

/// Scalar capacity values an oracle may report alongside its proposal.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CapacityOverrides {
    /// Reported cycle length in days.
    pub cycle_days: Option<u32>,
    /// Reported effective hours per sprint.
    pub effective_hours: Option<f64>,
    /// Reported development hours per day.
    pub hours_per_day: Option<u32>,
}

impl CapacityOverrides {
    /// Returns whether no override is present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.cycle_days.is_none() && self.effective_hours.is_none() && self.hours_per_day.is_none()
    }
}
