//! Silent corrections applied to drafted tasks.
//!
//! Out-of-range dates, priorities, and hour estimates are pulled back inside
//! the owning epic's bounds and reported at warn level. Only a date range
//! that cannot be repaired is an error.

use crate::planning::domain::{ConstraintViolation, Epic, Task};
use tracing::warn;

/// Which bounds a date clamp moved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClampOutcome {
    /// The start date was raised to the epic start.
    pub start_moved: bool,
    /// The end date was lowered to the epic end.
    pub end_moved: bool,
}

impl ClampOutcome {
    /// Returns whether the task was changed.
    #[must_use]
    pub const fn changed(&self) -> bool {
        self.start_moved || self.end_moved
    }
}

/// Constrains task dates to the owning epic's calendar window.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateClamp;

impl DateClamp {
    /// Clamps `task` into `epic`'s window. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`ConstraintViolation::DegenerateTaskRange`] when the clamped
    /// start falls after the clamped end; the task is left unchanged.
    pub fn apply(task: &mut Task, epic: &Epic) -> Result<ClampOutcome, ConstraintViolation> {
        let window = epic.schedule();
        let outcome = ClampOutcome {
            start_moved: task.start_date() < window.start(),
            end_moved: task.end_date() > window.end(),
        };
        let start = task.start_date().max(window.start());
        let end = task.end_date().min(window.end());
        if start > end {
            return Err(ConstraintViolation::DegenerateTaskRange {
                task: task.title().to_owned(),
                start,
                end,
            });
        }
        if outcome.start_moved {
            warn!(
                task = task.title(),
                epic_id = %epic.id(),
                from = %task.start_date(),
                to = %start,
                "task starts before its epic; clamped start date"
            );
        }
        if outcome.end_moved {
            warn!(
                task = task.title(),
                epic_id = %epic.id(),
                from = %task.end_date(),
                to = %end,
                "task ends after its epic; clamped end date"
            );
        }
        task.set_dates(start, end);
        Ok(outcome)
    }
}

/// Caps drafted priority and raw hours at the owning epic's ceilings.
#[derive(Debug, Clone, Copy, Default)]
pub struct CeilingClamp;

impl CeilingClamp {
    /// Lowers priority and raw hours above the epic's ceilings.
    ///
    /// Returns whether anything was changed.
    pub fn apply(task: &mut Task, epic: &Epic) -> bool {
        let mut changed = Self::apply_priority(task, epic);
        if task.expected_hours() > epic.hours_ceiling() {
            warn!(
                task = task.title(),
                epic_id = %epic.id(),
                hours = task.expected_hours(),
                ceiling = epic.hours_ceiling(),
                "drafted hours exceed epic ceiling; clamped"
            );
            task.set_expected_hours(epic.hours_ceiling());
            changed = true;
        }
        changed
    }

    /// Lowers a priority above the epic's ceiling.
    ///
    /// Hours are left alone, so this is safe on normalised tasks.
    pub fn apply_priority(task: &mut Task, epic: &Epic) -> bool {
        if task.priority() <= epic.priority_ceiling() {
            return false;
        }
        warn!(
            task = task.title(),
            epic_id = %epic.id(),
            priority = task.priority(),
            ceiling = epic.priority_ceiling(),
            "task priority exceeds epic ceiling; clamped"
        );
        task.set_priority(epic.priority_ceiling());
        true
    }
}
