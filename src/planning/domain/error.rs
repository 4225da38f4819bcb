//! Constraint violations raised while validating planning data.

use super::{EpicId, ProjectId};
use chrono::NaiveDate;
use thiserror::Error;

/// Fatal constraint violations detected by the deterministic planning layer.
///
/// Every variant carries the offending identifier, name, or value so a
/// failed run can be diagnosed without re-running it.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConstraintViolation {
    /// The project calendar or team size cannot produce a capacity budget.
    #[error("invalid project range {start}..{end} for a team of {team_size}")]
    InvalidProjectRange {
        /// Project start date.
        start: NaiveDate,
        /// Project end date.
        end: NaiveDate,
        /// Number of team members.
        team_size: usize,
    },

    /// A date range ends before it starts.
    #[error("invalid date range: end {end} precedes start {start}")]
    InvalidDateRange {
        /// Range start date.
        start: NaiveDate,
        /// Range end date.
        end: NaiveDate,
    },

    /// Clamping a task to its epic produced an inverted range.
    #[error("task '{task}' has degenerate range {start}..{end} after clamping to its epic")]
    DegenerateTaskRange {
        /// Task title.
        task: String,
        /// Clamped start date.
        start: NaiveDate,
        /// Clamped end date.
        end: NaiveDate,
    },

    /// An hour figure is negative or not a finite number.
    #[error("invalid workload value {value} for '{context}', expected a non-negative number")]
    InvalidWorkloadValue {
        /// Task or epic the value belongs to.
        context: String,
        /// The rejected value.
        value: f64,
    },

    /// A task names an assignee that is not a known project member.
    #[error(
        "assignee '{name}' of task '{task}' is not a project member (known: {})",
        .known.join(", ")
    )]
    UnresolvedAssignee {
        /// Task title.
        task: String,
        /// Unmatched assignee name.
        name: String,
        /// Names that could have matched.
        known: Vec<String>,
    },

    /// None of the project's member references resolved to a named member.
    #[error("project has no members with resolvable names")]
    NoResolvableMembers,

    /// A proposed sprint contains no epics.
    #[error("sprint '{sprint}' contains no epics")]
    EmptySprintEpic {
        /// Sprint title.
        sprint: String,
    },

    /// A proposed sprint groups an epic without any tasks.
    #[error("epic {epic_id} in sprint '{sprint}' contains no tasks")]
    EmptyEpicTasks {
        /// Sprint title.
        sprint: String,
        /// Epic identifier.
        epic_id: EpicId,
    },

    /// A proposed sprint references an epic outside the backlog.
    #[error("sprint '{sprint}' references unknown epic {epic_id}")]
    UnknownEpic {
        /// Sprint title.
        sprint: String,
        /// Unrecognised epic identifier.
        epic_id: EpicId,
    },

    /// The project has no epics to plan.
    #[error("project {project_id} has no epics to plan")]
    EmptyBacklog {
        /// Project identifier.
        project_id: ProjectId,
    },

    /// The sprint proposal contains no sprints at all.
    #[error("sprint proposal contains no sprints")]
    NoSprintsProposed,
}

impl ConstraintViolation {
    /// Builds an [`InvalidWorkloadValue`](Self::InvalidWorkloadValue) violation.
    #[must_use]
    pub fn invalid_workload(context: impl Into<String>, value: f64) -> Self {
        Self::InvalidWorkloadValue {
            context: context.into(),
            value,
        }
    }
}

/// Returns `value` when it is a finite, non-negative hour figure.
pub(crate) fn checked_hours(context: &str, value: f64) -> Result<f64, ConstraintViolation> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ConstraintViolation::invalid_workload(context, value))
    }
}
