//! Externally consumed result of a planning run.

use super::{EpicId, MemberId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Header of the sprint selected for execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SprintSummary {
    /// Sprint title.
    pub title: String,
    /// Sprint description.
    pub description: String,
    /// First day of the sprint.
    pub start_date: NaiveDate,
    /// Last day of the sprint.
    pub end_date: NaiveDate,
}

/// Task with its assignee resolved to a member identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedTask {
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Resolved assignee.
    pub assignee_id: MemberId,
    /// First day of work.
    pub start_date: NaiveDate,
    /// Last day of work.
    pub end_date: NaiveDate,
    /// Task priority.
    pub priority: u32,
}

/// Tasks of one epic inside the actionable sprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpicAssignment {
    /// Epic identifier.
    pub epic_id: EpicId,
    /// Resolved tasks of the epic.
    pub tasks: Vec<AssignedTask>,
}

/// The only artifact of a planning run consumed outside this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanningRunOutput {
    /// Sprint header.
    pub sprint: SprintSummary,
    /// Epic groupings with resolved tasks.
    pub epics: Vec<EpicAssignment>,
}
