//! Tasks and the oracle's task drafts.

use super::{ConstraintViolation, EpicId, TaskId, error::checked_hours};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Task as proposed by the oracle, before any sanitising.
///
/// Field names follow the oracle wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    /// Identifier of an already persisted task, passed through verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TaskId>,
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Assignee display name.
    pub assignee: String,
    /// Proposed first day of work.
    pub start_date: NaiveDate,
    /// Proposed last day of work.
    pub end_date: NaiveDate,
    /// Proposed priority.
    pub priority: u32,
    /// Estimated effort in hours.
    #[serde(rename = "expected_workhours")]
    pub expected_workhours: f64,
}

/// Parameter object for constructing a [`Task`].
#[derive(Debug, Clone, PartialEq)]
pub struct TaskParams {
    /// Persisted identifier, absent until the store assigns one.
    pub id: Option<TaskId>,
    /// Owning epic.
    pub epic_id: EpicId,
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Assignee display name.
    pub assignee: String,
    /// First day of work.
    pub start_date: NaiveDate,
    /// Last day of work.
    pub end_date: NaiveDate,
    /// Priority within the owning epic.
    pub priority: u32,
    /// Expected effort in hours.
    pub expected_hours: f64,
}

/// Unit of assignable work owned by exactly one epic and one assignee.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    id: Option<TaskId>,
    epic_id: EpicId,
    title: String,
    description: String,
    assignee: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    priority: u32,
    expected_hours: f64,
}

impl Task {
    /// Creates a validated task.
    ///
    /// # Errors
    ///
    /// Returns [`ConstraintViolation::InvalidWorkloadValue`] when the expected
    /// hours are negative or not finite.
    pub fn new(params: TaskParams) -> Result<Self, ConstraintViolation> {
        let TaskParams {
            id,
            epic_id,
            title,
            description,
            assignee,
            start_date,
            end_date,
            priority,
            expected_hours,
        } = params;
        let checked = checked_hours(&title, expected_hours)?;
        Ok(Self {
            id,
            epic_id,
            title,
            description,
            assignee,
            start_date,
            end_date,
            priority,
            expected_hours: checked,
        })
    }

    /// Converts an oracle draft into a task owned by `epic_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ConstraintViolation::InvalidWorkloadValue`] when the drafted
    /// hours are negative or not finite.
    pub fn from_draft(draft: TaskDraft, epic_id: EpicId) -> Result<Self, ConstraintViolation> {
        Self::new(TaskParams {
            id: draft.id,
            epic_id,
            title: draft.title,
            description: draft.description,
            assignee: draft.assignee,
            start_date: draft.start_date,
            end_date: draft.end_date,
            priority: draft.priority,
            expected_hours: draft.expected_workhours,
        })
    }

    /// Renders the task in oracle wire format.
    #[must_use]
    pub fn to_draft(&self) -> TaskDraft {
        TaskDraft {
            id: self.id,
            title: self.title.clone(),
            description: self.description.clone(),
            assignee: self.assignee.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            priority: self.priority,
            expected_workhours: self.expected_hours,
        }
    }

    /// Returns a copy of the task carrying the given persisted identifier.
    #[must_use]
    pub const fn with_id(mut self, id: TaskId) -> Self {
        self.id = Some(id);
        self
    }

    /// Returns the persisted identifier, if any.
    #[must_use]
    pub const fn id(&self) -> Option<TaskId> {
        self.id
    }

    /// Returns the owning epic identifier.
    #[must_use]
    pub const fn epic_id(&self) -> EpicId {
        self.epic_id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the task description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the assignee display name.
    #[must_use]
    pub fn assignee(&self) -> &str {
        &self.assignee
    }

    /// Returns the first day of work.
    #[must_use]
    pub const fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Returns the last day of work.
    #[must_use]
    pub const fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Returns the task priority.
    #[must_use]
    pub const fn priority(&self) -> u32 {
        self.priority
    }

    /// Returns the expected effort in hours.
    #[must_use]
    pub const fn expected_hours(&self) -> f64 {
        self.expected_hours
    }

    pub(crate) const fn set_dates(&mut self, start_date: NaiveDate, end_date: NaiveDate) {
        self.start_date = start_date;
        self.end_date = end_date;
    }

    pub(crate) const fn set_priority(&mut self, priority: u32) {
        self.priority = priority;
    }

    pub(crate) const fn set_expected_hours(&mut self, hours: f64) {
        self.expected_hours = hours;
    }
}
