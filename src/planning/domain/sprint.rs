//! Sprint proposals, validated sprints, and capacity warnings.

use super::{CapacityBudget, CapacityOverrides, ConstraintViolation, DateRange, EpicId, Task, TaskDraft};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Epic grouping inside a proposed sprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SprintEpicDraft {
    /// Backlog epic identifier, expected verbatim.
    pub epic_id: EpicId,
    /// Tasks scheduled for the epic in this sprint.
    #[serde(default)]
    pub tasks: Vec<TaskDraft>,
}

/// Sprint as proposed by the oracle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SprintDraft {
    /// Sprint title.
    pub title: String,
    /// One-sentence sprint description.
    pub description: String,
    /// First day of the sprint.
    pub start_date: NaiveDate,
    /// Last day of the sprint.
    pub end_date: NaiveDate,
    /// Epic groupings in delivery order.
    #[serde(default)]
    pub epics: Vec<SprintEpicDraft>,
}

/// Complete sprint partition returned by the oracle.
///
/// The scalar fields are optional: an omitted value keeps the locally
/// computed one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SprintProposal {
    /// Proposed sprints in delivery order.
    pub sprints: Vec<SprintDraft>,
    /// Cycle length the oracle planned with.
    #[serde(default)]
    pub sprint_days: Option<u32>,
    /// Effective hours per sprint the oracle planned with.
    #[serde(default)]
    pub eff_mandays: Option<f64>,
    /// Daily hours the oracle planned with.
    #[serde(default)]
    pub workhours_per_day: Option<u32>,
    /// Number of sprints the oracle reports.
    #[serde(default)]
    pub number_of_sprints: Option<u32>,
}

impl SprintProposal {
    /// Returns the capacity values the proposal reports.
    #[must_use]
    pub const fn overrides(&self) -> CapacityOverrides {
        CapacityOverrides {
            cycle_days: self.sprint_days,
            effective_hours: self.eff_mandays,
            hours_per_day: self.workhours_per_day,
        }
    }
}

/// Epic grouping inside a validated sprint; never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct SprintEpic {
    epic_id: EpicId,
    tasks: Vec<Task>,
}

impl SprintEpic {
    /// Groups tasks under an epic.
    #[must_use]
    pub const fn new(epic_id: EpicId, tasks: Vec<Task>) -> Self {
        Self { epic_id, tasks }
    }

    /// Returns the epic identifier.
    #[must_use]
    pub const fn epic_id(&self) -> EpicId {
        self.epic_id
    }

    /// Returns the grouped tasks.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }
}

/// Validated sprint.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprint {
    title: String,
    description: String,
    schedule: DateRange,
    epics: Vec<SprintEpic>,
}

impl Sprint {
    /// Creates a sprint, rejecting empty groupings.
    ///
    /// # Errors
    ///
    /// Returns [`ConstraintViolation::EmptySprintEpic`] when `epics` is empty
    /// or [`ConstraintViolation::EmptyEpicTasks`] when any grouping has no
    /// tasks.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        schedule: DateRange,
        epics: Vec<SprintEpic>,
    ) -> Result<Self, ConstraintViolation> {
        let sprint_title = title.into();
        if epics.is_empty() {
            return Err(ConstraintViolation::EmptySprintEpic {
                sprint: sprint_title,
            });
        }
        if let Some(empty) = epics.iter().find(|grouping| grouping.tasks.is_empty()) {
            return Err(ConstraintViolation::EmptyEpicTasks {
                sprint: sprint_title,
                epic_id: empty.epic_id,
            });
        }
        Ok(Self {
            title: sprint_title,
            description: description.into(),
            schedule,
            epics,
        })
    }

    /// Returns the sprint title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the sprint description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the sprint calendar window.
    #[must_use]
    pub const fn schedule(&self) -> DateRange {
        self.schedule
    }

    /// Returns the epic groupings in delivery order.
    #[must_use]
    pub fn epics(&self) -> &[SprintEpic] {
        &self.epics
    }

    /// Iterates over every task in the sprint.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.epics.iter().flat_map(|grouping| grouping.tasks.iter())
    }

    /// Returns the summed expected hours of all tasks.
    #[must_use]
    pub fn workload(&self) -> f64 {
        self.tasks().map(Task::expected_hours).sum()
    }

    pub(crate) fn tasks_mut(&mut self) -> impl Iterator<Item = &mut Task> {
        self.epics
            .iter_mut()
            .flat_map(|grouping| grouping.tasks.iter_mut())
    }
}

/// Soft violation: a sprint holds more work than the capacity budget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CapacityWarning {
    /// Position of the sprint in delivery order.
    pub sprint_index: usize,
    /// Sprint title.
    pub sprint: String,
    /// Workload as proposed.
    pub workload: f64,
    /// Effective-hours budget the workload exceeded.
    pub budget: f64,
    /// Workload after local trimming, when trimming was applied.
    pub rebalanced_workload: Option<f64>,
}

/// Validated sprint partition.
#[derive(Debug, Clone, PartialEq)]
pub struct SprintPlan {
    sprints: Vec<Sprint>,
    budget: CapacityBudget,
    warnings: Vec<CapacityWarning>,
}

impl SprintPlan {
    pub(crate) const fn new(
        sprints: Vec<Sprint>,
        budget: CapacityBudget,
        warnings: Vec<CapacityWarning>,
    ) -> Self {
        Self {
            sprints,
            budget,
            warnings,
        }
    }

    /// Returns all sprints in delivery order.
    #[must_use]
    pub fn sprints(&self) -> &[Sprint] {
        &self.sprints
    }

    /// Returns the sprint selected for execution.
    #[must_use]
    pub fn actionable(&self) -> Option<&Sprint> {
        self.sprints.first()
    }

    /// Returns the sprints after the actionable one.
    #[must_use]
    pub fn staged(&self) -> &[Sprint] {
        self.sprints.get(1..).unwrap_or_default()
    }

    /// Returns the budget the partition was validated against.
    #[must_use]
    pub const fn budget(&self) -> &CapacityBudget {
        &self.budget
    }

    /// Returns capacity warnings raised during validation.
    #[must_use]
    pub fn warnings(&self) -> &[CapacityWarning] {
        &self.warnings
    }

    pub(crate) fn into_parts(self) -> (Vec<Sprint>, CapacityBudget, Vec<CapacityWarning>) {
        (self.sprints, self.budget, self.warnings)
    }
}
