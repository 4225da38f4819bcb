//! Backlog oracle port: the untrusted collaborator that drafts tasks and
//! proposes sprint partitions.

use crate::planning::domain::{
    Backlog, CapacityBudget, DateRange, Epic, EpicId, Feature, SprintProposal, TaskDraft,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

/// Result type for oracle operations.
pub type OracleResult<T> = Result<T, OracleError>;

/// Request for drafting the tasks of one epic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskDraftRequest {
    /// Epic identifier.
    pub epic_id: EpicId,
    /// Epic title.
    pub epic_title: String,
    /// Usage scenario of the parent feature.
    pub use_case: String,
    /// Input data of the parent feature.
    pub input: String,
    /// Output data of the parent feature.
    pub output: String,
    /// First day drafted tasks may start.
    pub start_date: NaiveDate,
    /// Last day drafted tasks may end.
    pub end_date: NaiveDate,
    /// Highest priority a drafted task may carry.
    pub priority_ceiling: u32,
    /// Highest raw hour estimate a drafted task may carry.
    pub hours_ceiling: f64,
    /// Names of project members, in roster order.
    pub member_names: Vec<String>,
}

impl TaskDraftRequest {
    /// Builds a drafting request for `epic` from its parent feature.
    #[must_use]
    pub fn new(epic: &Epic, feature: &Feature, member_names: Vec<String>) -> Self {
        Self {
            epic_id: epic.id(),
            epic_title: epic.title().to_owned(),
            use_case: feature.use_case.clone(),
            input: feature.input.clone(),
            output: feature.output.clone(),
            start_date: epic.schedule().start(),
            end_date: epic.schedule().end(),
            priority_ceiling: epic.priority_ceiling(),
            hours_ceiling: epic.hours_ceiling(),
            member_names,
        }
    }
}

/// Epic with its tasks as presented to the oracle for sprint drafting.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EpicBrief {
    /// Epic identifier the oracle must echo verbatim.
    pub epic_id: EpicId,
    /// Epic title.
    pub title: String,
    /// Summed task priority.
    pub priority_sum: u64,
    /// Tasks in priority order.
    pub tasks: Vec<TaskDraft>,
}

/// One entry of the flat packing queue.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueuedTask {
    /// Owning epic.
    pub epic_id: EpicId,
    /// The task.
    pub task: TaskDraft,
}

/// Request for partitioning the backlog into sprints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SprintDraftRequest {
    /// Epics with their tasks, in backlog order.
    pub epics: Vec<EpicBrief>,
    /// All tasks in packing order.
    pub queue: Vec<QueuedTask>,
    /// Sprint cycle length in days.
    pub cycle_days: u32,
    /// Effective hours one sprint may hold.
    pub effective_hours: f64,
    /// Development hours per member per day.
    pub hours_per_day: u32,
    /// Number of cycles covering the project.
    pub sprint_count: u32,
    /// Project calendar.
    pub project_start: NaiveDate,
    /// Last project day.
    pub project_end: NaiveDate,
}

impl SprintDraftRequest {
    /// Builds a sprint drafting request from the ordered backlog.
    #[must_use]
    pub fn new(backlog: &Backlog, budget: &CapacityBudget, schedule: DateRange) -> Self {
        let epics = backlog
            .grouped()
            .into_iter()
            .map(|(ranked, tasks)| EpicBrief {
                epic_id: ranked.epic().id(),
                title: ranked.epic().title().to_owned(),
                priority_sum: ranked.priority_sum(),
                tasks: tasks.into_iter().map(|task| task.to_draft()).collect(),
            })
            .collect();
        let queue = backlog
            .tasks()
            .iter()
            .map(|task| QueuedTask {
                epic_id: task.epic_id(),
                task: task.to_draft(),
            })
            .collect();
        Self {
            epics,
            queue,
            cycle_days: budget.cycle_days(),
            effective_hours: budget.effective_hours(),
            hours_per_day: budget.hours_per_day(),
            sprint_count: budget.sprint_count(),
            project_start: schedule.start(),
            project_end: schedule.end(),
        }
    }
}

/// Content-generation collaborator that proposes drafts.
///
/// Implementations are nondeterministic; every response is validated and
/// corrected by the planning services before use.
#[async_trait]
pub trait BacklogOracle: Send + Sync {
    /// Drafts the tasks of one epic.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError::Malformed`] when the response cannot be read as
    /// task drafts, or [`OracleError::Unavailable`] when the oracle cannot be
    /// reached.
    async fn draft_tasks(&self, request: &TaskDraftRequest) -> OracleResult<Vec<TaskDraft>>;

    /// Proposes a sprint partition of the backlog.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError::Malformed`] when the response cannot be read as
    /// a sprint proposal, or [`OracleError::Unavailable`] when the oracle
    /// cannot be reached.
    async fn draft_sprints(&self, request: &SprintDraftRequest) -> OracleResult<SprintProposal>;
}

/// Errors returned by oracle adapters.
#[derive(Debug, Clone, Error)]
pub enum OracleError {
    /// The response is missing required fields or cannot be parsed.
    #[error("malformed oracle response: {0}")]
    Malformed(String),

    /// The oracle could not be reached or failed to answer.
    #[error("oracle unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl OracleError {
    /// Builds a malformed-response error.
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed(reason.into())
    }

    /// Wraps a transport or runtime error.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}
