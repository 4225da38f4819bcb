//! Orchestration of one sprint-planning run.

use super::{
    allocator::SprintAllocator,
    assignee::AssigneeDirectory,
    capacity::CapacityModel,
    clamp::{CeilingClamp, DateClamp},
    error::{EntityKind, PlanningError, PlanningResult, bounded},
    priority::PriorityAggregator,
    reinjection::PendingTaskReinjector,
    workload::WorkloadNormalizer,
};
use crate::planning::{
    config::PlanningConfig,
    domain::{
        CapacityBudget, CapacityWarning, ConstraintViolation, Epic, EpicBacklog, Member,
        PlanningRunOutput, Project, ProjectId, Sprint, Task, TaskId,
    },
    ports::{BacklogOracle, PlanningStore, SprintDraftRequest, TaskDraftRequest},
};
use futures::{StreamExt, TryStreamExt, stream};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Request payload for a planning run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanSprintRequest {
    project_id: ProjectId,
    pending_task_ids: Vec<TaskId>,
}

impl PlanSprintRequest {
    /// Creates a request for the given project with no pending tasks.
    #[must_use]
    pub const fn new(project_id: ProjectId) -> Self {
        Self {
            project_id,
            pending_task_ids: Vec::new(),
        }
    }

    /// Sets the tasks that must be carried into the next sprint.
    #[must_use]
    pub fn with_pending(mut self, task_ids: impl IntoIterator<Item = TaskId>) -> Self {
        self.pending_task_ids = task_ids.into_iter().collect();
        self
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the pending task identifiers in caller order.
    #[must_use]
    pub fn pending_task_ids(&self) -> &[TaskId] {
        &self.pending_task_ids
    }
}

/// Result of a successful planning run.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanningOutcome {
    /// The actionable first sprint with resolved assignees.
    pub output: PlanningRunOutput,
    /// Summed expected hours of the actionable sprint.
    pub workload: f64,
    /// Budget the partition was validated against.
    pub capacity: CapacityBudget,
    /// Later sprints, descriptive only.
    pub staged: Vec<Sprint>,
    /// Soft capacity overruns.
    pub warnings: Vec<CapacityWarning>,
    /// Pending tasks moved to the front of the backlog.
    pub reinjected: Vec<TaskId>,
}

/// Sprint-planning orchestration service.
///
/// One call to [`SprintPlanningService::plan`] is one request-scoped run;
/// the service holds no state across runs.
#[derive(Clone)]
pub struct SprintPlanningService<S, O>
where
    S: PlanningStore,
    O: BacklogOracle,
{
    store: Arc<S>,
    oracle: Arc<O>,
    config: PlanningConfig,
}

impl<S, O> SprintPlanningService<S, O>
where
    S: PlanningStore,
    O: BacklogOracle,
{
    /// Creates a new planning service.
    #[must_use]
    pub const fn new(store: Arc<S>, oracle: Arc<O>, config: PlanningConfig) -> Self {
        Self {
            store,
            oracle,
            config,
        }
    }

    /// Returns the run configuration.
    #[must_use]
    pub const fn config(&self) -> &PlanningConfig {
        &self.config
    }

    /// Plans the next sprint of a project.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningError`] when a referenced record is missing, the
    /// oracle output is malformed or uncorrectable, or a collaborator fails
    /// or times out. No partial output is produced.
    pub async fn plan(&self, request: PlanSprintRequest) -> PlanningResult<PlanningOutcome> {
        let project_id = request.project_id();
        info!(%project_id, pending = request.pending_task_ids().len(), "starting sprint planning run");

        let project = self.load_project(project_id).await?;
        let members = self.load_members(&project).await?;
        let schedule = project.schedule();
        let budget = CapacityModel::new(self.config.efficiency_factor).budget(
            schedule.start(),
            schedule.end(),
            project.team_size(),
        )?;
        let directory = AssigneeDirectory::from_members(&members)?;
        let member_names: Vec<String> = members
            .iter()
            .filter(|member| !member.name.trim().is_empty())
            .map(|member| member.name.clone())
            .collect();

        let epics = bounded(
            "list_epics",
            self.config.store_timeout(),
            self.store.list_epics(project_id),
        )
        .await?;
        if epics.is_empty() {
            return Err(ConstraintViolation::EmptyBacklog { project_id }.into());
        }
        let backlogs: Vec<EpicBacklog> = stream::iter(epics)
            .map(|epic| self.epic_backlog(epic, &member_names))
            .buffered(self.config.drafting_concurrency.max(1))
            .try_collect()
            .await?;

        let mut backlog = PriorityAggregator::rank(backlogs);
        let reinjected = PendingTaskReinjector::new(&*self.store, self.config.store_timeout())
            .reinject(&mut backlog, request.pending_task_ids())
            .await?;
        let normalizer = WorkloadNormalizer::from_budget(&budget).ok_or_else(|| {
            ConstraintViolation::InvalidProjectRange {
                start: schedule.start(),
                end: schedule.end(),
                team_size: project.team_size(),
            }
        })?;
        normalizer.normalize_backlog(&mut backlog)?;

        let sprint_request = SprintDraftRequest::new(&backlog, &budget, schedule);
        let proposal = bounded(
            "draft_sprints",
            self.config.oracle_timeout(),
            self.oracle.draft_sprints(&sprint_request),
        )
        .await?;
        let plan = SprintAllocator::new(self.config.rebalance).validate(proposal, &backlog, &budget)?;

        let (sprints, capacity, warnings) = plan.into_parts();
        let mut ordered = sprints.into_iter();
        let actionable = ordered.next().ok_or(ConstraintViolation::NoSprintsProposed)?;
        let output = directory.resolve_sprint(&actionable)?;
        let staged: Vec<Sprint> = ordered.collect();
        let workload = actionable.workload();
        info!(
            %project_id,
            sprint = actionable.title(),
            workload,
            budget = capacity.effective_hours(),
            staged = staged.len(),
            warnings = warnings.len(),
            "sprint planning run completed"
        );
        Ok(PlanningOutcome {
            output,
            workload,
            capacity,
            staged,
            warnings,
            reinjected,
        })
    }

    async fn load_project(&self, project_id: ProjectId) -> PlanningResult<Project> {
        bounded(
            "find_project",
            self.config.store_timeout(),
            self.store.find_project(project_id),
        )
        .await?
        .ok_or_else(|| PlanningError::not_found(EntityKind::Project, project_id))
    }

    async fn load_members(&self, project: &Project) -> PlanningResult<Vec<Member>> {
        let mut members = Vec::with_capacity(project.team_size());
        for &member_id in project.member_refs() {
            let found = bounded(
                "find_member",
                self.config.store_timeout(),
                self.store.find_member(member_id),
            )
            .await?;
            match found {
                Some(member) => members.push(member),
                None => warn!(%member_id, "project member record not found; skipped"),
            }
        }
        Ok(members)
    }

    /// Loads the stored tasks of `epic`, drafting them when there are none.
    async fn epic_backlog(&self, epic: Epic, member_names: &[String]) -> PlanningResult<EpicBacklog> {
        let stored = bounded(
            "list_tasks_by_epic",
            self.config.store_timeout(),
            self.store.list_tasks_by_epic(epic.id()),
        )
        .await?;
        if !stored.is_empty() {
            debug!(epic_id = %epic.id(), tasks = stored.len(), "reusing stored tasks");
            return Ok(EpicBacklog::new(epic, stored));
        }
        let drafted = self.draft_tasks(&epic, member_names).await?;
        Ok(EpicBacklog::new(epic, drafted))
    }

    async fn draft_tasks(&self, epic: &Epic, member_names: &[String]) -> PlanningResult<Vec<Task>> {
        let feature = bounded(
            "find_feature",
            self.config.store_timeout(),
            self.store.find_feature(epic.feature_id()),
        )
        .await?
        .ok_or_else(|| PlanningError::not_found(EntityKind::Feature, epic.feature_id()))?;
        let request = TaskDraftRequest::new(epic, &feature, member_names.to_vec());
        let drafts = bounded(
            "draft_tasks",
            self.config.oracle_timeout(),
            self.oracle.draft_tasks(&request),
        )
        .await?;
        if drafts.is_empty() {
            return Err(PlanningError::malformed(format!(
                "oracle drafted no tasks for epic {}",
                epic.id()
            )));
        }
        let tasks = drafts
            .into_iter()
            .map(|draft| {
                let mut task = Task::from_draft(draft, epic.id())?;
                CeilingClamp::apply(&mut task, epic);
                DateClamp::apply(&mut task, epic)?;
                Ok(task)
            })
            .collect::<Result<Vec<_>, ConstraintViolation>>()?;
        info!(epic_id = %epic.id(), tasks = tasks.len(), "drafted epic tasks");

        if self.config.persist_drafted_tasks {
            return bounded(
                "store_tasks",
                self.config.store_timeout(),
                self.store.store_tasks(epic.id(), &tasks),
            )
            .await;
        }
        Ok(tasks)
    }
}
