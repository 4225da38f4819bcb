//! Sprint allocation: validation of oracle proposals and greedy packing.

use super::{
    clamp::{CeilingClamp, DateClamp},
    error::{PlanningError, PlanningResult},
};
use crate::planning::{
    config::RebalancePolicy,
    domain::{
        Backlog, CapacityBudget, CapacityOverrides, CapacityWarning, ConstraintViolation,
        DateRange, Epic, Sprint, SprintDraft, SprintEpic, SprintEpicDraft, SprintPlan,
        SprintProposal, Task, TaskDraft,
    },
    ports::{QueuedTask, SprintDraftRequest},
};
use chrono::{Days, NaiveDate};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Verifies and corrects sprint partitions against the ordered backlog.
///
/// The allocator never invents a partition during validation: structural
/// faults abort the run, while capacity overruns are recorded as
/// [`CapacityWarning`]s and optionally trimmed according to the configured
/// [`RebalancePolicy`]. [`SprintAllocator::pack`] is the deterministic
/// greedy partitioner used when no model is involved.
#[derive(Debug, Clone, Copy, Default)]
pub struct SprintAllocator {
    policy: RebalancePolicy,
}

impl SprintAllocator {
    /// Creates an allocator applying `policy` to over-budget sprints.
    #[must_use]
    pub const fn new(policy: RebalancePolicy) -> Self {
        Self { policy }
    }

    /// Validates a proposed partition of `backlog`.
    ///
    /// Reported scalar overrides replace the matching budget values; every
    /// sprint must hold at least one epic, every epic at least one task, and
    /// every epic identifier must name a backlog epic.
    ///
    /// Each proposed task must match a backlog task of the same epic, by
    /// identifier when the draft carries one and by title otherwise, and may
    /// be placed only once. The backlog task supplies everything except the
    /// schedule: the proposed dates are kept and clamped into the epic's
    /// window, and the priority is capped at the epic ceiling.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningError::MalformedOracleResponse`] for unusable scalar
    /// overrides and for tasks absent from the backlog or placed twice, or a
    /// [`ConstraintViolation`] for structural faults.
    pub fn validate(
        &self,
        proposal: SprintProposal,
        backlog: &Backlog,
        budget: &CapacityBudget,
    ) -> PlanningResult<SprintPlan> {
        let overrides = proposal.overrides();
        check_overrides(&overrides)?;
        let effective = budget.with_overrides(&overrides);
        if !overrides.is_empty() {
            warn!(
                cycle_days = effective.cycle_days(),
                effective_hours = effective.effective_hours(),
                hours_per_day = effective.hours_per_day(),
                "oracle reported capacity values; overriding computed budget"
            );
        }
        if proposal.sprints.is_empty() {
            return Err(ConstraintViolation::NoSprintsProposed.into());
        }
        if let Some(reported) = proposal.number_of_sprints
            && reported != effective.sprint_count()
        {
            warn!(
                reported,
                expected = effective.sprint_count(),
                proposed = proposal.sprints.len(),
                "oracle sprint count differs from the computed cycle count"
            );
        }

        let mut sprints = Vec::with_capacity(proposal.sprints.len());
        let mut warnings = Vec::new();
        let mut placed = HashSet::new();
        for (index, draft) in proposal.sprints.into_iter().enumerate() {
            let mut sprint = build_sprint(draft, backlog, &mut placed)?;
            if let Some(warning) = self.check_capacity(index, &mut sprint, &effective) {
                warnings.push(warning);
            }
            sprints.push(sprint);
        }
        info!(
            sprints = sprints.len(),
            warnings = warnings.len(),
            "validated sprint partition"
        );
        Ok(SprintPlan::new(sprints, effective, warnings))
    }

    /// Partitions the request queue into sprints greedily.
    ///
    /// Tasks are taken in queue order; a new sprint is opened whenever adding
    /// the next task would push a non-empty sprint past the effective-hours
    /// budget. A single task larger than the budget gets a sprint of its own.
    #[must_use]
    pub fn pack(request: &SprintDraftRequest) -> SprintProposal {
        let mut bins: Vec<Vec<&QueuedTask>> = Vec::new();
        let mut current: Vec<&QueuedTask> = Vec::new();
        let mut load = 0.0;
        for queued in &request.queue {
            let hours = queued.task.expected_workhours;
            if !current.is_empty() && load + hours > request.effective_hours {
                bins.push(std::mem::take(&mut current));
                load = 0.0;
            }
            load += hours;
            current.push(queued);
        }
        if !current.is_empty() {
            bins.push(current);
        }

        let sprints: Vec<SprintDraft> = bins
            .iter()
            .enumerate()
            .map(|(index, bin)| draft_sprint(request, index, bin))
            .collect();
        debug!(sprints = sprints.len(), "packed backlog greedily");
        SprintProposal {
            number_of_sprints: u32::try_from(sprints.len()).ok(),
            sprints,
            sprint_days: Some(request.cycle_days),
            eff_mandays: Some(request.effective_hours),
            workhours_per_day: Some(request.hours_per_day),
        }
    }

    fn check_capacity(
        &self,
        index: usize,
        sprint: &mut Sprint,
        budget: &CapacityBudget,
    ) -> Option<CapacityWarning> {
        let workload = sprint.workload();
        let limit = budget.effective_hours();
        if workload <= limit {
            return None;
        }
        let rebalanced_workload = match self.policy {
            RebalancePolicy::Advisory => None,
            RebalancePolicy::TrimLowestPriority => Some(trim_to_fit(sprint, limit)),
        };
        warn!(
            sprint_index = index,
            sprint = sprint.title(),
            workload,
            budget = limit,
            rebalanced_workload,
            "sprint workload exceeds capacity budget"
        );
        Some(CapacityWarning {
            sprint_index: index,
            sprint: sprint.title().to_owned(),
            workload,
            budget: limit,
            rebalanced_workload,
        })
    }
}

fn check_overrides(overrides: &CapacityOverrides) -> PlanningResult<()> {
    if overrides.cycle_days == Some(0) {
        return Err(PlanningError::malformed("sprint_days must be positive"));
    }
    if overrides.hours_per_day == Some(0) {
        return Err(PlanningError::malformed("workhours_per_day must be positive"));
    }
    if let Some(hours) = overrides.effective_hours
        && !(hours.is_finite() && hours > 0.0)
    {
        return Err(PlanningError::malformed(format!(
            "eff_mandays must be a positive number, got {hours}"
        )));
    }
    Ok(())
}

fn build_sprint(
    draft: SprintDraft,
    backlog: &Backlog,
    placed: &mut HashSet<usize>,
) -> PlanningResult<Sprint> {
    let SprintDraft {
        title,
        description,
        start_date,
        end_date,
        epics,
    } = draft;
    if epics.is_empty() {
        return Err(ConstraintViolation::EmptySprintEpic { sprint: title }.into());
    }
    let schedule = DateRange::new(start_date, end_date)?;
    let groupings = epics
        .iter()
        .map(|grouping| build_grouping(&title, grouping, backlog, placed))
        .collect::<PlanningResult<Vec<_>>>()?;
    Ok(Sprint::new(title, description, schedule, groupings)?)
}

fn build_grouping(
    sprint: &str,
    grouping: &SprintEpicDraft,
    backlog: &Backlog,
    placed: &mut HashSet<usize>,
) -> PlanningResult<SprintEpic> {
    let epic_id = grouping.epic_id;
    if grouping.tasks.is_empty() {
        return Err(ConstraintViolation::EmptyEpicTasks {
            sprint: sprint.to_owned(),
            epic_id,
        }
        .into());
    }
    let epic = backlog
        .epic(epic_id)
        .ok_or_else(|| ConstraintViolation::UnknownEpic {
            sprint: sprint.to_owned(),
            epic_id,
        })?;
    let placed_tasks = grouping
        .tasks
        .iter()
        .map(|draft| place_task(sprint, draft, epic, backlog, placed))
        .collect::<PlanningResult<Vec<_>>>()?;
    Ok(SprintEpic::new(epic_id, placed_tasks))
}

/// Resolves a proposed task to its backlog counterpart.
///
/// `placed` holds the backlog positions already used by the proposal.
fn place_task(
    sprint: &str,
    draft: &TaskDraft,
    epic: &Epic,
    backlog: &Backlog,
    placed: &mut HashSet<usize>,
) -> PlanningResult<Task> {
    let (position, known) = backlog
        .tasks()
        .iter()
        .enumerate()
        .filter(|(position, task)| task.epic_id() == epic.id() && !placed.contains(position))
        .find(|(_, task)| match draft.id {
            Some(id) => task.id() == Some(id),
            None => task.title() == draft.title,
        })
        .ok_or_else(|| {
            PlanningError::malformed(format!(
                "sprint '{sprint}' proposes task '{}' that is not an unplaced backlog task of epic {}",
                draft.title,
                epic.id()
            ))
        })?;
    placed.insert(position);

    if draft.priority != known.priority()
        || (draft.expected_workhours - known.expected_hours()).abs() > f64::EPSILON
    {
        warn!(
            sprint,
            task = known.title(),
            proposed_priority = draft.priority,
            proposed_hours = draft.expected_workhours,
            priority = known.priority(),
            hours = known.expected_hours(),
            "oracle altered backlog task figures; keeping backlog values"
        );
    }
    let mut task = known.clone();
    task.set_dates(draft.start_date, draft.end_date);
    DateClamp::apply(&mut task, epic)?;
    CeilingClamp::apply_priority(&mut task, epic);
    Ok(task)
}

/// Removes hours from the lowest-priority tasks until the sprint fits.
///
/// Returns the resulting workload.
fn trim_to_fit(sprint: &mut Sprint, limit: f64) -> f64 {
    let mut excess = sprint.workload() - limit;
    let mut tasks: Vec<&mut Task> = sprint.tasks_mut().collect();
    tasks.sort_by_key(|task| task.priority());
    for task in tasks {
        if excess <= 0.0 {
            break;
        }
        let cut = task.expected_hours().min(excess);
        debug!(task = task.title(), cut, "trimmed task hours");
        task.set_expected_hours(task.expected_hours() - cut);
        excess -= cut;
    }
    sprint.workload()
}

fn draft_sprint(request: &SprintDraftRequest, index: usize, bin: &[&QueuedTask]) -> SprintDraft {
    let epics: Vec<SprintEpicDraft> = request
        .epics
        .iter()
        .filter_map(|brief| {
            let tasks: Vec<_> = bin
                .iter()
                .filter(|queued| queued.epic_id == brief.epic_id)
                .map(|queued| queued.task.clone())
                .collect();
            (!tasks.is_empty()).then_some(SprintEpicDraft {
                epic_id: brief.epic_id,
                tasks,
            })
        })
        .collect();
    let titles: Vec<&str> = request
        .epics
        .iter()
        .filter(|brief| epics.iter().any(|grouping| grouping.epic_id == brief.epic_id))
        .map(|brief| brief.title.as_str())
        .collect();
    let (start_date, end_date) = sprint_window(request, index);
    SprintDraft {
        title: format!("Sprint {}", index.saturating_add(1)),
        description: format!("Deliver {}.", titles.join(", ")),
        start_date,
        end_date,
        epics,
    }
}

/// Returns the calendar window of the `index`-th cycle.
///
/// Windows that start inside the project are cut at the project end; those
/// beyond it keep their full length.
fn sprint_window(request: &SprintDraftRequest, index: usize) -> (NaiveDate, NaiveDate) {
    let cycle = u64::from(request.cycle_days);
    let offset = u64::try_from(index)
        .unwrap_or(u64::MAX)
        .saturating_mul(cycle);
    let start = request
        .project_start
        .checked_add_days(Days::new(offset))
        .unwrap_or(NaiveDate::MAX);
    let full_end = start
        .checked_add_days(Days::new(cycle.saturating_sub(1)))
        .unwrap_or(NaiveDate::MAX);
    let end = if start <= request.project_end {
        full_end.min(request.project_end)
    } else {
        full_end
    };
    (start, end)
}
