//! Priority aggregation and backlog ordering.

use crate::planning::domain::{Backlog, EpicBacklog, RankedEpic, Task};
use tracing::debug;

/// Orders epics and tasks by priority.
///
/// Both sorts are stable: entries with equal priority keep their prior
/// relative order.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriorityAggregator;

impl PriorityAggregator {
    /// Returns the summed priority of `tasks`.
    #[must_use]
    pub fn priority_sum(tasks: &[Task]) -> u64 {
        tasks.iter().map(|task| u64::from(task.priority())).sum()
    }

    /// Sorts tasks by descending priority.
    pub fn sort_tasks(tasks: &mut [Task]) {
        tasks.sort_by(|left, right| right.priority().cmp(&left.priority()));
    }

    /// Builds the ordered backlog from epics in load order.
    #[must_use]
    pub fn rank(backlogs: Vec<EpicBacklog>) -> Backlog {
        let mut epics = Vec::with_capacity(backlogs.len());
        let mut tasks = Vec::new();
        for EpicBacklog {
            epic,
            tasks: epic_tasks,
        } in backlogs
        {
            let priority_sum = Self::priority_sum(&epic_tasks);
            debug!(epic_id = %epic.id(), title = epic.title(), priority_sum, "aggregated epic priority");
            epics.push(RankedEpic::new(epic, priority_sum));
            tasks.extend(epic_tasks);
        }
        Self::sort_tasks(&mut tasks);
        epics.sort_by(|left, right| right.priority_sum().cmp(&left.priority_sum()));
        Backlog::from_ordered(epics, tasks)
    }
}
