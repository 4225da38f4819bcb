//! Reinjection of pending tasks from a previous planning run.

use super::error::{EntityKind, PlanningError, PlanningResult, bounded};
use crate::planning::{
    domain::{Backlog, TaskId},
    ports::PlanningStore,
};
use std::time::Duration;
use tracing::{info, warn};

/// Moves unfinished tasks to the front of the backlog queue.
///
/// Each pending task is placed at the head in turn, so the last identifier
/// processed ends up first. Tasks already in the backlog are left where they
/// are.
pub struct PendingTaskReinjector<'store, S: PlanningStore> {
    store: &'store S,
    timeout: Duration,
}

impl<'store, S: PlanningStore> PendingTaskReinjector<'store, S> {
    /// Creates a reinjector reading through `store`.
    #[must_use]
    pub const fn new(store: &'store S, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    /// Reinjects `pending` into `backlog`.
    ///
    /// Returns the identifiers that were moved to the front, in processing
    /// order. A pending task whose epic is not part of the backlog has that
    /// epic looked up in the store; when it exists the task is skipped with a
    /// warning.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningError::NotFound`] when a pending identifier or its
    /// epic is not stored, or a store error.
    pub async fn reinject(
        &self,
        backlog: &mut Backlog,
        pending: &[TaskId],
    ) -> PlanningResult<Vec<TaskId>> {
        let mut reinjected = Vec::with_capacity(pending.len());
        for &task_id in pending {
            if backlog.contains_task(task_id) {
                continue;
            }
            let task = bounded("find_task", self.timeout, self.store.find_task(task_id))
                .await?
                .ok_or_else(|| PlanningError::not_found(EntityKind::Task, task_id))?;
            if backlog.epic(task.epic_id()).is_none() {
                let epic_id = task.epic_id();
                let owner = bounded("find_epic", self.timeout, self.store.find_epic(epic_id))
                    .await?
                    .ok_or_else(|| PlanningError::not_found(EntityKind::Epic, epic_id))?;
                warn!(
                    %task_id,
                    %epic_id,
                    project_id = %owner.project_id(),
                    "pending task belongs to an epic outside this backlog; skipped"
                );
                continue;
            }
            backlog.insert_front(task);
            reinjected.push(task_id);
        }
        if !reinjected.is_empty() {
            info!(count = reinjected.len(), "reinjected pending tasks");
        }
        Ok(reinjected)
    }
}
