//! Deterministic backlog oracle.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::planning::{
    domain::{SprintProposal, TaskDraft},
    ports::{BacklogOracle, OracleError, OracleResult, SprintDraftRequest, TaskDraftRequest},
    services::SprintAllocator,
};

/// Oracle that drafts without a model.
///
/// Each epic gets one task spanning the whole epic window at the epic's
/// priority and hour ceilings, assigned round-robin across the member list.
/// Sprints are partitioned with [`SprintAllocator::pack`].
#[derive(Debug, Default)]
pub struct GreedyBacklogOracle {
    next_assignee: AtomicUsize,
}

impl GreedyBacklogOracle {
    /// Creates a greedy oracle starting with the first listed member.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BacklogOracle for GreedyBacklogOracle {
    async fn draft_tasks(&self, request: &TaskDraftRequest) -> OracleResult<Vec<TaskDraft>> {
        let turn = self.next_assignee.fetch_add(1, Ordering::Relaxed);
        let assignee = turn
            .checked_rem(request.member_names.len())
            .and_then(|slot| request.member_names.get(slot))
            .ok_or_else(|| OracleError::malformed("no project members to assign"))?;
        Ok(vec![TaskDraft {
            id: None,
            title: request.epic_title.clone(),
            description: request.use_case.clone(),
            assignee: assignee.clone(),
            start_date: request.start_date,
            end_date: request.end_date,
            priority: request.priority_ceiling,
            expected_workhours: request.hours_ceiling,
        }])
    }

    async fn draft_sprints(&self, request: &SprintDraftRequest) -> OracleResult<SprintProposal> {
        Ok(SprintAllocator::pack(request))
    }
}
