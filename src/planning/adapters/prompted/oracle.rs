//! Backlog oracle backed by a text-completion endpoint.

use super::{
    extract::parse_reply,
    templates::{sprint_prompt, task_prompt},
};
use crate::planning::{
    domain::{SprintProposal, TaskDraft},
    ports::{BacklogOracle, OracleResult, SprintDraftRequest, TaskDraftRequest, TextCompletion},
};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct TaskReply {
    tasks: Vec<TaskDraft>,
}

/// Oracle that prompts a model and parses its JSON replies.
///
/// Replies are parsed strictly: any missing field makes the response
/// malformed. Content checks are left to the planning services.
pub struct PromptedBacklogOracle<C: TextCompletion> {
    completion: Arc<C>,
}

impl<C: TextCompletion> PromptedBacklogOracle<C> {
    /// Sampling temperature for task drafting.
    pub const TASK_TEMPERATURE: f32 = 0.6;
    /// Sampling temperature for sprint drafting.
    pub const SPRINT_TEMPERATURE: f32 = 0.5;

    /// Creates an oracle prompting `completion`.
    #[must_use]
    pub const fn new(completion: Arc<C>) -> Self {
        Self { completion }
    }
}

#[async_trait]
impl<C: TextCompletion> BacklogOracle for PromptedBacklogOracle<C> {
    async fn draft_tasks(&self, request: &TaskDraftRequest) -> OracleResult<Vec<TaskDraft>> {
        let prompt = task_prompt(request)?;
        let reply = self
            .completion
            .complete(&prompt, Self::TASK_TEMPERATURE)
            .await?;
        let parsed: TaskReply = parse_reply(&reply)?;
        debug!(epic_id = %request.epic_id, tasks = parsed.tasks.len(), "parsed task drafts");
        Ok(parsed.tasks)
    }

    async fn draft_sprints(&self, request: &SprintDraftRequest) -> OracleResult<SprintProposal> {
        let prompt = sprint_prompt(request)?;
        let reply = self
            .completion
            .complete(&prompt, Self::SPRINT_TEMPERATURE)
            .await?;
        let proposal: SprintProposal = parse_reply(&reply)?;
        debug!(sprints = proposal.sprints.len(), "parsed sprint proposal");
        Ok(proposal)
    }
}
