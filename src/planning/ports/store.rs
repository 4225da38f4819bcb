//! Store port for the planning data the run reads and the tasks it writes.

use crate::planning::domain::{
    Epic, EpicId, Feature, FeatureId, Member, MemberId, Project, ProjectId, Task, TaskId,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for planning store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Planning data access contract.
///
/// Lookups return `None` for absent records; only infrastructure failures
/// surface as errors.
#[async_trait]
pub trait PlanningStore: Send + Sync {
    /// Finds a project by identifier.
    async fn find_project(&self, id: ProjectId) -> StoreResult<Option<Project>>;

    /// Finds a member by identifier.
    async fn find_member(&self, id: MemberId) -> StoreResult<Option<Member>>;

    /// Finds a feature by identifier.
    async fn find_feature(&self, id: FeatureId) -> StoreResult<Option<Feature>>;

    /// Finds an epic by identifier.
    async fn find_epic(&self, id: EpicId) -> StoreResult<Option<Epic>>;

    /// Returns the epics of a project in stored order.
    async fn list_epics(&self, project_id: ProjectId) -> StoreResult<Vec<Epic>>;

    /// Returns the tasks of an epic in stored order.
    async fn list_tasks_by_epic(&self, epic_id: EpicId) -> StoreResult<Vec<Task>>;

    /// Finds a task by identifier.
    async fn find_task(&self, id: TaskId) -> StoreResult<Option<Task>>;

    /// Persists tasks for an epic, assigning identifiers to new ones.
    ///
    /// Returns the tasks as stored.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownEpic`] when the epic does not exist.
    async fn store_tasks(&self, epic_id: EpicId, tasks: &[Task]) -> StoreResult<Vec<Task>>;
}

/// Errors returned by planning store implementations.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Tasks were written for an epic the store does not know.
    #[error("cannot store tasks for unknown epic {0}")]
    UnknownEpic(EpicId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
