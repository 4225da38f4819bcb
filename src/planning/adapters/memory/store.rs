//! In-memory planning store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::planning::{
    domain::{Epic, EpicId, Feature, FeatureId, Member, MemberId, Project, ProjectId, Task, TaskId},
    ports::{PlanningStore, StoreError, StoreResult},
};

/// Thread-safe in-memory planning store.
///
/// Epics and tasks are kept in insertion order so listings are stable.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPlanningStore {
    state: Arc<RwLock<InMemoryPlanningState>>,
}

#[derive(Debug, Default)]
struct InMemoryPlanningState {
    projects: HashMap<ProjectId, Project>,
    members: HashMap<MemberId, Member>,
    features: HashMap<FeatureId, Feature>,
    epics: Vec<Epic>,
    tasks: Vec<Task>,
}

impl InMemoryPlanningState {
    fn upsert_task(&mut self, task: Task) -> Task {
        let id = task.id().unwrap_or_else(TaskId::new);
        let stored = task.with_id(id);
        if let Some(existing) = self
            .tasks
            .iter_mut()
            .find(|candidate| candidate.id() == stored.id())
        {
            *existing = stored.clone();
        } else {
            self.tasks.push(stored.clone());
        }
        stored
    }
}

impl InMemoryPlanningStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a project.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Persistence`] when the state lock is poisoned.
    pub fn insert_project(&self, project: Project) -> StoreResult<()> {
        self.write()?.projects.insert(project.id(), project);
        Ok(())
    }

    /// Inserts or replaces a member.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Persistence`] when the state lock is poisoned.
    pub fn insert_member(&self, member: Member) -> StoreResult<()> {
        self.write()?.members.insert(member.id, member);
        Ok(())
    }

    /// Inserts or replaces a feature.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Persistence`] when the state lock is poisoned.
    pub fn insert_feature(&self, feature: Feature) -> StoreResult<()> {
        self.write()?.features.insert(feature.id, feature);
        Ok(())
    }

    /// Inserts or replaces an epic, keeping its original position.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Persistence`] when the state lock is poisoned.
    pub fn insert_epic(&self, epic: Epic) -> StoreResult<()> {
        let mut state = self.write()?;
        if let Some(existing) = state
            .epics
            .iter_mut()
            .find(|candidate| candidate.id() == epic.id())
        {
            *existing = epic;
        } else {
            state.epics.push(epic);
        }
        Ok(())
    }

    /// Inserts or replaces a task, assigning an identifier when it has none.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Persistence`] when the state lock is poisoned.
    pub fn insert_task(&self, task: Task) -> StoreResult<TaskId> {
        let id = task.id().unwrap_or_else(TaskId::new);
        self.write()?.upsert_task(task.with_id(id));
        Ok(id)
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, InMemoryPlanningState>> {
        self.state
            .read()
            .map_err(|err| StoreError::persistence(std::io::Error::other(err.to_string())))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, InMemoryPlanningState>> {
        self.state
            .write()
            .map_err(|err| StoreError::persistence(std::io::Error::other(err.to_string())))
    }
}

#[async_trait]
impl PlanningStore for InMemoryPlanningStore {
    async fn find_project(&self, id: ProjectId) -> StoreResult<Option<Project>> {
        Ok(self.read()?.projects.get(&id).cloned())
    }

    async fn find_member(&self, id: MemberId) -> StoreResult<Option<Member>> {
        Ok(self.read()?.members.get(&id).cloned())
    }

    async fn find_feature(&self, id: FeatureId) -> StoreResult<Option<Feature>> {
        Ok(self.read()?.features.get(&id).cloned())
    }

    async fn find_epic(&self, id: EpicId) -> StoreResult<Option<Epic>> {
        Ok(self
            .read()?
            .epics
            .iter()
            .find(|epic| epic.id() == id)
            .cloned())
    }

    async fn list_epics(&self, project_id: ProjectId) -> StoreResult<Vec<Epic>> {
        Ok(self
            .read()?
            .epics
            .iter()
            .filter(|epic| epic.project_id() == project_id)
            .cloned()
            .collect())
    }

    async fn list_tasks_by_epic(&self, epic_id: EpicId) -> StoreResult<Vec<Task>> {
        Ok(self
            .read()?
            .tasks
            .iter()
            .filter(|task| task.epic_id() == epic_id)
            .cloned()
            .collect())
    }

    async fn find_task(&self, id: TaskId) -> StoreResult<Option<Task>> {
        Ok(self
            .read()?
            .tasks
            .iter()
            .find(|task| task.id() == Some(id))
            .cloned())
    }

    async fn store_tasks(&self, epic_id: EpicId, tasks: &[Task]) -> StoreResult<Vec<Task>> {
        let mut state = self.write()?;
        if !state.epics.iter().any(|epic| epic.id() == epic_id) {
            return Err(StoreError::UnknownEpic(epic_id));
        }
        Ok(tasks
            .iter()
            .cloned()
            .map(|task| state.upsert_task(task))
            .collect())
    }
}
