//! JSON project snapshots used to seed the in-memory store.

use super::InMemoryPlanningStore;
use crate::planning::{
    domain::{
        ConstraintViolation, DateRange, Epic, EpicId, EpicParams, Feature, FeatureId, Member,
        MemberId, Project, ProjectId, Task, TaskDraft, TaskId,
    },
    ports::StoreError,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Project calendar and roster as written in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    /// Project identifier.
    pub id: ProjectId,
    /// First project day.
    pub start_date: NaiveDate,
    /// Last project day.
    pub end_date: NaiveDate,
    /// Member references in roster order.
    #[serde(default)]
    pub members: Vec<MemberId>,
}

/// Epic as written in a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpicRecord {
    /// Epic identifier.
    pub id: EpicId,
    /// Parent feature.
    pub feature_id: FeatureId,
    /// Epic title.
    pub title: String,
    /// First epic day.
    pub start_date: NaiveDate,
    /// Last epic day.
    pub end_date: NaiveDate,
    /// Priority ceiling for the epic's tasks.
    pub priority: u32,
    /// Raw hour ceiling for the epic's tasks.
    #[serde(rename = "expected_workhours")]
    pub expected_workhours: f64,
}

/// Stored task as written in a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    /// Owning epic.
    pub epic_id: EpicId,
    /// Task fields in oracle wire format.
    #[serde(flatten)]
    pub task: TaskDraft,
}

/// Complete planning input for one project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanningSnapshot {
    /// The project.
    pub project: ProjectRecord,
    /// Member records.
    #[serde(default)]
    pub members: Vec<Member>,
    /// Features epics derive from.
    #[serde(default)]
    pub features: Vec<Feature>,
    /// Epics in stored order.
    #[serde(default)]
    pub epics: Vec<EpicRecord>,
    /// Already stored tasks.
    #[serde(default)]
    pub tasks: Vec<TaskRecord>,
    /// Tasks carried over from the previous sprint.
    #[serde(default)]
    pub pending_task_ids: Vec<TaskId>,
}

/// Errors raised while loading a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The document is not a valid snapshot.
    #[error("failed to parse planning snapshot: {0}")]
    Parse(#[source] serde_json::Error),

    /// A record violates a domain invariant.
    #[error(transparent)]
    Constraint(#[from] ConstraintViolation),

    /// The store rejected a record.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl PlanningSnapshot {
    /// Parses a snapshot from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Parse`] for malformed documents.
    pub fn from_json_str(raw: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(raw).map_err(SnapshotError::Parse)
    }
}

impl InMemoryPlanningStore {
    /// Creates a store seeded with the snapshot's records.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Constraint`] when a record has an inverted
    /// date range or invalid hours.
    pub fn from_snapshot(snapshot: &PlanningSnapshot) -> Result<Self, SnapshotError> {
        let store = Self::new();
        let project = &snapshot.project;
        store.insert_project(Project::new(
            project.id,
            project.start_date,
            project.end_date,
            project.members.iter().copied(),
        )?)?;
        for member in &snapshot.members {
            store.insert_member(member.clone())?;
        }
        for feature in &snapshot.features {
            store.insert_feature(feature.clone())?;
        }
        for record in &snapshot.epics {
            store.insert_epic(Epic::new(EpicParams {
                id: record.id,
                project_id: project.id,
                feature_id: record.feature_id,
                title: record.title.clone(),
                schedule: DateRange::new(record.start_date, record.end_date)?,
                priority_ceiling: record.priority,
                hours_ceiling: record.expected_workhours,
            })?)?;
        }
        for record in &snapshot.tasks {
            store.insert_task(Task::from_draft(record.task.clone(), record.epic_id)?)?;
        }
        Ok(store)
    }
}
