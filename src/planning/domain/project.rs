//! Projects, their members, and the features epics are derived from.

use super::{ConstraintViolation, DateRange, FeatureId, MemberId, ProjectId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Project calendar and member roster, read-only to the planning run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    schedule: DateRange,
    member_refs: Vec<MemberId>,
}

impl Project {
    /// Creates a project.
    ///
    /// # Errors
    ///
    /// Returns [`ConstraintViolation::InvalidDateRange`] when `end` precedes
    /// `start`.
    pub fn new(
        id: ProjectId,
        start: NaiveDate,
        end: NaiveDate,
        member_refs: impl IntoIterator<Item = MemberId>,
    ) -> Result<Self, ConstraintViolation> {
        Ok(Self {
            id,
            schedule: DateRange::new(start, end)?,
            member_refs: member_refs.into_iter().collect(),
        })
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the project calendar.
    #[must_use]
    pub const fn schedule(&self) -> DateRange {
        self.schedule
    }

    /// Returns member references in roster order.
    #[must_use]
    pub fn member_refs(&self) -> &[MemberId] {
        &self.member_refs
    }

    /// Returns the team size used for capacity computation.
    #[must_use]
    pub fn team_size(&self) -> usize {
        self.member_refs.len()
    }
}

/// Project member with a display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Member {
    /// Stable member identifier.
    pub id: MemberId,
    /// Display name used by drafts to name assignees.
    pub name: String,
}

impl Member {
    /// Creates a member record.
    #[must_use]
    pub fn new(id: MemberId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Functional description of the feature an epic elaborates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    /// Feature identifier.
    pub id: FeatureId,
    /// Feature name.
    pub name: String,
    /// Usage scenario.
    pub use_case: String,
    /// Input data description.
    pub input: String,
    /// Output data description.
    pub output: String,
}

impl Feature {
    /// Creates a feature description.
    #[must_use]
    pub fn new(
        id: FeatureId,
        name: impl Into<String>,
        use_case: impl Into<String>,
        input: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            use_case: use_case.into(),
            input: input.into(),
            output: output.into(),
        }
    }
}
