//! Epics: date-bounded groupings of tasks derived from one feature.

use super::{ConstraintViolation, DateRange, EpicId, FeatureId, ProjectId, error::checked_hours};

/// Parameter object for constructing an [`Epic`].
#[derive(Debug, Clone, PartialEq)]
pub struct EpicParams {
    /// Epic identifier.
    pub id: EpicId,
    /// Owning project.
    pub project_id: ProjectId,
    /// Feature the epic was derived from.
    pub feature_id: FeatureId,
    /// Epic title.
    pub title: String,
    /// Calendar window every task must fall within.
    pub schedule: DateRange,
    /// Highest priority a task of this epic may carry.
    pub priority_ceiling: u32,
    /// Highest raw hour estimate a task of this epic may carry.
    pub hours_ceiling: f64,
}

/// Epic record owned by the planning run.
#[derive(Debug, Clone, PartialEq)]
pub struct Epic {
    id: EpicId,
    project_id: ProjectId,
    feature_id: FeatureId,
    title: String,
    schedule: DateRange,
    priority_ceiling: u32,
    hours_ceiling: f64,
}

impl Epic {
    /// Creates a validated epic.
    ///
    /// # Errors
    ///
    /// Returns [`ConstraintViolation::InvalidWorkloadValue`] when the hour
    /// ceiling is negative or not finite.
    pub fn new(params: EpicParams) -> Result<Self, ConstraintViolation> {
        let EpicParams {
            id,
            project_id,
            feature_id,
            title,
            schedule,
            priority_ceiling,
            hours_ceiling,
        } = params;
        let checked_ceiling = checked_hours(&title, hours_ceiling)?;
        Ok(Self {
            id,
            project_id,
            feature_id,
            title,
            schedule,
            priority_ceiling,
            hours_ceiling: checked_ceiling,
        })
    }

    /// Returns the epic identifier.
    #[must_use]
    pub const fn id(&self) -> EpicId {
        self.id
    }

    /// Returns the owning project identifier.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the parent feature identifier.
    #[must_use]
    pub const fn feature_id(&self) -> FeatureId {
        self.feature_id
    }

    /// Returns the epic title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the epic calendar window.
    #[must_use]
    pub const fn schedule(&self) -> DateRange {
        self.schedule
    }

    /// Returns the priority ceiling.
    #[must_use]
    pub const fn priority_ceiling(&self) -> u32 {
        self.priority_ceiling
    }

    /// Returns the raw expected-hours ceiling.
    #[must_use]
    pub const fn hours_ceiling(&self) -> f64 {
        self.hours_ceiling
    }
}
