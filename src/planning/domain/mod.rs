//! Domain model for sprint planning.
//!
//! The planning domain models projects, epics, tasks, and sprints as typed
//! records validated at construction, together with the capacity budget and
//! the constraint violations raised when oracle output cannot be corrected.
//! All infrastructure concerns are kept outside the domain boundary.

mod backlog;
mod capacity;
mod epic;
mod error;
mod ids;
mod output;
mod project;
mod schedule;
mod sprint;
mod task;

pub use backlog::{Backlog, EpicBacklog, RankedEpic};
pub use capacity::{CapacityBudget, CapacityOverrides};
pub use epic::{Epic, EpicParams};
pub use error::ConstraintViolation;
pub use ids::{EpicId, FeatureId, MemberId, ProjectId, TaskId};
pub use output::{AssignedTask, EpicAssignment, PlanningRunOutput, SprintSummary};
pub use project::{Feature, Member, Project};
pub use schedule::DateRange;
pub use sprint::{
    CapacityWarning, Sprint, SprintDraft, SprintEpic, SprintEpicDraft, SprintPlan, SprintProposal,
};
pub use task::{Task, TaskDraft, TaskParams};

pub(crate) use error::checked_hours;
