//! Planning services.
//!
//! Each deterministic stage of a planning run lives in its own module;
//! [`SprintPlanningService`] threads them together around the store and
//! oracle ports.

mod allocator;
mod assignee;
mod capacity;
mod clamp;
mod error;
mod planner;
mod priority;
mod reinjection;
mod workload;

pub use allocator::SprintAllocator;
pub use assignee::AssigneeDirectory;
pub use capacity::{Cadence, CapacityModel};
pub use clamp::{CeilingClamp, ClampOutcome, DateClamp};
pub use error::{EntityKind, PlanningError, PlanningErrorKind, PlanningResult};
pub use planner::{PlanSprintRequest, PlanningOutcome, SprintPlanningService};
pub use priority::PriorityAggregator;
pub use reinjection::PendingTaskReinjector;
pub use workload::WorkloadNormalizer;
