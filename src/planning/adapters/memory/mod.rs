//! In-memory adapters.
//!
//! The store and the greedy oracle run the whole planning pipeline without
//! a database or a model.

mod greedy;
mod snapshot;
mod store;

pub use greedy::GreedyBacklogOracle;
pub use snapshot::{EpicRecord, PlanningSnapshot, ProjectRecord, SnapshotError, TaskRecord};
pub use store::InMemoryPlanningStore;
