//! Port contracts for sprint planning.
//!
//! Ports define infrastructure-agnostic interfaces used by planning services.

pub mod completion;
pub mod oracle;
pub mod store;

pub use completion::TextCompletion;
pub use oracle::{
    BacklogOracle, EpicBrief, OracleError, OracleResult, QueuedTask, SprintDraftRequest,
    TaskDraftRequest,
};
pub use store::{PlanningStore, StoreError, StoreResult};
