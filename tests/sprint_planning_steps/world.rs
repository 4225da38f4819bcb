//! Shared world state for sprint planning BDD scenarios.

use std::sync::Arc;

use cadence::planning::{
    adapters::memory::{GreedyBacklogOracle, InMemoryPlanningStore},
    config::PlanningConfig,
    domain::{Epic, ProjectId},
    services::{PlanningError, PlanningOutcome, SprintPlanningService},
};
use chrono::NaiveDate;
use rstest::fixture;

/// Service type used by the BDD world.
pub type TestPlanningService = SprintPlanningService<InMemoryPlanningStore, GreedyBacklogOracle>;

/// Scenario world for sprint planning behaviour tests.
pub struct PlanningWorld {
    pub store: InMemoryPlanningStore,
    pub project_id: Option<ProjectId>,
    pub epic: Option<Epic>,
    pub last_result: Option<Result<PlanningOutcome, PlanningError>>,
}

impl PlanningWorld {
    /// Creates a world over an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: InMemoryPlanningStore::new(),
            project_id: None,
            epic: None,
            last_result: None,
        }
    }

    /// Builds a planning service over the world's store.
    #[must_use]
    pub fn service(&self) -> TestPlanningService {
        SprintPlanningService::new(
            Arc::new(self.store.clone()),
            Arc::new(GreedyBacklogOracle::new()),
            PlanningConfig::default(),
        )
    }

    /// Returns the successful outcome of the last run.
    pub fn outcome(&self) -> Result<&PlanningOutcome, eyre::Report> {
        self.last_result
            .as_ref()
            .ok_or_else(|| eyre::eyre!("no planning run in scenario world"))?
            .as_ref()
            .map_err(|err| eyre::eyre!("unexpected planning failure: {err}"))
    }
}

impl Default for PlanningWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> PlanningWorld {
    PlanningWorld::default()
}

/// Parses an ISO calendar date from step text.
pub fn parse_date(raw: &str) -> Result<NaiveDate, eyre::Report> {
    raw.parse()
        .map_err(|err| eyre::eyre!("invalid date {raw:?}: {err}"))
}

/// Splits a comma-separated step list.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
