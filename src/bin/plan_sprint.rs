//! Plans the next sprint of a project snapshot with the deterministic oracle.
//!
//! Usage:
//!
//! ```text
//! plan_sprint <snapshot-path> [config-path]
//! ```
//!
//! The snapshot is a JSON [`PlanningSnapshot`] holding the project, its
//! members, features, epics, stored tasks, and pending task identifiers. The
//! optional config is a JSON [`PlanningConfig`]; omitted fields keep their
//! defaults. A representative snapshot is:
//!
//! ```json
//! {
//!   "project": {
//!     "id": "9b2f6c1e-3f7a-4d8e-9a51-0c6d2b7e4f10",
//!     "startDate": "2024-01-01",
//!     "endDate": "2024-03-01",
//!     "members": ["5e0f8a2c-1b3d-4c6e-8f9a-2b4c6d8e0f12"]
//!   },
//!   "members": [{ "id": "5e0f8a2c-1b3d-4c6e-8f9a-2b4c6d8e0f12", "name": "Alice" }],
//!   "features": [],
//!   "epics": [],
//!   "tasks": [],
//!   "pendingTaskIds": []
//! }
//! ```
//!
//! The planning-run output is written to stdout as JSON; logs go to stderr
//! and honour `RUST_LOG`.

use cadence::planning::{
    adapters::memory::{GreedyBacklogOracle, InMemoryPlanningStore, PlanningSnapshot},
    config::PlanningConfig,
    services::{PlanSprintRequest, SprintPlanningService},
};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

const DEFAULT_LOG_FILTER: &str = "cadence=info";

/// Errors raised while reading command-line arguments.
#[derive(Debug, Error, PartialEq, Eq)]
enum CliError {
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
}

/// Paths named on the command line.
#[derive(Debug, PartialEq, Eq)]
struct Invocation {
    snapshot: PathBuf,
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    init_tracing();
    let invocation = parse_args(std::env::args_os().map(PathBuf::from))?;
    run(invocation).await
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn parse_args(mut args: impl Iterator<Item = PathBuf>) -> Result<Invocation, CliError> {
    let _program = args.next();
    let snapshot = args
        .next()
        .ok_or_else(|| CliError::InvalidArgs("missing snapshot path argument".into()))?;
    let config = args.next();
    if let Some(extra) = args.next() {
        return Err(CliError::InvalidArgs(format!(
            "unexpected extra argument: {}",
            extra.display()
        )));
    }
    Ok(Invocation { snapshot, config })
}

fn load_config(path: Option<&PathBuf>) -> Result<PlanningConfig, BoxError> {
    let Some(config_path) = path else {
        return Ok(PlanningConfig::default());
    };
    let raw = std::fs::read_to_string(config_path)?;
    Ok(PlanningConfig::from_json_str(&raw)?)
}

async fn run(invocation: Invocation) -> Result<(), BoxError> {
    let config = load_config(invocation.config.as_ref())?;
    let raw_snapshot = std::fs::read_to_string(&invocation.snapshot)?;
    let snapshot = PlanningSnapshot::from_json_str(&raw_snapshot)?;
    let store = InMemoryPlanningStore::from_snapshot(&snapshot)?;
    let service = SprintPlanningService::new(
        Arc::new(store),
        Arc::new(GreedyBacklogOracle::new()),
        config,
    );

    let request = PlanSprintRequest::new(snapshot.project.id)
        .with_pending(snapshot.pending_task_ids.iter().copied());
    let outcome = service.plan(request).await?;

    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &outcome.output)?;
    writeln!(stdout)?;
    Ok(())
}
