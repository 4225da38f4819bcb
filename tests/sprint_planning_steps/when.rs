//! When steps for sprint planning BDD scenarios.

use super::world::{PlanningWorld, run_async};
use cadence::planning::services::PlanSprintRequest;
use rstest_bdd_macros::when;

#[when("the next sprint is planned")]
fn plan_next_sprint(world: &mut PlanningWorld) -> Result<(), eyre::Report> {
    let project_id = world
        .project_id
        .ok_or_else(|| eyre::eyre!("missing project in scenario world"))?;
    let service = world.service();
    world.last_result = Some(run_async(service.plan(PlanSprintRequest::new(project_id))));
    Ok(())
}
