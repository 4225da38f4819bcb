//! Then steps for sprint planning BDD scenarios.

use super::world::{PlanningWorld, parse_date, run_async, split_list};
use cadence::planning::{
    domain::{ConstraintViolation, Member},
    ports::PlanningStore,
    services::PlanningError,
};
use rstest_bdd_macros::then;

#[then(r#"the sprint "{title}" runs from "{start}" to "{end}""#)]
fn sprint_window(
    world: &PlanningWorld,
    title: String,
    start: String,
    end: String,
) -> Result<(), eyre::Report> {
    let sprint = &world.outcome()?.output.sprint;
    if sprint.title != title {
        return Err(eyre::eyre!("expected sprint {title:?}, found {:?}", sprint.title));
    }
    let expected = (parse_date(&start)?, parse_date(&end)?);
    if (sprint.start_date, sprint.end_date) != expected {
        return Err(eyre::eyre!(
            "expected window {expected:?}, found {} to {}",
            sprint.start_date,
            sprint.end_date
        ));
    }
    Ok(())
}

#[then(r#"the sprint tasks are "{titles}""#)]
fn sprint_tasks(world: &PlanningWorld, titles: String) -> Result<(), eyre::Report> {
    let found: Vec<String> = world
        .outcome()?
        .output
        .epics
        .iter()
        .flat_map(|epic| epic.tasks.iter().map(|task| task.title.clone()))
        .collect();
    let expected = split_list(&titles);
    if found != expected {
        return Err(eyre::eyre!("expected tasks {expected:?}, found {found:?}"));
    }
    Ok(())
}

#[then(r#"the task "{title}" is assigned to "{name}""#)]
fn task_assignee(world: &PlanningWorld, title: String, name: String) -> Result<(), eyre::Report> {
    let outcome = world.outcome()?;
    let task = outcome
        .output
        .epics
        .iter()
        .flat_map(|epic| epic.tasks.iter())
        .find(|task| task.title == title)
        .ok_or_else(|| eyre::eyre!("task {title:?} not in the sprint"))?;
    let members = project_members(world)?;
    let expected = members
        .iter()
        .find(|member| member.name == name)
        .ok_or_else(|| eyre::eyre!("no member named {name:?}"))?;
    if task.assignee_id != expected.id {
        return Err(eyre::eyre!(
            "expected {title:?} to be assigned to {name:?}, found {}",
            task.assignee_id
        ));
    }
    Ok(())
}

fn project_members(world: &PlanningWorld) -> Result<Vec<Member>, eyre::Report> {
    let project_id = world
        .project_id
        .ok_or_else(|| eyre::eyre!("missing project in scenario world"))?;
    run_async(async {
        let project = world
            .store
            .find_project(project_id)
            .await?
            .ok_or_else(|| eyre::eyre!("project {project_id} not stored"))?;
        let mut members = Vec::new();
        for &member_id in project.member_refs() {
            if let Some(member) = world.store.find_member(member_id).await? {
                members.push(member);
            }
        }
        Ok(members)
    })
}

#[then("no capacity warning is reported")]
fn no_capacity_warning(world: &PlanningWorld) -> Result<(), eyre::Report> {
    let warnings = &world.outcome()?.warnings;
    if !warnings.is_empty() {
        return Err(eyre::eyre!("expected no capacity warnings, found {warnings:?}"));
    }
    Ok(())
}

#[then(r#"a capacity warning is reported for "{sprint}""#)]
fn capacity_warning_for(world: &PlanningWorld, sprint: String) -> Result<(), eyre::Report> {
    let outcome = world.outcome()?;
    let warning = outcome
        .warnings
        .iter()
        .find(|warning| warning.sprint == sprint)
        .ok_or_else(|| eyre::eyre!("no capacity warning for {sprint:?}"))?;
    if warning.workload <= warning.budget {
        return Err(eyre::eyre!(
            "warning for {sprint:?} does not exceed its budget: {warning:?}"
        ));
    }
    Ok(())
}

#[then(r#"planning fails with an unresolved assignee "{name}""#)]
fn unresolved_assignee(world: &PlanningWorld, name: String) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no planning run in scenario world"))?;
    match result {
        Err(PlanningError::Constraint(ConstraintViolation::UnresolvedAssignee {
            name: found,
            ..
        })) if *found == name => Ok(()),
        other => Err(eyre::eyre!(
            "expected unresolved assignee {name:?}, got {:?}",
            other.as_ref().map(|outcome| &outcome.output)
        )),
    }
}
