//! Given steps for sprint planning BDD scenarios.

use super::world::{PlanningWorld, parse_date, split_list};
use cadence::planning::domain::{
    DateRange, Epic, EpicId, EpicParams, Feature, FeatureId, Member, MemberId, Project, ProjectId,
    Task, TaskParams,
};
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given(r#"a project from "{start}" to "{end}" with members "{names}""#)]
fn project_with_members(
    world: &mut PlanningWorld,
    start: String,
    end: String,
    names: String,
) -> Result<(), eyre::Report> {
    let mut member_ids = Vec::new();
    for name in split_list(&names) {
        let id = MemberId::new();
        world
            .store
            .insert_member(Member::new(id, name))
            .wrap_err("store project member")?;
        member_ids.push(id);
    }
    let project_id = ProjectId::new();
    let project = Project::new(project_id, parse_date(&start)?, parse_date(&end)?, member_ids)
        .wrap_err("construct project")?;
    world
        .store
        .insert_project(project)
        .wrap_err("store project")?;
    world.project_id = Some(project_id);
    Ok(())
}

#[given(
    r#"an epic "{title}" from "{start}" to "{end}" with priority ceiling {priority:u32} and hour ceiling {hours:f64}"#
)]
fn epic_with_ceilings(
    world: &mut PlanningWorld,
    title: String,
    start: String,
    end: String,
    priority: u32,
    hours: f64,
) -> Result<(), eyre::Report> {
    let project_id = world
        .project_id
        .ok_or_else(|| eyre::eyre!("missing project in scenario world"))?;
    let feature_id = FeatureId::new();
    world
        .store
        .insert_feature(Feature::new(
            feature_id,
            title.clone(),
            format!("{title} for shoppers"),
            "Shopper request",
            "Completed flow",
        ))
        .wrap_err("store feature")?;
    let epic = Epic::new(EpicParams {
        id: EpicId::new(),
        project_id,
        feature_id,
        title,
        schedule: DateRange::new(parse_date(&start)?, parse_date(&end)?)
            .wrap_err("construct epic window")?,
        priority_ceiling: priority,
        hours_ceiling: hours,
    })
    .wrap_err("construct epic")?;
    world
        .store
        .insert_epic(epic.clone())
        .wrap_err("store epic")?;
    world.epic = Some(epic);
    Ok(())
}

#[given(
    r#"a stored task "{title}" for "{assignee}" with priority {priority:u32} and {hours:f64} hours"#
)]
fn stored_task(
    world: &mut PlanningWorld,
    title: String,
    assignee: String,
    priority: u32,
    hours: f64,
) -> Result<(), eyre::Report> {
    let epic = world
        .epic
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing epic in scenario world"))?;
    let task = Task::new(TaskParams {
        id: None,
        epic_id: epic.id(),
        description: format!("{title} work"),
        title,
        assignee,
        start_date: epic.schedule().start(),
        end_date: epic.schedule().end(),
        priority,
        expected_hours: hours,
    })
    .wrap_err("construct stored task")?;
    world.store.insert_task(task).wrap_err("store task")?;
    Ok(())
}
