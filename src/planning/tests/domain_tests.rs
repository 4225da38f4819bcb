//! Tests for planning domain records and their wire formats.

use super::fixtures::{date, draft, epic, task};
use crate::planning::domain::{
    ConstraintViolation, DateRange, EpicId, MemberId, PlanningRunOutput, Project, ProjectId,
    Sprint, SprintEpic, SprintProposal, SprintSummary, Task, TaskDraft,
};
use rstest::rstest;
use serde_json::json;

#[test]
fn date_range_rejects_inverted_bounds() {
    let result = DateRange::new(date(2024, 2, 1), date(2024, 1, 1));

    assert_eq!(
        result,
        Err(ConstraintViolation::InvalidDateRange {
            start: date(2024, 2, 1),
            end: date(2024, 1, 1),
        })
    );
}

#[test]
fn date_range_reports_length_and_containment() {
    let outer = DateRange::new(date(2024, 1, 1), date(2024, 3, 1)).expect("valid range");
    let inner = DateRange::new(date(2024, 1, 10), date(2024, 1, 20)).expect("valid range");

    assert_eq!(outer.days(), 60);
    assert!(outer.contains(&inner));
    assert!(!inner.contains(&outer));
}

#[test]
fn date_range_deserialisation_validates_bounds() {
    let result: Result<DateRange, _> =
        serde_json::from_value(json!({"startDate": "2024-03-01", "endDate": "2024-01-01"}));

    assert!(result.is_err());
}

#[test]
fn project_team_size_counts_member_references() {
    let project = Project::new(
        ProjectId::new(),
        date(2024, 1, 1),
        date(2024, 3, 1),
        [MemberId::new(), MemberId::new(), MemberId::new()],
    )
    .expect("valid project");

    assert_eq!(project.team_size(), 3);
    assert_eq!(project.schedule().days(), 60);
}

#[test]
fn task_draft_uses_the_oracle_wire_names() {
    let wire = json!({
        "title": "Login form",
        "description": "Build the form",
        "assignee": "Alice",
        "startDate": "2024-01-02",
        "endDate": "2024-01-05",
        "priority": 3,
        "expected_workhours": 12.5
    });

    let parsed: TaskDraft = serde_json::from_value(wire.clone()).expect("valid draft");

    assert_eq!(parsed.start_date, date(2024, 1, 2));
    assert_eq!(parsed.priority, 3);
    assert_eq!(parsed.id, None);
    assert_eq!(serde_json::to_value(&parsed).expect("serialises"), wire);
}

#[rstest]
#[case::missing_assignee(json!({
    "title": "t", "description": "d", "startDate": "2024-01-02",
    "endDate": "2024-01-05", "priority": 1, "expected_workhours": 1.0
}))]
#[case::negative_priority(json!({
    "title": "t", "description": "d", "assignee": "A", "startDate": "2024-01-02",
    "endDate": "2024-01-05", "priority": -1, "expected_workhours": 1.0
}))]
#[case::textual_hours(json!({
    "title": "t", "description": "d", "assignee": "A", "startDate": "2024-01-02",
    "endDate": "2024-01-05", "priority": 1, "expected_workhours": "many"
}))]
fn malformed_task_drafts_do_not_parse(#[case] wire: serde_json::Value) {
    assert!(serde_json::from_value::<TaskDraft>(wire).is_err());
}

#[test]
fn task_from_draft_rejects_negative_hours() {
    let mut negative = draft("Login", "Alice", date(2024, 1, 2), date(2024, 1, 5));
    negative.expected_workhours = -3.0;

    let result = Task::from_draft(negative, EpicId::new());

    assert_eq!(
        result,
        Err(ConstraintViolation::InvalidWorkloadValue {
            context: "Login".to_owned(),
            value: -3.0,
        })
    );
}

#[test]
fn task_round_trips_through_its_draft() {
    let owner = epic("Auth", date(2024, 1, 1), date(2024, 1, 31));
    let original = task(&owner, "Login", 2, 6.0);

    let restored = Task::from_draft(original.to_draft(), owner.id()).expect("valid draft");

    assert_eq!(restored, original);
}

#[test]
fn sprint_proposal_scalars_are_optional() {
    let epic_id = EpicId::new();
    let wire = json!({
        "sprints": [{
            "title": "Sprint 1",
            "description": "Foundations",
            "startDate": "2024-01-01",
            "endDate": "2024-01-14",
            "epics": [{"epicId": epic_id, "tasks": []}]
        }],
        "eff_mandays": 120.5
    });

    let proposal: SprintProposal = serde_json::from_value(wire).expect("valid proposal");

    let overrides = proposal.overrides();
    assert_eq!(overrides.effective_hours, Some(120.5));
    assert_eq!(overrides.cycle_days, None);
    assert_eq!(overrides.hours_per_day, None);
    assert_eq!(proposal.number_of_sprints, None);
    assert_eq!(
        proposal
            .sprints
            .first()
            .and_then(|sprint| sprint.epics.first())
            .map(|grouping| grouping.epic_id),
        Some(epic_id)
    );
}

#[test]
fn sprint_requires_content() {
    let owner = epic("Auth", date(2024, 1, 1), date(2024, 1, 31));
    let window = DateRange::new(date(2024, 1, 1), date(2024, 1, 14)).expect("valid window");

    let hollow = Sprint::new("Empty", "", window, Vec::new());
    let bare_epic = Sprint::new("Bare", "", window, vec![SprintEpic::new(owner.id(), Vec::new())]);

    assert_eq!(
        hollow,
        Err(ConstraintViolation::EmptySprintEpic {
            sprint: "Empty".to_owned(),
        })
    );
    assert_eq!(
        bare_epic,
        Err(ConstraintViolation::EmptyEpicTasks {
            sprint: "Bare".to_owned(),
            epic_id: owner.id(),
        })
    );
}

#[test]
fn planning_run_output_serialises_with_camel_case_keys() {
    let member = MemberId::new();
    let epic_id = EpicId::new();
    let output = PlanningRunOutput {
        sprint: SprintSummary {
            title: "Sprint 1".to_owned(),
            description: "Foundations".to_owned(),
            start_date: date(2024, 1, 1),
            end_date: date(2024, 1, 14),
        },
        epics: vec![crate::planning::domain::EpicAssignment {
            epic_id,
            tasks: vec![crate::planning::domain::AssignedTask {
                title: "Login".to_owned(),
                description: "Build it".to_owned(),
                assignee_id: member,
                start_date: date(2024, 1, 2),
                end_date: date(2024, 1, 5),
                priority: 3,
            }],
        }],
    };

    let value = serde_json::to_value(&output).expect("serialises");

    assert_eq!(
        value,
        json!({
            "sprint": {
                "title": "Sprint 1",
                "description": "Foundations",
                "startDate": "2024-01-01",
                "endDate": "2024-01-14"
            },
            "epics": [{
                "epicId": epic_id,
                "tasks": [{
                    "title": "Login",
                    "description": "Build it",
                    "assigneeId": member,
                    "startDate": "2024-01-02",
                    "endDate": "2024-01-05",
                    "priority": 3
                }]
            }]
        })
    );
}
