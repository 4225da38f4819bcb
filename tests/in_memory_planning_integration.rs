//! End-to-end planning runs over the in-memory store.
//!
//! Runs are driven through the public API only: a JSON snapshot seeds the
//! store, and either the greedy oracle or the prompted oracle backed by a
//! scripted completion endpoint supplies drafts.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use async_trait::async_trait;
use cadence::planning::{
    adapters::{
        memory::{GreedyBacklogOracle, InMemoryPlanningStore, PlanningSnapshot},
        prompted::PromptedBacklogOracle,
    },
    config::{PlanningConfig, RebalancePolicy},
    domain::EpicId,
    ports::{OracleError, OracleResult, PlanningStore, TextCompletion},
    services::{PlanSprintRequest, PlanningErrorKind, SprintPlanningService},
};
use serde_json::json;
use std::sync::{Arc, Mutex};

const CHECKOUT_EPIC: &str = "7c6d5e4f-3a2b-4c1d-9e8f-7a6b5c4d3e2f";
const SEARCH_EPIC: &str = "3e2d1c0b-9a8f-4e7d-8c6b-5a4f3e2d1c0b";

fn snapshot() -> PlanningSnapshot {
    let raw = json!({
        "project": {
            "id": "9b2f6c1e-3f7a-4d8e-9a51-0c6d2b7e4f10",
            "startDate": "2024-01-01",
            "endDate": "2024-03-01",
            "members": [
                "5e0f8a2c-1b3d-4c6e-8f9a-2b4c6d8e0f12",
                "6f1a9b3d-2c4e-4d7f-9a0b-3c5d7e9f1a23"
            ]
        },
        "members": [
            { "id": "5e0f8a2c-1b3d-4c6e-8f9a-2b4c6d8e0f12", "name": "Alice" },
            { "id": "6f1a9b3d-2c4e-4d7f-9a0b-3c5d7e9f1a23", "name": "Bob" }
        ],
        "features": [{
            "id": "0a1b2c3d-4e5f-4a6b-8c7d-8e9f0a1b2c3d",
            "name": "Search",
            "useCase": "Shopper finds a product by name",
            "input": "Query text",
            "output": "Ranked results"
        }],
        "epics": [
            {
                "id": CHECKOUT_EPIC,
                "featureId": "1b2c3d4e-5f6a-4b7c-9d8e-9f0a1b2c3d4e",
                "title": "Checkout",
                "startDate": "2024-01-01",
                "endDate": "2024-01-31",
                "priority": 5,
                "expected_workhours": 40
            },
            {
                "id": SEARCH_EPIC,
                "featureId": "0a1b2c3d-4e5f-4a6b-8c7d-8e9f0a1b2c3d",
                "title": "Search",
                "startDate": "2024-01-08",
                "endDate": "2024-02-15",
                "priority": 3,
                "expected_workhours": 24
            }
        ],
        "tasks": [
            {
                "epicId": CHECKOUT_EPIC,
                "id": "1f2e3d4c-5b6a-4978-8a9b-0c1d2e3f4a5b",
                "title": "Cart model",
                "description": "Persist cart lines",
                "assignee": "Alice",
                "startDate": "2024-01-02",
                "endDate": "2024-01-10",
                "priority": 4,
                "expected_workhours": 12
            },
            {
                "epicId": CHECKOUT_EPIC,
                "id": "2a3b4c5d-6e7f-4081-9a2b-3c4d5e6f7a8b",
                "title": "Payment API",
                "description": "Charge the card",
                "assignee": "Bob",
                "startDate": "2024-01-05",
                "endDate": "2024-01-20",
                "priority": 2,
                "expected_workhours": 30
            }
        ],
        "pendingTaskIds": []
    });
    serde_json::from_value(raw).expect("valid snapshot")
}

fn request(snapshot: &PlanningSnapshot) -> PlanSprintRequest {
    PlanSprintRequest::new(snapshot.project.id)
}

#[tokio::test(flavor = "multi_thread")]
async fn greedy_run_drafts_missing_tasks_and_plans_the_first_sprint() {
    let snapshot = snapshot();
    let store = InMemoryPlanningStore::from_snapshot(&snapshot).expect("snapshot loads");
    let service = SprintPlanningService::new(
        Arc::new(store.clone()),
        Arc::new(GreedyBacklogOracle::new()),
        PlanningConfig {
            persist_drafted_tasks: true,
            ..PlanningConfig::default()
        },
    );

    let outcome = service.plan(request(&snapshot)).await.expect("run succeeds");

    let output = serde_json::to_value(&outcome.output).expect("output serialises");
    assert_eq!(output["sprint"]["title"], "Sprint 1");
    assert_eq!(output["sprint"]["startDate"], "2024-01-01");
    assert_eq!(output["sprint"]["endDate"], "2024-01-14");
    let titles: Vec<&str> = output["epics"]
        .as_array()
        .expect("epics array")
        .iter()
        .flat_map(|epic| epic["tasks"].as_array().expect("tasks array"))
        .map(|task| task["title"].as_str().expect("title string"))
        .collect();
    assert_eq!(titles, vec!["Cart model", "Payment API", "Search"]);

    let search_id: EpicId = serde_json::from_value(json!(SEARCH_EPIC)).expect("valid id");
    let persisted = store
        .list_tasks_by_epic(search_id)
        .await
        .expect("store readable");
    let [drafted] = persisted.as_slice() else {
        panic!("expected the drafted search task to be persisted");
    };
    assert_eq!(drafted.assignee(), "Alice");
    assert_eq!(drafted.priority(), 3);
}

/// Completion endpoint replaying canned replies keyed by temperature.
struct ScriptedCompletion {
    task_reply: String,
    sprint_reply: String,
    prompts: Mutex<Vec<String>>,
}

#[async_trait]
impl TextCompletion for ScriptedCompletion {
    async fn complete(&self, prompt: &str, temperature: f32) -> OracleResult<String> {
        self.prompts
            .lock()
            .map_err(|err| OracleError::malformed(err.to_string()))?
            .push(prompt.to_owned());
        if temperature > 0.55 {
            Ok(self.task_reply.clone())
        } else {
            Ok(self.sprint_reply.clone())
        }
    }
}

fn scripted(sprint_reply: serde_json::Value) -> ScriptedCompletion {
    let task_reply = json!({
        "tasks": [{
            "title": "Index products",
            "description": "Build the product index",
            "assignee": "Bob",
            "startDate": "2024-01-01",
            "endDate": "2024-03-01",
            "priority": 7,
            "expected_workhours": 50
        }]
    });
    ScriptedCompletion {
        task_reply: format!("Sure, here you go:\n```json\n{task_reply}\n```"),
        sprint_reply: sprint_reply.to_string(),
        prompts: Mutex::new(Vec::new()),
    }
}

fn proposal(effective_hours: f64) -> serde_json::Value {
    json!({
        "sprints": [{
            "title": "Foundations",
            "description": "Checkout and search basics.",
            "startDate": "2024-01-01",
            "endDate": "2024-01-14",
            "epics": [
                {
                    "epicId": CHECKOUT_EPIC,
                    "tasks": [{
                        "id": "1f2e3d4c-5b6a-4978-8a9b-0c1d2e3f4a5b",
                        "title": "Cart model",
                        "description": "Persist cart lines",
                        "assignee": "Alice",
                        "startDate": "2023-12-28",
                        "endDate": "2024-01-10",
                        "priority": 4,
                        "expected_workhours": 16
                    }]
                },
                {
                    "epicId": SEARCH_EPIC,
                    "tasks": [{
                        "title": "Index products",
                        "description": "Build the product index",
                        "assignee": "Bob",
                        "startDate": "2024-01-08",
                        "endDate": "2024-02-15",
                        "priority": 3,
                        "expected_workhours": 48
                    }]
                }
            ]
        }],
        "sprint_days": 14,
        "eff_mandays": effective_hours,
        "number_of_sprints": 5
    })
}

#[tokio::test(flavor = "multi_thread")]
async fn prompted_run_validates_the_model_partition() {
    let snapshot = snapshot();
    let store = InMemoryPlanningStore::from_snapshot(&snapshot).expect("snapshot loads");
    let completion = Arc::new(scripted(proposal(100.0)));
    let service = SprintPlanningService::new(
        Arc::new(store),
        Arc::new(PromptedBacklogOracle::new(Arc::clone(&completion))),
        PlanningConfig::default(),
    );

    let outcome = service.plan(request(&snapshot)).await.expect("run succeeds");

    assert_eq!(outcome.output.sprint.title, "Foundations");
    assert!((outcome.capacity.effective_hours() - 100.0).abs() < 1e-9);
    // Backlog hours win over the model's figures: 12h and 24h normalised for two.
    assert!((outcome.workload - 72.0).abs() < 1e-9);
    assert!(outcome.warnings.is_empty());
    let starts: Vec<String> = outcome
        .output
        .epics
        .iter()
        .flat_map(|epic| epic.tasks.iter().map(|task| task.start_date.to_string()))
        .collect();
    assert_eq!(starts, vec!["2024-01-01", "2024-01-08"]);

    let prompts = completion.prompts.lock().expect("prompt log");
    assert_eq!(prompts.len(), 2);
    assert!(
        prompts
            .first()
            .is_some_and(|prompt| prompt.contains("Members: Alice, Bob"))
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn prompted_run_trims_an_over_budget_sprint_when_configured() {
    let snapshot = snapshot();
    let store = InMemoryPlanningStore::from_snapshot(&snapshot).expect("snapshot loads");
    let service = SprintPlanningService::new(
        Arc::new(store),
        Arc::new(PromptedBacklogOracle::new(Arc::new(scripted(proposal(
            40.0,
        ))))),
        PlanningConfig {
            rebalance: RebalancePolicy::TrimLowestPriority,
            ..PlanningConfig::default()
        },
    );

    let outcome = service.plan(request(&snapshot)).await.expect("run succeeds");

    let [warning] = outcome.warnings.as_slice() else {
        panic!("expected one capacity warning");
    };
    assert!((warning.workload - 72.0).abs() < 1e-9);
    assert!((warning.budget - 40.0).abs() < 1e-9);
    assert!(
        warning
            .rebalanced_workload
            .is_some_and(|hours| (hours - 40.0).abs() < 1e-9)
    );
    assert!((outcome.workload - 40.0).abs() < 1e-9);
}

#[tokio::test(flavor = "multi_thread")]
async fn prompted_run_rejects_tasks_outside_the_backlog() {
    let snapshot = snapshot();
    let store = InMemoryPlanningStore::from_snapshot(&snapshot).expect("snapshot loads");
    let mut forged = proposal(100.0);
    forged["sprints"][0]["epics"][1]["tasks"][0]["title"] = json!("Rewrite everything");
    let service = SprintPlanningService::new(
        Arc::new(store),
        Arc::new(PromptedBacklogOracle::new(Arc::new(scripted(forged)))),
        PlanningConfig::default(),
    );

    let err = service
        .plan(request(&snapshot))
        .await
        .expect_err("a task the backlog never held must abort the run");

    assert_eq!(err.kind(), PlanningErrorKind::MalformedOracleResponse);
}

#[tokio::test(flavor = "multi_thread")]
async fn prompted_run_rejects_partitions_naming_unknown_epics() {
    let snapshot = snapshot();
    let store = InMemoryPlanningStore::from_snapshot(&snapshot).expect("snapshot loads");
    let mut bad = proposal(100.0);
    bad["sprints"][0]["epics"][0]["epicId"] = json!("00000000-0000-4000-8000-000000000000");
    let service = SprintPlanningService::new(
        Arc::new(store),
        Arc::new(PromptedBacklogOracle::new(Arc::new(scripted(bad)))),
        PlanningConfig::default(),
    );

    let err = service
        .plan(request(&snapshot))
        .await
        .expect_err("unknown epic must abort the run");

    assert_eq!(err.kind(), PlanningErrorKind::ConstraintViolation);
}
