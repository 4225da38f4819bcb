//! Prompt templates for the prompted oracle.

use crate::planning::ports::{OracleError, OracleResult, SprintDraftRequest, TaskDraftRequest};
use minijinja::{Environment, context};

const TASK_PROMPT: &str = r#"You are an agile coach. Break the epic below into development tasks.

Rules:
1. Produce at least one task. Base the tasks on the feature description.
2. Write titles and descriptions concrete enough for a developer to start work.
3. Every startDate and endDate must lie between {{ start_date }} and {{ end_date }}.
4. priority must be an integer from 0 to {{ priority_ceiling }}.
5. expected_workhours must be a number from 0 to {{ hours_ceiling }}.
6. assignee must be exactly one name taken from the member list, without role labels.

Epic: {{ epic_title }}
Use case: {{ use_case }}
Input data: {{ input }}
Output data: {{ output }}
Members: {{ members }}

Reply with a single JSON object of this shape:
{"tasks": [
  {"title": "string", "description": "string", "assignee": "string",
   "startDate": "YYYY-MM-DD", "endDate": "YYYY-MM-DD",
   "priority": 0, "expected_workhours": 0.0}
]}
"#;

const SPRINT_PROMPT: &str = r#"You are an agile coach. Group the epics below into sprints.

Steps:
1. Sprints last {{ cycle_days }} days. Lay out about {{ sprint_count }} sprints between {{ project_start }} and {{ project_end }}.
2. The epics are already ordered by priority. Keep that order when filling sprints.
3. Every sprint holds at least one epic and every epic entry holds at least one task.
4. Sum expected_workhours per sprint. If a sprint exceeds {{ effective_hours }} hours, lower task hours until it fits.
5. Copy every epicId exactly as given. Never invent or alter an identifier.
6. Describe each sprint in one sentence and title it after that sentence.
7. Keep task titles and descriptions as given.
8. Report sprint_days, eff_mandays and workhours_per_day as {{ cycle_days }}, {{ effective_hours }} and {{ hours_per_day }}.

Epics:
{{ epics }}

Reply with a single JSON object of this shape:
{"sprints": [
  {"title": "string", "description": "string",
   "startDate": "YYYY-MM-DD", "endDate": "YYYY-MM-DD",
   "epics": [{"epicId": "string", "tasks": [
     {"title": "string", "description": "string", "assignee": "string",
      "startDate": "YYYY-MM-DD", "endDate": "YYYY-MM-DD",
      "priority": 0, "expected_workhours": 0.0}
   ]}]}
],
 "sprint_days": 0, "eff_mandays": 0.0, "workhours_per_day": 0, "number_of_sprints": 0}
"#;

/// Renders the task-drafting prompt.
pub(crate) fn task_prompt(request: &TaskDraftRequest) -> OracleResult<String> {
    Environment::new()
        .render_str(
            TASK_PROMPT,
            context! {
                epic_title => request.epic_title,
                use_case => request.use_case,
                input => request.input,
                output => request.output,
                start_date => request.start_date.to_string(),
                end_date => request.end_date.to_string(),
                priority_ceiling => request.priority_ceiling,
                hours_ceiling => request.hours_ceiling,
                members => request.member_names.join(", "),
            },
        )
        .map_err(OracleError::unavailable)
}

/// Renders the sprint-drafting prompt.
pub(crate) fn sprint_prompt(request: &SprintDraftRequest) -> OracleResult<String> {
    let epics = serde_json::to_string_pretty(&request.epics).map_err(OracleError::unavailable)?;
    Environment::new()
        .render_str(
            SPRINT_PROMPT,
            context! {
                cycle_days => request.cycle_days,
                sprint_count => request.sprint_count,
                project_start => request.project_start.to_string(),
                project_end => request.project_end.to_string(),
                effective_hours => request.effective_hours,
                hours_per_day => request.hours_per_day,
                epics => epics,
            },
        )
        .map_err(OracleError::unavailable)
}
