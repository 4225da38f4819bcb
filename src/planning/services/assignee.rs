//! Assignee resolution from display names to member identifiers.

use crate::planning::domain::{
    AssignedTask, ConstraintViolation, EpicAssignment, Member, MemberId, PlanningRunOutput, Sprint,
    SprintSummary, Task,
};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Exact, case-sensitive map from member display name to identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssigneeDirectory {
    by_name: BTreeMap<String, MemberId>,
}

impl AssigneeDirectory {
    /// Builds the directory from project members.
    ///
    /// Members with blank names are skipped. When two members share a name
    /// the first one wins.
    ///
    /// # Errors
    ///
    /// Returns [`ConstraintViolation::NoResolvableMembers`] when no member
    /// has a usable name.
    pub fn from_members(members: &[Member]) -> Result<Self, ConstraintViolation> {
        let mut by_name = BTreeMap::new();
        for member in members {
            if member.name.trim().is_empty() {
                warn!(member_id = %member.id, "member has no name; skipped for assignee resolution");
                continue;
            }
            if by_name.contains_key(&member.name) {
                warn!(member_id = %member.id, name = %member.name, "duplicate member name; keeping the first");
                continue;
            }
            by_name.insert(member.name.clone(), member.id);
        }
        if by_name.is_empty() {
            return Err(ConstraintViolation::NoResolvableMembers);
        }
        debug!(members = by_name.len(), "built assignee directory");
        Ok(Self { by_name })
    }

    /// Returns the known names in sorted order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.by_name.keys().cloned().collect()
    }

    /// Resolves the assignee name of the task titled `task`.
    ///
    /// # Errors
    ///
    /// Returns [`ConstraintViolation::UnresolvedAssignee`] naming the task,
    /// the unmatched name, and the known names.
    pub fn resolve(&self, task: &str, name: &str) -> Result<MemberId, ConstraintViolation> {
        self.by_name.get(name).copied().ok_or_else(|| {
            warn!(task, name, known = ?self.names(), "assignee is not a project member");
            ConstraintViolation::UnresolvedAssignee {
                task: task.to_owned(),
                name: name.to_owned(),
                known: self.names(),
            }
        })
    }

    /// Resolves every task of `sprint` into the planning-run output.
    ///
    /// # Errors
    ///
    /// Returns [`ConstraintViolation::UnresolvedAssignee`] for the first task
    /// whose assignee is unknown.
    pub fn resolve_sprint(&self, sprint: &Sprint) -> Result<PlanningRunOutput, ConstraintViolation> {
        let epics = sprint
            .epics()
            .iter()
            .map(|grouping| {
                let tasks = grouping
                    .tasks()
                    .iter()
                    .map(|task| self.assign(task))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(EpicAssignment {
                    epic_id: grouping.epic_id(),
                    tasks,
                })
            })
            .collect::<Result<Vec<_>, ConstraintViolation>>()?;
        Ok(PlanningRunOutput {
            sprint: SprintSummary {
                title: sprint.title().to_owned(),
                description: sprint.description().to_owned(),
                start_date: sprint.schedule().start(),
                end_date: sprint.schedule().end(),
            },
            epics,
        })
    }

    fn assign(&self, task: &Task) -> Result<AssignedTask, ConstraintViolation> {
        let assignee_id = self.resolve(task.title(), task.assignee())?;
        Ok(AssignedTask {
            title: task.title().to_owned(),
            description: task.description().to_owned(),
            assignee_id,
            start_date: task.start_date(),
            end_date: task.end_date(),
            priority: task.priority(),
        })
    }
}
