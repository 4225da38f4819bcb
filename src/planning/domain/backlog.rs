//! Ordered backlog of epics and tasks for one planning run.

use super::{Epic, EpicId, Task, TaskId};

/// An epic together with the tasks loaded or drafted for it.
#[derive(Debug, Clone, PartialEq)]
pub struct EpicBacklog {
    /// The epic.
    pub epic: Epic,
    /// Tasks owned by the epic, in load order.
    pub tasks: Vec<Task>,
}

impl EpicBacklog {
    /// Pairs an epic with its tasks.
    #[must_use]
    pub const fn new(epic: Epic, tasks: Vec<Task>) -> Self {
        Self { epic, tasks }
    }
}

/// Epic annotated with the summed priority of its tasks.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedEpic {
    epic: Epic,
    priority_sum: u64,
}

impl RankedEpic {
    pub(crate) const fn new(epic: Epic, priority_sum: u64) -> Self {
        Self { epic, priority_sum }
    }

    /// Returns the epic.
    #[must_use]
    pub const fn epic(&self) -> &Epic {
        &self.epic
    }

    /// Returns the summed priority of the epic's tasks.
    #[must_use]
    pub const fn priority_sum(&self) -> u64 {
        self.priority_sum
    }
}

/// Backlog ordered for elaboration and packing.
///
/// Epics are ordered by descending priority sum and tasks by descending
/// priority, with pending tasks reinjected at the front.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Backlog {
    epics: Vec<RankedEpic>,
    tasks: Vec<Task>,
}

impl Backlog {
    pub(crate) const fn from_ordered(epics: Vec<RankedEpic>, tasks: Vec<Task>) -> Self {
        Self { epics, tasks }
    }

    /// Returns the ranked epics in order.
    #[must_use]
    pub fn epics(&self) -> &[RankedEpic] {
        &self.epics
    }

    /// Returns all tasks in packing order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns whether the backlog holds no epics.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.epics.is_empty()
    }

    /// Looks up an epic by identifier.
    #[must_use]
    pub fn epic(&self, id: EpicId) -> Option<&Epic> {
        self.epics
            .iter()
            .map(RankedEpic::epic)
            .find(|epic| epic.id() == id)
    }

    /// Returns whether a task with the given identifier is present.
    #[must_use]
    pub fn contains_task(&self, id: TaskId) -> bool {
        self.tasks.iter().any(|task| task.id() == Some(id))
    }

    /// Returns each epic with its tasks, both in backlog order.
    #[must_use]
    pub fn grouped(&self) -> Vec<(&RankedEpic, Vec<&Task>)> {
        self.epics
            .iter()
            .map(|ranked| {
                let tasks = self
                    .tasks
                    .iter()
                    .filter(|task| task.epic_id() == ranked.epic().id())
                    .collect();
                (ranked, tasks)
            })
            .collect()
    }

    pub(crate) fn insert_front(&mut self, task: Task) {
        self.tasks.insert(0, task);
    }

    pub(crate) fn tasks_mut(&mut self) -> &mut [Task] {
        &mut self.tasks
    }
}
