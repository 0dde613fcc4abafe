//! In-memory task and project store.
//!
//! The [`Store`] is the single owner of every [`Task`] and [`Project`]. It
//! assigns ids from per-collection counters that only ever grow, so ids are
//! never reused after a delete. It has no internal locking; callers that
//! share it across requests serialize access themselves (see
//! [`crate::server::AppState`]).
//!
//! The store trusts its input: validation happens before a call reaches it.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};
use taskdeck_proto::board::Board;
use taskdeck_proto::filter::TaskFilter;
use taskdeck_proto::stats::TaskStats;
use taskdeck_proto::{
    NewProject, NewTask, Project, ProjectId, Task, TaskId, TaskUpdate, TaskWithProject,
};

/// Projects every fresh seeded store starts with, in id order.
pub const DEFAULT_PROJECTS: [(&str, &str); 3] = [
    ("Website Redesign", "#3B82F6"),
    ("Mobile App", "#10B981"),
    ("Marketing Campaign", "#8B5CF6"),
];

/// Owner of all task and project state.
#[derive(Debug)]
pub struct Store {
    tasks: BTreeMap<TaskId, Task>,
    projects: BTreeMap<ProjectId, Project>,
    next_task_id: u32,
    next_project_id: u32,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    /// Creates an empty store with no projects.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tasks: BTreeMap::new(),
            projects: BTreeMap::new(),
            next_task_id: 1,
            next_project_id: 1,
        }
    }

    /// Creates a store holding the [`DEFAULT_PROJECTS`] with ids 1, 2, 3.
    #[must_use]
    pub fn seeded() -> Self {
        let mut store = Self::new();
        for (name, color) in DEFAULT_PROJECTS {
            store.create_project(NewProject::new(name, color));
        }
        store
    }

    // -----------------------------------------------------------------------
    // Tasks
    // -----------------------------------------------------------------------

    /// Returns every task joined with its project, ascending by `order`.
    ///
    /// Tasks sharing an `order` value come out in id order.
    #[must_use]
    pub fn list_tasks(&self) -> Vec<TaskWithProject> {
        let mut tasks: Vec<TaskWithProject> =
            self.tasks.values().map(|task| self.join(task)).collect();
        tasks.sort_by_key(|t| t.order);
        tasks
    }

    /// Returns the tasks matching `filter`, in the same order as
    /// [`Store::list_tasks`].
    #[must_use]
    pub fn query_tasks(&self, filter: &TaskFilter, today: NaiveDate) -> Vec<TaskWithProject> {
        let mut tasks = self.list_tasks();
        if !filter.is_empty() {
            tasks.retain(|t| filter.matches(t, today));
        }
        tasks
    }

    /// Looks up one task joined with its project.
    #[must_use]
    pub fn get_task(&self, id: TaskId) -> Option<TaskWithProject> {
        self.tasks.get(&id).map(|task| self.join(task))
    }

    /// Inserts a new task and returns it.
    ///
    /// Without an explicit `order` the task goes after every existing one:
    /// `1 + max(order, 0)`, so the first task in an empty store gets 1. The
    /// sum saturates at `i64::MAX`.
    pub fn create_task(&mut self, input: NewTask) -> Task {
        let id = TaskId::new(self.next_task_id);
        self.next_task_id += 1;

        let max_order = self.tasks.values().map(|t| t.order).max().unwrap_or(0).max(0);
        let task = input.into_task(id, max_order.saturating_add(1), Utc::now());
        self.tasks.insert(id, task.clone());
        task
    }

    /// Merges `update` over an existing task. Returns `None` for an unknown id.
    pub fn update_task(&mut self, id: TaskId, update: TaskUpdate) -> Option<Task> {
        let task = self.tasks.get_mut(&id)?;
        task.apply(update);
        Some(task.clone())
    }

    /// Removes a task. Returns `false` if it did not exist.
    pub fn delete_task(&mut self, id: TaskId) -> bool {
        self.tasks.remove(&id).is_some()
    }

    /// Sets `order = index` for each listed task, in sequence order.
    ///
    /// Unknown ids are skipped; their index is still consumed. Unlisted
    /// tasks keep their `order`, which may now collide with a reassigned one.
    pub fn reorder_tasks(&mut self, ids: &[TaskId]) {
        for (index, id) in (0_i64..).zip(ids) {
            if let Some(task) = self.tasks.get_mut(id) {
                task.order = index;
            }
        }
    }

    /// Groups the tasks matching `filter` by status column.
    #[must_use]
    pub fn board(&self, filter: &TaskFilter, today: NaiveDate) -> Board {
        self.query_tasks(filter, today).into_iter().collect()
    }

    /// Summary statistics over all tasks.
    #[must_use]
    pub fn stats(&self, today: NaiveDate) -> TaskStats {
        TaskStats::compute(&self.list_tasks(), today)
    }

    /// Number of stored tasks.
    #[must_use]
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    // -----------------------------------------------------------------------
    // Projects
    // -----------------------------------------------------------------------

    /// Returns all projects in creation order.
    #[must_use]
    pub fn list_projects(&self) -> Vec<Project> {
        self.projects.values().cloned().collect()
    }

    /// Looks up one project.
    #[must_use]
    pub fn get_project(&self, id: ProjectId) -> Option<Project> {
        self.projects.get(&id).cloned()
    }

    /// Inserts a new project and returns it.
    pub fn create_project(&mut self, input: NewProject) -> Project {
        let id = ProjectId::new(self.next_project_id);
        self.next_project_id += 1;

        let project = input.into_project(id);
        self.projects.insert(id, project.clone());
        project
    }

    fn join(&self, task: &Task) -> TaskWithProject {
        let project = task
            .project_id
            .and_then(|id| self.projects.get(&id))
            .cloned();
        task.clone().with_project(project)
    }
}
