//! Task types: the stored record, its create and update inputs, and the
//! read-time join with its project.
//!
//! All task types use camelCase field names on the wire (`projectId`,
//! `dueDate`, `createdAt`). Due dates are calendar days in ISO form
//! (`2025-03-14`); there is no time component.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::ValidationError;
use crate::project::{Project, ProjectId};

/// Maximum allowed task title length in characters.
pub const MAX_TASK_TITLE_LENGTH: usize = 256;

/// Identifier of a [`Task`], assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(u32);

impl TaskId {
    /// Wraps a raw numeric id.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw numeric id.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How urgent a task is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Needs attention first.
    High,
    /// The default.
    #[default]
    Medium,
    /// Can wait.
    Low,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => write!(f, "high"),
            Self::Medium => write!(f, "medium"),
            Self::Low => write!(f, "low"),
        }
    }
}

/// Board column a task sits in.
///
/// Independent of [`Task::completed`]: nothing keeps the two consistent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// Not started.
    #[default]
    Active,
    /// Being worked on.
    InProgress,
    /// Done.
    Completed,
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::InProgress => write!(f, "in-progress"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

/// A stored task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Store-assigned identifier, never reused.
    pub id: TaskId,
    /// Short summary, never empty.
    pub title: String,
    /// Free-form details, empty when not given.
    pub description: String,
    /// Urgency.
    pub priority: Priority,
    /// Board column.
    pub status: TaskStatus,
    /// Project this task is filed under, if any. Not checked against the
    /// set of existing projects.
    pub project_id: Option<ProjectId>,
    /// Calendar day the task is due, if any.
    pub due_date: Option<NaiveDate>,
    /// Completion checkbox.
    pub completed: bool,
    /// Manual sort key shared by all tasks.
    pub order: i64,
    /// Creation time; set once by the store.
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Joins this task with its resolved project for reading.
    #[must_use]
    pub fn with_project(self, project: Option<Project>) -> TaskWithProject {
        TaskWithProject {
            task: self,
            project,
        }
    }

    /// Merges the fields present in `update` over this task.
    ///
    /// `id` and `created_at` are never touched.
    pub fn apply(&mut self, update: TaskUpdate) {
        let TaskUpdate {
            title,
            description,
            priority,
            status,
            project_id,
            due_date,
            completed,
            order,
        } = update;

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(priority) = priority {
            self.priority = priority;
        }
        if let Some(status) = status {
            self.status = status;
        }
        if let Some(project_id) = project_id {
            self.project_id = project_id;
        }
        if let Some(due_date) = due_date {
            self.due_date = due_date;
        }
        if let Some(completed) = completed {
            self.completed = completed;
        }
        if let Some(order) = order {
            self.order = order;
        }
    }
}

/// A task together with the project its `projectId` resolves to.
///
/// Built on every read and never stored, so it cannot go stale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskWithProject {
    /// The task itself; its fields appear at the top level on the wire.
    #[serde(flatten)]
    pub task: Task,
    /// The resolved project; absent when `projectId` is unset or dangling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<Project>,
}

impl std::ops::Deref for TaskWithProject {
    type Target = Task;

    fn deref(&self) -> &Task {
        &self.task
    }
}

/// Input for creating a task. Only `title` is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    /// Short summary (required, non-empty).
    pub title: String,
    /// Free-form details.
    #[serde(default)]
    pub description: Option<String>,
    /// Urgency; [`Priority::Medium`] when absent.
    #[serde(default)]
    pub priority: Option<Priority>,
    /// Board column; [`TaskStatus::Active`] when absent.
    #[serde(default)]
    pub status: Option<TaskStatus>,
    /// Project to file the task under.
    #[serde(default)]
    pub project_id: Option<ProjectId>,
    /// Calendar due date.
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    /// Completion checkbox; `false` when absent.
    #[serde(default)]
    pub completed: Option<bool>,
    /// Manual sort key; the store picks one above the current maximum when absent.
    #[serde(default)]
    pub order: Option<i64>,
}

impl NewTask {
    /// Creates an input with only a title; every other field takes its default.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Checks the input before it reaches the store.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyTitle`] or
    /// [`ValidationError::TitleTooLong`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_title(&self.title)
    }

    /// Builds the stored task once the store has picked its id, order and
    /// creation time.
    #[must_use]
    pub fn into_task(self, id: TaskId, default_order: i64, created_at: DateTime<Utc>) -> Task {
        Task {
            id,
            title: self.title,
            description: self.description.unwrap_or_default(),
            priority: self.priority.unwrap_or_default(),
            status: self.status.unwrap_or_default(),
            project_id: self.project_id,
            due_date: self.due_date,
            completed: self.completed.unwrap_or(false),
            order: self.order.unwrap_or(default_order),
            created_at,
        }
    }
}

/// A partial update to a task. Absent fields are left unchanged.
///
/// `projectId` and `dueDate` distinguish an absent key (keep) from an
/// explicit `null` (clear). Any `id` or `createdAt` keys in the payload are
/// dropped during deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdate {
    /// New title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New priority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// New status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    /// New project (`Some(None)` clears it).
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub project_id: Option<Option<ProjectId>>,
    /// New due date (`Some(None)` clears it).
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<Option<NaiveDate>>,
    /// New completion flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    /// New manual sort key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
}

impl TaskUpdate {
    /// Checks the fields that are present.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyTitle`] or
    /// [`ValidationError::TitleTooLong`] when a title is supplied and invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match &self.title {
            Some(title) => validate_title(title),
            None => Ok(()),
        }
    }

    /// Returns `true` if the update carries no fields.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.status.is_none()
            && self.project_id.is_none()
            && self.due_date.is_none()
            && self.completed.is_none()
            && self.order.is_none()
    }
}

fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    let len = title.chars().count();
    if len > MAX_TASK_TITLE_LENGTH {
        return Err(ValidationError::TitleTooLong {
            len,
            max: MAX_TASK_TITLE_LENGTH,
        });
    }
    Ok(())
}

/// Present-but-null becomes `Some(None)`; an absent key falls back to the
/// field default (`None`).
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
