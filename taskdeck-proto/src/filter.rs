//! Task filtering.
//!
//! A [`TaskFilter`] is a conjunction of optional criteria. An empty filter
//! matches every task. The current day is always passed in by the caller so
//! that filtering stays a pure function of its inputs.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::project::ProjectId;
use crate::task::{Priority, Task, TaskStatus};

/// Number of days, starting today, covered by [`TaskView::Upcoming`].
pub const UPCOMING_WINDOW_DAYS: u64 = 7;

/// Matches on the completion checkbox rather than the board column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Completion {
    /// `completed == false`.
    Active,
    /// `completed == true`.
    Completed,
}

/// Predefined sidebar views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskView {
    /// Everything.
    #[default]
    All,
    /// Due today.
    Today,
    /// High priority.
    Important,
    /// Completion checkbox set.
    Completed,
    /// Due before today and not completed.
    Overdue,
    /// Due within the next [`UPCOMING_WINDOW_DAYS`] days, today included.
    Upcoming,
}

impl TaskView {
    /// Returns `true` if the task belongs in this view on the given day.
    #[must_use]
    pub fn matches(self, task: &Task, today: NaiveDate) -> bool {
        match self {
            Self::All => true,
            Self::Today => task.due_date == Some(today),
            Self::Important => task.priority == Priority::High,
            Self::Completed => task.completed,
            Self::Overdue => !task.completed && task.due_date.is_some_and(|due| due < today),
            Self::Upcoming => {
                let Some(due) = task.due_date else {
                    return false;
                };
                let end = today
                    .checked_add_days(Days::new(UPCOMING_WINDOW_DAYS - 1))
                    .unwrap_or(NaiveDate::MAX);
                due >= today && due <= end
            }
        }
    }
}

/// Criteria for narrowing a task listing. Every criterion that is set must
/// match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskFilter {
    /// Case-insensitive substring of the title or description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Exact priority.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// Exact board column.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    /// Completion checkbox state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion: Option<Completion>,
    /// Exact project.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<ProjectId>,
    /// Predefined view.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<TaskView>,
    /// Exact due date, for a single calendar day.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due: Option<NaiveDate>,
}

impl TaskFilter {
    /// Returns `true` if no criterion is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Returns `true` if the task satisfies every criterion that is set.
    #[must_use]
    pub fn matches(&self, task: &Task, today: NaiveDate) -> bool {
        self.matches_search(task)
            && self.priority.is_none_or(|p| task.priority == p)
            && self.status.is_none_or(|s| task.status == s)
            && self.completion.is_none_or(|c| match c {
                Completion::Active => !task.completed,
                Completion::Completed => task.completed,
            })
            && self.project_id.is_none_or(|id| task.project_id == Some(id))
            && self.view.is_none_or(|view| view.matches(task, today))
            && self.due.is_none_or(|due| task.due_date == Some(due))
    }

    fn matches_search(&self, task: &Task) -> bool {
        let Some(query) = self.search.as_deref() else {
            return true;
        };
        let needle = query.to_lowercase();
        task.title.to_lowercase().contains(&needle)
            || task.description.to_lowercase().contains(&needle)
    }
}
