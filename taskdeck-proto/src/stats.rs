//! Summary numbers behind the analytics view.

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::task::{Priority, TaskWithProject};

/// Bucket name for tasks whose project is unset or does not resolve.
pub const NO_PROJECT: &str = "No Project";

/// Task counts per priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityBreakdown {
    /// High priority tasks.
    pub high: usize,
    /// Medium priority tasks.
    pub medium: usize,
    /// Low priority tasks.
    pub low: usize,
}

/// Task counts for one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectBreakdown {
    /// Project name, or [`NO_PROJECT`].
    pub name: String,
    /// Tasks filed under the project.
    pub total: usize,
    /// Of those, tasks with the completion checkbox set.
    pub completed: usize,
}

/// Aggregate statistics over a set of tasks on a given day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    /// Number of tasks.
    pub total: usize,
    /// Tasks with the completion checkbox set.
    pub completed: usize,
    /// Tasks due before today that are not completed.
    pub overdue: usize,
    /// Tasks due today.
    pub due_today: usize,
    /// Tasks due in the same Sunday-to-Saturday week as today.
    pub due_this_week: usize,
    /// Counts per priority.
    pub by_priority: PriorityBreakdown,
    /// Counts per project, in order of first appearance.
    pub by_project: Vec<ProjectBreakdown>,
    /// Percentage of completed tasks, `0.0` when there are none.
    pub completion_rate: f64,
}

impl TaskStats {
    /// Computes the statistics for `tasks` as seen on `today`.
    #[must_use]
    pub fn compute(tasks: &[TaskWithProject], today: NaiveDate) -> Self {
        let mut stats = Self {
            total: tasks.len(),
            ..Self::default()
        };
        let this_week = week_start(today);

        for task in tasks {
            if task.completed {
                stats.completed += 1;
            }
            if let Some(due) = task.due_date {
                if due < today && !task.completed {
                    stats.overdue += 1;
                }
                if due == today {
                    stats.due_today += 1;
                }
                if week_start(due) == this_week {
                    stats.due_this_week += 1;
                }
            }
            match task.priority {
                Priority::High => stats.by_priority.high += 1,
                Priority::Medium => stats.by_priority.medium += 1,
                Priority::Low => stats.by_priority.low += 1,
            }
            stats.count_project(task);
        }

        stats.completion_rate = completion_rate(stats.completed, stats.total);
        stats
    }

    fn count_project(&mut self, task: &TaskWithProject) {
        let name = task.project.as_ref().map_or(NO_PROJECT, |p| p.name.as_str());
        let entry = if let Some(pos) = self.by_project.iter().position(|p| p.name == name) {
            &mut self.by_project[pos]
        } else {
            self.by_project.push(ProjectBreakdown {
                name: name.to_string(),
                total: 0,
                completed: 0,
            });
            let last = self.by_project.len() - 1;
            &mut self.by_project[last]
        };
        entry.total += 1;
        if task.completed {
            entry.completed += 1;
        }
    }
}

/// The Sunday that opens the week containing `day`.
fn week_start(day: NaiveDate) -> NaiveDate {
    day.week(Weekday::Sun).first_day()
}

#[allow(clippy::cast_precision_loss)]
fn completion_rate(completed: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    completed as f64 / total as f64 * 100.0
}
