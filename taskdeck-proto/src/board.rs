//! Status board: open tasks by [`TaskStatus`], finished tasks in their own
//! column.

use serde::{Deserialize, Serialize};

use crate::task::{TaskStatus, TaskWithProject};

/// Tasks grouped by board column. Each column keeps the order the tasks
/// were supplied in.
///
/// The completion checkbox wins: any task with `completed` set lands in
/// [`Board::completed`] whatever its status. An unchecked task goes by its
/// status, and one whose status is `completed` but whose checkbox is clear
/// appears in no column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    /// Unchecked tasks with status `active`.
    pub active: Vec<TaskWithProject>,
    /// Unchecked tasks with status `in-progress`.
    pub in_progress: Vec<TaskWithProject>,
    /// Tasks with the completion checkbox set.
    pub completed: Vec<TaskWithProject>,
}

impl FromIterator<TaskWithProject> for Board {
    fn from_iter<I: IntoIterator<Item = TaskWithProject>>(iter: I) -> Self {
        let mut board = Self::default();
        for task in iter {
            if task.completed {
                board.completed.push(task);
                continue;
            }
            match task.status {
                TaskStatus::Active => board.active.push(task),
                TaskStatus::InProgress => board.in_progress.push(task),
                TaskStatus::Completed => {}
            }
        }
        board
    }
}
