//! Shared data model for Taskdeck.
//!
//! Entity shapes, create/update inputs with their defaults, validation,
//! and the pure read-side computations (filtering, board grouping,
//! analytics) used by the server and any client.

pub mod api;
pub mod board;
pub mod filter;
pub mod project;
pub mod stats;
pub mod task;

pub use project::{DEFAULT_PROJECT_COLOR, NewProject, Project, ProjectId};
pub use task::{
    MAX_TASK_TITLE_LENGTH, NewTask, Priority, Task, TaskId, TaskStatus, TaskUpdate,
    TaskWithProject,
};

/// Errors from validating create/update input before it reaches the store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Task title is empty or only whitespace.
    #[error("task title must not be empty")]
    EmptyTitle,
    /// Task title exceeds the maximum allowed length.
    #[error("task title too long ({len} characters, max {max})")]
    TitleTooLong {
        /// Actual length in characters.
        len: usize,
        /// Maximum allowed length in characters.
        max: usize,
    },
    /// Project name is empty or only whitespace.
    #[error("project name must not be empty")]
    EmptyName,
}
