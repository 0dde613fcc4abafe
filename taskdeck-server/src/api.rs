//! HTTP handlers for the task and project API.
//!
//! Each handler validates its input, does its store work under a single
//! [`AppState`] lock acquisition, and maps absent results to [`ApiError`] not-found
//! responses.
//!
//! | Method & path            | Store call      |
//! |--------------------------|-----------------|
//! | GET /api/tasks           | `query_tasks`   |
//! | GET /api/tasks/{id}      | `get_task`      |
//! | POST /api/tasks          | `create_task`   |
//! | PATCH /api/tasks/{id}    | `update_task`   |
//! | DELETE /api/tasks/{id}   | `delete_task`   |
//! | POST /api/tasks/reorder  | `reorder_tasks` |
//! | GET /api/tasks/board     | `board`         |
//! | GET /api/stats           | `stats`         |
//! | GET /api/projects        | `list_projects` |
//! | GET /api/projects/{id}   | `get_project`   |
//! | POST /api/projects       | `create_project`|

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use chrono::{NaiveDate, Utc};
use taskdeck_proto::api::ReorderRequest;
use taskdeck_proto::board::Board;
use taskdeck_proto::filter::TaskFilter;
use taskdeck_proto::stats::TaskStats;
use taskdeck_proto::{
    NewProject, NewTask, Project, ProjectId, Task, TaskId, TaskUpdate, TaskWithProject,
};

use crate::error::ApiError;
use crate::server::AppState;

type ApiResult<T> = Result<T, ApiError>;

/// The current UTC calendar day, used by date-based views.
fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// `GET /health`.
pub async fn health() -> &'static str {
    "ok"
}

/// `GET /api/tasks`: all tasks ascending by order, narrowed by the query
/// string filter.
pub async fn list_tasks(
    State(state): State<AppState>,
    filter: Result<Query<TaskFilter>, QueryRejection>,
) -> ApiResult<Json<Vec<TaskWithProject>>> {
    let Query(filter) = filter?;
    let tasks = state.read().query_tasks(&filter, today());
    tracing::debug!(count = tasks.len(), "listed tasks");
    Ok(Json(tasks))
}

/// `GET /api/tasks/{id}`.
pub async fn get_task(
    State(state): State<AppState>,
    id: Result<Path<TaskId>, PathRejection>,
) -> ApiResult<Json<TaskWithProject>> {
    let Path(id) = id?;
    let task = state.read().get_task(id);
    task.map(Json).ok_or(ApiError::TaskNotFound(id))
}

/// `POST /api/tasks`: responds `201 Created` with the stored task.
pub async fn create_task(
    State(state): State<AppState>,
    input: Result<Json<NewTask>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    let Json(input) = input?;
    input.validate()?;
    let task = state.write().create_task(input);
    tracing::info!(task_id = %task.id, order = task.order, "task created");
    Ok((StatusCode::CREATED, Json(task)))
}

/// `PATCH /api/tasks/{id}`: merges the supplied fields.
pub async fn update_task(
    State(state): State<AppState>,
    id: Result<Path<TaskId>, PathRejection>,
    update: Result<Json<TaskUpdate>, JsonRejection>,
) -> ApiResult<Json<Task>> {
    let Path(id) = id?;
    let Json(update) = update?;
    update.validate()?;
    if update.is_empty() {
        tracing::debug!(task_id = %id, "update carries no fields");
    }
    let task = state.write().update_task(id, update);
    let task = task.ok_or(ApiError::TaskNotFound(id))?;
    tracing::info!(task_id = %id, "task updated");
    Ok(Json(task))
}

/// `DELETE /api/tasks/{id}`: `204 No Content`, or 404 if already gone.
pub async fn delete_task(
    State(state): State<AppState>,
    id: Result<Path<TaskId>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = id?;
    let (removed, remaining) = {
        let mut store = state.write();
        (store.delete_task(id), store.task_count())
    };
    if !removed {
        return Err(ApiError::TaskNotFound(id));
    }
    tracing::info!(task_id = %id, remaining, "task deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /api/tasks/reorder`: `204 No Content`; clients re-fetch the list.
pub async fn reorder_tasks(
    State(state): State<AppState>,
    body: Result<Json<ReorderRequest>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let Json(ReorderRequest { task_ids }) = body?;
    state.write().reorder_tasks(&task_ids);
    tracing::info!(count = task_ids.len(), "tasks reordered");
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/tasks/board`: filtered tasks grouped by status.
pub async fn task_board(
    State(state): State<AppState>,
    filter: Result<Query<TaskFilter>, QueryRejection>,
) -> ApiResult<Json<Board>> {
    let Query(filter) = filter?;
    let board = state.read().board(&filter, today());
    tracing::debug!(
        active = board.active.len(),
        in_progress = board.in_progress.len(),
        completed = board.completed.len(),
        "built board"
    );
    Ok(Json(board))
}

/// `GET /api/stats`.
pub async fn task_stats(State(state): State<AppState>) -> Json<TaskStats> {
    let stats = state.read().stats(today());
    Json(stats)
}

/// `GET /api/projects`: all projects in creation order.
pub async fn list_projects(State(state): State<AppState>) -> Json<Vec<Project>> {
    let projects = state.read().list_projects();
    Json(projects)
}

/// `GET /api/projects/{id}`.
pub async fn get_project(
    State(state): State<AppState>,
    id: Result<Path<ProjectId>, PathRejection>,
) -> ApiResult<Json<Project>> {
    let Path(id) = id?;
    let project = state.read().get_project(id);
    project.map(Json).ok_or(ApiError::ProjectNotFound(id))
}

/// `POST /api/projects`: responds `201 Created` with the stored project.
pub async fn create_project(
    State(state): State<AppState>,
    input: Result<Json<NewProject>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Project>)> {
    let Json(input) = input?;
    input.validate()?;
    let project = state.write().create_project(input);
    tracing::info!(project_id = %project.id, name = %project.name, "project created");
    Ok((StatusCode::CREATED, Json(project)))
}
