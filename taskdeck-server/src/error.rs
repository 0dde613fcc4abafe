//! HTTP-facing error type.
//!
//! Every failure a handler can report becomes a JSON [`ErrorBody`] with a
//! matching status code. The store itself never fails; these errors come
//! from input validation, request extraction, and lookups of unknown ids.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use taskdeck_proto::api::ErrorBody;
use taskdeck_proto::{ProjectId, TaskId, ValidationError};

/// Errors returned by API handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Input failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The request body could not be parsed into the expected shape.
    #[error("invalid request body: {}", .0.body_text())]
    Body(#[from] JsonRejection),
    /// The query string could not be parsed.
    #[error("invalid query string: {}", .0.body_text())]
    Query(#[from] QueryRejection),
    /// A path parameter could not be parsed.
    #[error("invalid path: {}", .0.body_text())]
    Path(#[from] PathRejection),
    /// No task with this id.
    #[error("task {0} not found")]
    TaskNotFound(TaskId),
    /// No project with this id.
    #[error("project {0} not found")]
    ProjectNotFound(ProjectId),
}

impl ApiError {
    /// HTTP status for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Body(rejection) => rejection.status(),
            Self::Query(rejection) => rejection.status(),
            Self::Path(rejection) => rejection.status(),
            Self::TaskNotFound(_) | Self::ProjectNotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    /// Machine-readable error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Body(_) | Self::Query(_) | Self::Path(_) => "bad_request",
            Self::TaskNotFound(_) | Self::ProjectNotFound(_) => "not_found",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_client_error() {
            tracing::warn!(status = %status, error = %self, "request rejected");
        }
        let body = ErrorBody {
            error: self.kind().to_string(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
