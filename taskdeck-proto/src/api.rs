//! Request and response bodies of the HTTP API that are not entities
//! themselves.

use serde::{Deserialize, Serialize};

use crate::task::TaskId;

/// Body of `POST /api/tasks/reorder`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderRequest {
    /// Task ids in the desired order. Unknown ids are ignored.
    pub task_ids: Vec<TaskId>,
}

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Machine-readable kind, e.g. `validation` or `not_found`.
    pub error: String,
    /// Human-readable detail.
    pub message: String,
}
