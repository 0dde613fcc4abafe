//! Shared server state, routing table and startup.
//!
//! The [`Store`] has no locking of its own. [`AppState`] wraps it in a
//! single [`RwLock`] and every handler takes the lock once per request, so
//! concurrent requests observe whole-call atomicity.

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::api;
use crate::store::Store;

/// Default maximum accepted request body size in bytes (64 KB).
pub const DEFAULT_MAX_BODY_SIZE: usize = 64 * 1024;

/// Handle to the store shared by all request handlers.
#[derive(Clone, Default)]
pub struct AppState {
    store: Arc<RwLock<Store>>,
}

impl AppState {
    /// Wraps an explicitly constructed store.
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }

    /// Locks the store for reading.
    ///
    /// The guard must not be held across an `.await`.
    pub fn read(&self) -> RwLockReadGuard<'_, Store> {
        self.store.read()
    }

    /// Locks the store for writing.
    ///
    /// The guard must not be held across an `.await`.
    pub fn write(&self) -> RwLockWriteGuard<'_, Store> {
        self.store.write()
    }
}

/// Builds the HTTP routing table over the given state.
pub fn router(state: AppState, max_body_size: usize) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/api/tasks", get(api::list_tasks).post(api::create_task))
        .route("/api/tasks/reorder", post(api::reorder_tasks))
        .route("/api/tasks/board", get(api::task_board))
        .route(
            "/api/tasks/{id}",
            get(api::get_task)
                .patch(api::update_task)
                .delete(api::delete_task),
        )
        .route("/api/stats", get(api::task_stats))
        .route(
            "/api/projects",
            get(api::list_projects).post(api::create_project),
        )
        .route("/api/projects/{id}", get(api::get_project))
        .layer(DefaultBodyLimit::max(max_body_size))
        .with_state(state)
}

/// Starts the server with a seeded store on the given address and returns
/// the bound address and a join handle.
///
/// # Errors
///
/// Returns an error if the TCP listener cannot bind to the given address.
pub async fn start_server(
    addr: &str,
) -> Result<
    (std::net::SocketAddr, tokio::task::JoinHandle<()>),
    Box<dyn std::error::Error + Send + Sync>,
> {
    start_server_with_state(addr, AppState::new(Store::seeded()), DEFAULT_MAX_BODY_SIZE).await
}

/// Starts the server over a pre-built [`AppState`].
///
/// This is the entry point used by `main.rs` once configuration is resolved.
///
/// # Errors
///
/// Returns an error if the TCP listener cannot bind to the given address.
pub async fn start_server_with_state(
    addr: &str,
    state: AppState,
    max_body_size: usize,
) -> Result<
    (std::net::SocketAddr, tokio::task::JoinHandle<()>),
    Box<dyn std::error::Error + Send + Sync>,
> {
    let app = router(state, max_body_size);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let bound_addr = listener.local_addr()?;

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "http server error");
        }
    });

    Ok((bound_addr, handle))
}
