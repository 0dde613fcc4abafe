//! Taskdeck server library.
//!
//! Exposes the in-memory [`store::Store`], the HTTP handlers and router,
//! and configuration, for use by the binary, tests, and embedding.

pub mod api;
pub mod config;
pub mod error;
pub mod server;
pub mod store;
