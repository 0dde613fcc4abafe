//! Taskdeck server -- in-memory task and project tracker over HTTP/JSON.
//!
//! All state lives in memory for the lifetime of the process and is lost
//! on restart.
//!
//! # Usage
//!
//! ```bash
//! # Run on default address 0.0.0.0:5000
//! cargo run --bin taskdeck-server
//!
//! # Run on custom address without the default projects
//! cargo run --bin taskdeck-server -- --bind 127.0.0.1:8080 --no-seed
//!
//! # Or via environment variable
//! TASKDECK_ADDR=127.0.0.1:8080 cargo run --bin taskdeck-server
//! ```

use std::path::Path;

use clap::Parser;
use taskdeck_server::config::{ServerCliArgs, ServerConfig};
use taskdeck_server::server::{self, AppState};
use taskdeck_server::store::Store;
use tracing_appender::non_blocking::WorkerGuard;

#[tokio::main]
async fn main() {
    let cli = ServerCliArgs::parse();

    // Load config from CLI args + config file + env vars + defaults.
    let config = match ServerConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            std::process::exit(1);
        }
    };

    // Keep the guard alive so buffered file logs are flushed on exit.
    let _log_guard = init_logging(&config.log_level, config.log_file.as_deref());

    tracing::info!(addr = %config.bind_addr, seed = config.seed_defaults, "starting taskdeck server");

    let store = if config.seed_defaults {
        Store::seeded()
    } else {
        Store::new()
    };
    let state = AppState::new(store);

    match server::start_server_with_state(&config.bind_addr, state, config.max_body_size).await {
        Ok((bound_addr, handle)) => {
            tracing::info!(addr = %bound_addr, "http server listening");
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "http server task failed");
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to start http server");
            std::process::exit(1);
        }
    }
}

/// Initializes tracing to stdout, or to `file_path` when given.
///
/// `RUST_LOG` overrides `level` when set.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let Some((log_dir, file_name)) = file_path.and_then(|p| Some((p.parent()?, p.file_name()?)))
    else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
        return None;
    };

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    Some(guard)
}
