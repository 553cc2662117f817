//! Server startup and shutdown.
//!
//! This module contains the `run_server` function which handles:
//! - Storage initialization
//! - Application state creation
//! - Router creation
//! - Server binding and graceful shutdown

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::routes;
use crate::state::AppState;
use crate::storage::MemoryStorage;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Build the shared application state from configuration.
pub fn build_state(config: &Config) -> AppState {
    let storage = MemoryStorage::new(
        config.url.short_code_length,
        config.url.short_code_max_attempts,
    );

    AppState {
        storage: Arc::new(storage),
        public_base_url: config.url.public_base_url(),
        default_expiry: config.url.default_expiry,
        strict_url_validation: config.url.strict_url_validation,
        static_dir: PathBuf::from(&config.server.static_dir),
    }
}

/// Run the web server with the given configuration.
///
/// # Arguments
///
/// * `config` - The application configuration
/// * `addr` - The address to bind the server to (e.g., "127.0.0.1:3000")
///
/// # Errors
///
/// Returns an error if binding fails or the server stops with a runtime error.
pub async fn run_server(config: Config, addr: String) -> AppResult<()> {
    info!("Starting snaplink server...");

    let state = Arc::new(build_state(&config));

    match &state.public_base_url {
        Some(base_url) => info!("Short links use {}", base_url),
        None => info!("Short links use the request host"),
    }

    let app = routes::create_router(state, &config.cors, config.server.max_body_bytes);

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to bind to address {}: {}", addr, e)))?;

    info!("Server listening on {}", addr);
    info!("Serving UI from {}", config.server.static_dir);

    axum::serve(listener, app)
        .with_graceful_shutdown(create_shutdown_signal())
        .await
        .map_err(|e| AppError::Internal(format!("Server error: {}", e)))?;

    info!("Server shutdown complete");
    Ok(())
}

/// Create a future that resolves when a shutdown signal is received.
///
/// On Unix-like systems, this listens for both Ctrl+C (SIGINT) and SIGTERM.
/// On other platforms, it only listens for Ctrl+C.
///
/// # Panics
///
/// Panics if signal handler installation fails; without it the process
/// cannot be shut down gracefully.
async fn create_shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(unix)]
    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    #[cfg(not(unix))]
    ctrl_c.await;

    info!("Shutdown signal received");
}
