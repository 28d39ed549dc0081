//! Mini Image Server - A minimal static image server
//!
//! Serves image files by name from a directory tree, keeping recently
//! requested files in a bounded concurrent LRU cache.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mini_image_server::{api::create_router, AppState, Config};

/// Main entry point for the image server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the file cache with the configured capacity
/// 4. Create Axum router with all endpoints
/// 5. Start HTTP server on configured address
/// 6. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mini_image_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Mini Image Server");

    // Malformed capacity is fatal
    let config = Config::from_env().map_err(|e| {
        error!("Invalid configuration: {}", e);
        e
    })?;
    info!(
        "Configuration loaded: cache_capacity={}, root_dir={}, error_log={}, extensions={:?}, rewrite_on_hit={}",
        config.cache_capacity,
        config.root_dir.display(),
        config.error_log_path.display(),
        config.allowed_extensions,
        config.rewrite_on_hit
    );

    // Zero capacity is fatal: no cache, no server
    let state = AppState::from_config(&config).map_err(|e| {
        error!("Failed to create cache: {}", e);
        e
    })?;
    info!(capacity = state.cache.capacity(), "File cache initialized");

    if !config.root_dir.is_dir() {
        error!(
            "Root directory {} does not exist; every lookup will fail",
            config.root_dir.display()
        );
    }

    let app = create_router(state);

    let addr = SocketAddr::new(config.server_host, config.server_port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
