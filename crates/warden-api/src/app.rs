//! Application builder and server runner.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::sync::watch;

use warden_auth::SessionCleanup;
use warden_core::config::AppConfig;
use warden_core::error::AppError;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Runs the Warden server until Ctrl-C.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Warden server...");

    let state = AppState::from_config(config.clone())?;
    tracing::info!(
        users = state.auth.credentials().len(),
        sandbox = %state.files.guard().base().display(),
        ttl_minutes = config.session.ttl_minutes,
        "Components initialized"
    );

    if !config.session.cookie_secure {
        tracing::warn!(
            "session.cookie_secure is false: session cookies will be sent over plaintext HTTP"
        );
    }

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let cleanup_handle = if config.session.cleanup_enabled {
        let cleanup = SessionCleanup::new(Arc::clone(&state.sessions), &config.session);
        Some(cleanup.spawn(shutdown_rx.clone()))
    } else {
        tracing::info!("Background session cleanup disabled; expired sessions purged on access");
        None
    };

    let app = build_app(state);
    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Warden server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    let _ = shutdown_tx.send(true);
    if let Some(handle) = cleanup_handle {
        let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
        if tokio::time::timeout(grace, handle).await.is_err() {
            tracing::warn!("Session cleanup did not stop within the grace period");
        }
    }

    tracing::info!("Warden server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => {
            tracing::error!(error = %e, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
