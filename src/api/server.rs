//! HTTP server lifecycle management.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use crate::api::error::ServerError;
use crate::api::router::build_router;
use crate::api::state::ApiState;
use crate::config::ApiConfig;

/// Start the HTTP API.
///
/// Binds to the configured address and serves requests until `Ctrl-C`
/// is received.
///
/// # Errors
///
/// Returns an error if the address is invalid, the listener cannot bind,
/// or the server encounters a fatal I/O error.
pub async fn start_server(config: &ApiConfig, state: Arc<ApiState>) -> Result<(), ServerError> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| ServerError::Bind(format!("invalid address: {e}")))?;

    let router = build_router(state);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::Bind(format!("bind failed on {addr}: {e}")))?;

    info!(%addr, "Weather station API listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServerError::Serve(format!("serve error: {e}")))?;

    info!("Weather station API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
