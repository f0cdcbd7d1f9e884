//! HTTP server startup logic.

use std::net::SocketAddr;

use axum::Router;
use axum_server::Handle;

use crate::state::AppState;

use super::shutdown;

/// Server startup error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid http.host or http.port: {0}")]
    Address(String),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Start the HTTP server based on configuration.
///
/// This function blocks until the server shuts down.
pub async fn start_server(app: Router, state: &AppState) -> Result<(), ServerError> {
    let bind = state.config.http.bind_address();
    let addr: SocketAddr = bind
        .parse()
        .map_err(|e| ServerError::Address(format!("{}: {}", bind, e)))?;

    let handle = Handle::new();

    tracing::info!(
        %addr,
        trust_proxy_headers = state.config.http.trust_proxy_headers,
        "Starting HTTP server"
    );

    shutdown::setup_shutdown_handler(handle.clone());
    shutdown::setup_reload_handler(state.clone());

    // Connect info feeds the peer address to the request span
    axum_server::bind(addr)
        .handle(handle)
        .serve(app.into_make_service_with_connect_info::<SocketAddr>())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
