//! HTTP server startup logic.

use axum::Router;
use tokio::net::TcpListener;

use super::shutdown;

/// Server startup error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Start the HTTP server on `host:port`.
///
/// This function blocks until the server shuts down.
pub async fn start_server(app: Router, host: &str, port: u16) -> Result<(), ServerError> {
    let listener = TcpListener::bind((host, port))
        .await
        .map_err(|source| ServerError::Bind {
            addr: format!("{host}:{port}"),
            source,
        })?;

    let addr = listener.local_addr().map_err(ServerError::Serve)?;
    tracing::info!(%addr, "Starting HTTP server at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown::shutdown_signal())
        .await
        .map_err(ServerError::Serve)?;

    tracing::info!("Server stopped");
    Ok(())
}
