//! Server lifecycle.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use crate::config::ServerSettings;
use crate::store::Store;
use crate::transport::router::build_router;

/// Errors that can occur when starting or running the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("bind error: {0}")]
    Bind(String),

    #[error("serve error: {0}")]
    Serve(String),
}

/// Bind to `host:port` from `settings` and serve until the server fails.
pub async fn start_server(settings: &ServerSettings, store: Arc<Store>) -> Result<(), ServerError> {
    let addr = format!("{}:{}", settings.host, settings.port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| ServerError::Bind(format!("bind failed on {addr}: {e}")))?;

    serve(listener, store).await
}

/// Serve on an already bound listener.
pub async fn serve(listener: TcpListener, store: Arc<Store>) -> Result<(), ServerError> {
    let addr = listener
        .local_addr()
        .map_err(|e| ServerError::Bind(e.to_string()))?;
    info!(%addr, "topiclog listening");

    axum::serve(listener, build_router(store))
        .await
        .map_err(|e| ServerError::Serve(e.to_string()))
}
