use std::sync::Arc;

use axum::Router;
use axum::routing::any;
use tower_http::trace::TraceLayer;

use crate::store::Store;
use crate::transport::handlers;

/// Build the router:
/// - `/topic/{topic}/publish` -- publish over HTTP or WebSocket
/// - `/topic/{topic}/subscribe` -- history over HTTP, history plus live
///   feed over WebSocket
pub fn build_router(store: Arc<Store>) -> Router {
    Router::new()
        .route("/topic/{topic}/publish", any(handlers::publish))
        .route("/topic/{topic}/subscribe", any(handlers::subscribe))
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}
