//! Per-topic request handlers.
//!
//! Both endpoints serve two flavours on the same path: a request carrying a
//! WebSocket upgrade becomes a long-lived session (see
//! [`websocket`](crate::transport::websocket)), anything else is answered
//! as a one-shot HTTP exchange.

use std::sync::Arc;

use axum::extract::ws::WebSocketUpgrade;
use axum::extract::ws::rejection::WebSocketUpgradeRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use tracing::{debug, error};

use crate::store::Store;
use crate::transport::websocket;

/// `ANY /topic/{topic}/publish`
///
/// Plain HTTP publishes the request body and answers `ok`.
pub async fn publish(
    State(store): State<Arc<Store>>,
    Path(topic): Path<String>,
    upgrade: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
    body: Bytes,
) -> Response {
    match upgrade {
        Ok(ws) => ws.on_upgrade(move |socket| websocket::publish_session(socket, store, topic)),
        Err(_) => {
            debug!(%topic, bytes = body.len(), "http publish");
            publish_detached(store, topic, body).await;
            (StatusCode::OK, "ok").into_response()
        }
    }
}

/// `ANY /topic/{topic}/subscribe`
///
/// Plain HTTP returns the topic's history, one message per line.
pub async fn subscribe(
    State(store): State<Arc<Store>>,
    Path(topic): Path<String>,
    upgrade: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> Response {
    if let Ok(ws) = upgrade {
        return ws.on_upgrade(move |socket| websocket::subscribe_session(socket, store, topic));
    }

    match store.read_history(&topic).await {
        Ok(history) => {
            let size = history.iter().map(|m| m.len() + 1).sum();
            let mut body = Vec::with_capacity(size);
            for message in &history {
                body.extend_from_slice(message);
                body.push(b'\n');
            }
            (StatusCode::OK, body).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// Publish on a task of its own so that a client hanging up mid-request
/// cannot cut the broadcast short.
pub(crate) async fn publish_detached(store: Arc<Store>, topic: String, message: Bytes) {
    let task = tokio::spawn(async move { store.publish(&topic, message).await });
    if let Err(e) = task.await {
        error!("publish task failed: {e}");
    }
}
