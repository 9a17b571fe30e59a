//! WebSocket sessions
//!
//! - Publish sessions publish every text or binary frame they receive to
//!   the session's topic and answer each one with `ok`.
//! - Subscribe sessions send the topic's history, then forward live events
//!   for that topic until either side goes away. The store's feed carries
//!   every topic; filtering happens here.
//!
//! Under the rendezvous policy a subscribe session that cannot write to its
//! client stops taking events, which holds up every publisher. Closing the
//! socket cancels the subscription and releases them.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use bytes::Bytes;
use tracing::{debug, info, warn};

use crate::store::Store;
use crate::transport::handlers::publish_detached;

pub async fn publish_session(mut socket: WebSocket, store: Arc<Store>, topic: String) {
    info!(%topic, "publisher connected");

    while let Some(frame) = socket.recv().await {
        let payload = match frame {
            Ok(Message::Text(text)) => Bytes::copy_from_slice(text.as_str().as_bytes()),
            Ok(Message::Binary(data)) => data,
            Ok(Message::Close(_)) => break,
            Ok(_) => continue,
            Err(e) => {
                debug!(%topic, "publish socket error: {e}");
                break;
            }
        };

        publish_detached(store.clone(), topic.clone(), payload).await;
        if socket.send(Message::Text(String::from("ok").into())).await.is_err() {
            break;
        }
    }

    info!(%topic, "publisher disconnected");
}

pub async fn subscribe_session(mut socket: WebSocket, store: Arc<Store>, topic: String) {
    let (history, mut subscription) = match store.read_history_and_subscribe(&topic).await {
        Ok(found) => found,
        Err(e) => {
            warn!(%topic, "subscribe rejected: {e}");
            let _ = socket.send(Message::Text(e.to_string().into())).await;
            let _ = socket.send(Message::Close(None)).await;
            return;
        }
    };
    info!(subscription = subscription.id(), %topic, "subscriber connected");

    for message in history {
        if socket.send(frame(message)).await.is_err() {
            return;
        }
    }

    loop {
        tokio::select! {
            event = subscription.recv() => match event {
                Some(event) if event.is_for(&topic) => {
                    if socket.send(frame(event.message)).await.is_err() {
                        debug!(subscription = subscription.id(), "send failed");
                        break;
                    }
                }
                Some(_) => {}
                None => {
                    debug!(subscription = subscription.id(), "feed ended by the store");
                    let _ = socket.send(Message::Close(None)).await;
                    break;
                }
            },
            incoming = socket.recv() => match incoming {
                Some(Ok(Message::Close(_))) | None => break,
                Some(Err(e)) => {
                    debug!(subscription = subscription.id(), "subscribe socket error: {e}");
                    break;
                }
                // frames from a subscriber carry nothing
                Some(Ok(_)) => {}
            },
        }
    }

    subscription.cancel();
    info!(subscription = subscription.id(), %topic, "subscriber disconnected");
}

/// Text frame for UTF-8 payloads, binary frame for everything else.
pub(crate) fn frame(message: Bytes) -> Message {
    match std::str::from_utf8(&message) {
        Ok(text) => Message::Text(text.to_owned().into()),
        Err(_) => Message::Binary(message),
    }
}
