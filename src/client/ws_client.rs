//! WebSocket client helpers
//!
//! Thin wrappers used by the `publish` and `subscribe` CLI commands. They
//! speak the same per-topic endpoints as any other WebSocket client.

use bytes::Bytes;
use futures_util::{SinkExt, StreamExt};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::{self, Message as WsMessage};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("websocket error: {0}")]
    WebSocket(#[from] Box<tungstenite::Error>),

    #[error("unexpected reply from server: {0}")]
    UnexpectedReply(String),

    #[error("connection closed before the server replied")]
    ConnectionClosed,
}

impl From<tungstenite::Error> for ClientError {
    fn from(e: tungstenite::Error) -> Self {
        Self::WebSocket(Box::new(e))
    }
}

/// `ws://host:port` + `/topic/{topic}/{action}`
pub fn topic_url(base_url: &str, topic: &str, action: &str) -> String {
    format!("{}/topic/{topic}/{action}", base_url.trim_end_matches('/'))
}

/// Publish one message and wait for the server's `ok`.
pub async fn publish(base_url: &str, topic: &str, message: &str) -> Result<(), ClientError> {
    let (mut ws_stream, _) = connect_async(topic_url(base_url, topic, "publish")).await?;

    ws_stream.send(WsMessage::text(message.to_string())).await?;

    match ws_stream.next().await {
        Some(Ok(WsMessage::Text(reply))) if reply.as_str() == "ok" => {
            ws_stream.close(None).await?;
            Ok(())
        }
        Some(Ok(other)) => Err(ClientError::UnexpectedReply(other.to_string())),
        Some(Err(e)) => Err(e.into()),
        None => Err(ClientError::ConnectionClosed),
    }
}

/// Stream `topic`: history first, then live messages, until the server
/// closes the connection.
pub async fn subscribe<F>(base_url: &str, topic: &str, mut on_message: F) -> Result<(), ClientError>
where
    F: FnMut(Bytes),
{
    let (mut ws_stream, _) = connect_async(topic_url(base_url, topic, "subscribe")).await?;

    while let Some(frame) = ws_stream.next().await {
        match frame? {
            WsMessage::Text(text) => on_message(Bytes::copy_from_slice(text.as_str().as_bytes())),
            WsMessage::Binary(data) => on_message(data),
            WsMessage::Close(_) => break,
            _ => {}
        }
    }

    Ok(())
}
