use std::sync::Arc;

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use bytes::Bytes;
use serde_json::Value;
use tower::ServiceExt;

use crate::store::Store;
use crate::transport::build_router;

fn request(method: &str, uri: &str, body: &'static str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::from(body))
        .unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Bytes {
    to_bytes(response.into_body(), usize::MAX).await.unwrap()
}

#[tokio::test]
async fn test_http_publish_appends_to_history() {
    let store = Arc::new(Store::default());
    let router = build_router(store.clone());

    for payload in ["first", "second"] {
        let response = router
            .clone()
            .oneshot(request("POST", "/topic/test_topic/publish", payload))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_bytes(response).await, Bytes::from_static(b"ok"));
    }

    let history = store.read_history("test_topic").await.unwrap();
    assert_eq!(
        history,
        vec![Bytes::from_static(b"first"), Bytes::from_static(b"second")]
    );
}

#[tokio::test]
async fn test_http_subscribe_returns_history_lines() {
    let store = Arc::new(Store::default());
    store.publish("test_topic", "line one").await;
    store.publish("test_topic", "line two").await;
    let router = build_router(store);

    let response = router
        .oneshot(request("GET", "/topic/test_topic/subscribe", ""))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_bytes(response).await,
        Bytes::from_static(b"line one\nline two\n")
    );
}

#[tokio::test]
async fn test_http_subscribe_missing_topic_is_not_found() {
    let store = Arc::new(Store::default());
    let router = build_router(store.clone());

    let response = router
        .oneshot(request("GET", "/topic/missing_topic/subscribe", ""))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(body["error"], "topic does not exist: missing_topic");
    assert_eq!(body["status"], 404);

    // the read path never creates the topic
    assert_eq!(store.topic_count().await, 0);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let router = build_router(Arc::new(Store::default()));

    let response = router
        .oneshot(request("GET", "/topic/test_topic", ""))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[test]
fn test_frame_keeps_binary_payload_without_copying() {
    let payload = Bytes::from(vec![0xff, 0xfe, 0x00]);
    match crate::transport::websocket::frame(payload.clone()) {
        axum::extract::ws::Message::Binary(data) => {
            assert_eq!(data, payload);
            assert_eq!(data.as_ptr(), payload.as_ptr());
        }
        other => panic!("expected a binary frame, got {other:?}"),
    }
}

#[test]
fn test_frame_sends_utf8_as_text() {
    match crate::transport::websocket::frame(Bytes::from_static(b"hello")) {
        axum::extract::ws::Message::Text(text) => assert_eq!(text.as_str(), "hello"),
        other => panic!("expected a text frame, got {other:?}"),
    }
}
