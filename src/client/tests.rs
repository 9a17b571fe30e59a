use super::topic_url;

#[test]
fn test_topic_url() {
    assert_eq!(
        topic_url("ws://127.0.0.1:8000", "test_topic", "publish"),
        "ws://127.0.0.1:8000/topic/test_topic/publish"
    );
    assert_eq!(
        topic_url("ws://127.0.0.1:8000/", "test_topic", "subscribe"),
        "ws://127.0.0.1:8000/topic/test_topic/subscribe"
    );
}
