use bytes::Bytes;

/// A published message on its way to live subscriptions.
///
/// One event is built per publish and handed to every open subscription,
/// whatever topic that subscription was opened against. Consumers that
/// only care about one topic filter with [`MessageEvent::is_for`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageEvent {
    pub topic: String,
    pub message: Bytes,
}

impl MessageEvent {
    pub fn new(topic: &str, message: Bytes) -> Self {
        Self {
            topic: topic.to_string(),
            message,
        }
    }

    pub fn is_for(&self, topic: &str) -> bool {
        self.topic == topic
    }
}
