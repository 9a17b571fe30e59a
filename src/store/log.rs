//! Topic logs
//!
//! `TopicLogs` maps a topic name to the ordered list of every message ever
//! published to it. Logs are append-only: entries are never removed or
//! reordered, and a topic, once created, is never deleted.
//!
//! There is no retention policy, so memory grows with every publish.
//!
//! Concurrency note: callers must synchronize access (the store keeps
//! `TopicLogs` behind its lock).

use std::collections::HashMap;

use bytes::Bytes;

/// A snapshot of one topic's log, oldest message first.
pub type History = Vec<Bytes>;

#[derive(Debug, Default)]
pub struct TopicLogs {
    topics: HashMap<String, Vec<Bytes>>,
}

impl TopicLogs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `message` to `topic`, creating the topic on first use.
    pub fn append(&mut self, topic: &str, message: Bytes) {
        match self.topics.get_mut(topic) {
            Some(log) => log.push(message),
            None => {
                self.topics.insert(topic.to_string(), vec![message]);
            }
        }
    }

    /// All messages of `topic`, or `None` if nothing was ever appended.
    pub fn read(&self, topic: &str) -> Option<&[Bytes]> {
        self.topics.get(topic).map(Vec::as_slice)
    }

    pub fn contains(&self, topic: &str) -> bool {
        self.topics.contains_key(topic)
    }

    /// Number of messages in `topic`; zero for unknown topics.
    pub fn len(&self, topic: &str) -> usize {
        self.topics.get(topic).map_or(0, Vec::len)
    }

    pub fn topic_count(&self) -> usize {
        self.topics.len()
    }
}
