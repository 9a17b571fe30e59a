//! Store engine
//!
//! The store owns every topic log and the list of live subscriptions, and
//! guards both with a single `tokio::sync::Mutex`. Every operation holds
//! that lock for its whole duration, broadcast included, so operations are
//! strictly serialized and publishes are totally ordered.
//!
//! Usage notes:
//! - `read_history_and_subscribe` takes the history snapshot and registers
//!   the subscription inside one critical section, so a caller sees every
//!   message exactly once across "history" and "live feed".
//! - `publish` does not return until the broadcast pass is over. Under
//!   [`DeliveryPolicy::Rendezvous`] that means until every open subscriber
//!   has taken the event; one consumer that stops draining blocks every
//!   other caller of the store.
//! - If a `publish` future is dropped mid-broadcast, the message stays in
//!   the log and the active list stays intact, but subscribers not yet
//!   reached miss that event. Callers that can be cancelled (request
//!   handlers) should run publishes on their own task.

use bytes::Bytes;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::store::delivery::{DeliveryOutcome, DeliveryPolicy};
use crate::store::event::MessageEvent;
use crate::store::log::{History, TopicLogs};
use crate::store::subscription::{self, Subscriber, Subscription};
use crate::utils::error::StoreError;

#[derive(Debug, Default)]
struct StoreState {
    logs: TopicLogs,
    subscribers: Vec<Subscriber>,
}

#[derive(Debug, Default)]
pub struct Store {
    state: Mutex<StoreState>,
    policy: DeliveryPolicy,
}

impl Store {
    pub fn new(policy: DeliveryPolicy) -> Self {
        Self {
            state: Mutex::new(StoreState::default()),
            policy,
        }
    }

    pub fn policy(&self) -> DeliveryPolicy {
        self.policy
    }

    /// Every message ever published to `topic`, oldest first.
    ///
    /// Never creates the topic.
    pub async fn read_history(&self, topic: &str) -> Result<History, StoreError> {
        let state = self.state.lock().await;
        state
            .logs
            .read(topic)
            .map(<[Bytes]>::to_vec)
            .ok_or_else(|| StoreError::TopicNotFound(topic.to_string()))
    }

    /// The history of `topic` plus a live feed of every later publish.
    ///
    /// The feed is not filtered: it carries events for all topics, and the
    /// caller picks out the ones it wants with [`MessageEvent::is_for`].
    /// Nothing is registered when the topic does not exist.
    pub async fn read_history_and_subscribe(
        &self,
        topic: &str,
    ) -> Result<(History, Subscription), StoreError> {
        let mut state = self.state.lock().await;
        let history = state
            .logs
            .read(topic)
            .map(<[Bytes]>::to_vec)
            .ok_or_else(|| StoreError::TopicNotFound(topic.to_string()))?;

        let (subscription, subscriber) = subscription::pair(self.policy.channel_capacity());
        debug!(
            subscription = %subscriber.id,
            topic,
            history = history.len(),
            "subscription opened"
        );
        state.subscribers.push(subscriber);

        Ok((history, subscription))
    }

    /// Append `message` to `topic` (creating it if new) and broadcast it to
    /// every open subscription before returning.
    pub async fn publish(&self, topic: &str, message: impl Into<Bytes>) {
        let message = message.into();
        let mut state = self.state.lock().await;
        if !state.logs.contains(topic) {
            debug!(topic, "topic created");
        }
        state.logs.append(topic, message.clone());
        debug!(
            topic,
            position = state.logs.len(topic),
            subscribers = state.subscribers.len(),
            "message appended"
        );

        let event = MessageEvent::new(topic, message);
        broadcast(&mut state.subscribers, &event, self.policy).await;
    }

    /// Number of subscriptions in the active list, including cancelled ones
    /// the next broadcast has yet to prune.
    pub async fn subscriber_count(&self) -> usize {
        self.state.lock().await.subscribers.len()
    }

    pub async fn topic_count(&self) -> usize {
        self.state.lock().await.logs.topic_count()
    }
}

/// Deliver `event` to every open subscriber and prune the rest.
///
/// The list is edited in place so it stays consistent if this future is
/// dropped at an await point.
async fn broadcast(subscribers: &mut Vec<Subscriber>, event: &MessageEvent, policy: DeliveryPolicy) {
    let mut index = 0;
    while let Some(subscriber) = subscribers.get_mut(index) {
        if subscriber.is_closed() {
            debug!(subscription = %subscriber.id, "pruning closed subscription");
            subscribers.remove(index);
            continue;
        }

        match subscriber.deliver(event.clone(), policy).await {
            DeliveryOutcome::Delivered => {
                index += 1;
                continue;
            }
            DeliveryOutcome::Closed => {
                debug!(subscription = %subscriber.id, "subscription closed during delivery");
            }
            outcome @ (DeliveryOutcome::TimedOut | DeliveryOutcome::Overflowed) => {
                warn!(
                    subscription = %subscriber.id,
                    ?outcome,
                    "disconnecting slow subscription"
                );
            }
        }
        subscribers.remove(index);
    }
}
