//! Delivery strategies for the broadcast pass
//!
//! The broadcast runs while the store lock is held, so how long a single
//! handoff may take decides how far one slow consumer can hold up every
//! other store operation. [`DeliveryPolicy`] names that choice:
//!
//! - `Rendezvous`: wait until the consumer has accepted the event. A
//!   consumer that stops draining stalls the whole store until it drains,
//!   cancels, or drops its handle. This is the only backpressure there is:
//!   a slow subscriber throttles all publishers.
//! - `RendezvousTimeout`: as above, but give up on a consumer after a
//!   fixed wait and disconnect it.
//! - `Buffered`: queue up to `capacity` events per subscriber without
//!   waiting; a subscriber whose queue is full is disconnected.
//!
//! Every strategy keeps per-subscriber order and never duplicates. A
//! disconnected subscriber's feed simply ends.

use std::time::Duration;

use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{oneshot, watch};

use crate::store::event::MessageEvent;
use crate::store::subscription::{Delivery, Subscriber};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeliveryPolicy {
    /// Synchronous handoff with no time limit.
    #[default]
    Rendezvous,
    /// Synchronous handoff, disconnecting consumers slower than the limit.
    RendezvousTimeout(Duration),
    /// Bounded per-subscriber queue, disconnecting on overflow.
    Buffered { capacity: usize },
}

impl DeliveryPolicy {
    pub(crate) fn channel_capacity(self) -> usize {
        match self {
            Self::Buffered { capacity } => capacity.max(1),
            Self::Rendezvous | Self::RendezvousTimeout(_) => 1,
        }
    }
}

/// How a single handoff to one subscriber ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Delivered,
    /// The consumer cancelled or went away.
    Closed,
    TimedOut,
    Overflowed,
}

impl Subscriber {
    pub(crate) async fn deliver(
        &mut self,
        event: MessageEvent,
        policy: DeliveryPolicy,
    ) -> DeliveryOutcome {
        match policy {
            DeliveryPolicy::Rendezvous => self.handoff(event).await,
            DeliveryPolicy::RendezvousTimeout(limit) => {
                match tokio::time::timeout(limit, self.handoff(event)).await {
                    Ok(outcome) => outcome,
                    Err(_) => DeliveryOutcome::TimedOut,
                }
            }
            DeliveryPolicy::Buffered { .. } => {
                let delivery = Delivery {
                    event,
                    accepted: None,
                };
                match self.events.try_send(delivery) {
                    Ok(()) => DeliveryOutcome::Delivered,
                    Err(TrySendError::Full(_)) => DeliveryOutcome::Overflowed,
                    Err(TrySendError::Closed(_)) => DeliveryOutcome::Closed,
                }
            }
        }
    }

    /// Hand `event` over and wait until the consumer accepts it, or until
    /// the consumer cancels while we wait.
    async fn handoff(&mut self, event: MessageEvent) -> DeliveryOutcome {
        let (accepted_tx, accepted_rx) = oneshot::channel();
        let delivery = Delivery {
            event,
            accepted: Some(accepted_tx),
        };

        let Self { events, closed, .. } = self;
        let accepted = async move {
            events.send(delivery).await.ok()?;
            accepted_rx.await.ok()
        };

        // an accepted handoff wins even if the consumer cancelled right after
        tokio::select! {
            biased;
            result = accepted => match result {
                Some(()) => DeliveryOutcome::Delivered,
                None => DeliveryOutcome::Closed,
            },
            () = cancelled(closed) => DeliveryOutcome::Closed,
        }
    }
}

/// Resolves once the owner has cancelled (or dropped) the subscription.
async fn cancelled(closed: &mut watch::Receiver<bool>) {
    while !*closed.borrow_and_update() {
        if closed.changed().await.is_err() {
            return;
        }
    }
}
