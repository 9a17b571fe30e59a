//! Subscription handles
//!
//! A subscription is split in two when it is created:
//! - [`Subscription`] goes back to the caller. It reads events and owns the
//!   right to cancel.
//! - [`Subscriber`] stays in the store's active list. It writes events and
//!   watches for cancellation.
//!
//! Cancellation travels over a `watch` channel, so the store always sees it
//! through a synchronized read. The store only looks at it during a
//! broadcast pass; a cancelled subscription stays listed (and skipped) until
//! the next publish prunes it.

use tokio::sync::{mpsc, oneshot, watch};
use tracing::debug;
use uuid::Uuid;

use crate::store::event::MessageEvent;

pub type SubscriptionId = String;

/// One event in flight. For rendezvous delivery `accepted` completes the
/// handoff once the consumer has taken the event.
#[derive(Debug)]
pub(crate) struct Delivery {
    pub(crate) event: MessageEvent,
    pub(crate) accepted: Option<oneshot::Sender<()>>,
}

/// The caller's side of a live feed.
///
/// Events arrive in publish order, for every topic. Dropping the handle
/// cancels it.
#[derive(Debug)]
pub struct Subscription {
    id: SubscriptionId,
    events: mpsc::Receiver<Delivery>,
    cancel: watch::Sender<bool>,
}

impl Subscription {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Wait for the next event.
    ///
    /// Returns `None` once the subscription is cancelled or the store has
    /// disconnected it. Cancel-safe: the only await point is the channel
    /// receive.
    pub async fn recv(&mut self) -> Option<MessageEvent> {
        if self.is_cancelled() {
            return None;
        }
        let delivery = self.events.recv().await?;
        if let Some(accepted) = delivery.accepted {
            // the broadcaster may already have timed out on us
            let _ = accepted.send(());
        }
        Some(delivery.event)
    }

    /// Signal cancellation. Safe to call more than once.
    pub fn cancel(&self) {
        if !self.cancel.send_replace(true) {
            debug!(subscription = %self.id, "subscription cancelled");
        }
    }

    pub fn is_cancelled(&self) -> bool {
        *self.cancel.borrow()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// The store's side of a live feed.
#[derive(Debug)]
pub(crate) struct Subscriber {
    pub(crate) id: SubscriptionId,
    pub(crate) events: mpsc::Sender<Delivery>,
    pub(crate) closed: watch::Receiver<bool>,
}

impl Subscriber {
    /// True once the owner cancelled or dropped its handle.
    pub(crate) fn is_closed(&self) -> bool {
        *self.closed.borrow() || self.events.is_closed()
    }
}

/// Create both halves of a new, open subscription.
pub(crate) fn pair(capacity: usize) -> (Subscription, Subscriber) {
    let id = Uuid::new_v4().to_string();
    let (events_tx, events_rx) = mpsc::channel(capacity.max(1));
    let (cancel_tx, cancel_rx) = watch::channel(false);

    let subscription = Subscription {
        id: id.clone(),
        events: events_rx,
        cancel: cancel_tx,
    };
    let subscriber = Subscriber {
        id,
        events: events_tx,
        closed: cancel_rx,
    };
    (subscription, subscriber)
}
