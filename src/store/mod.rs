//! Topic store
//!
//! The in-memory store at the heart of `topiclog`: append-only topic logs,
//! live subscriptions, and the broadcast pass that connects them.
//!
//! Public types:
//! - `Store`: publish, read history, read history and subscribe.
//! - `Subscription`: the caller's handle on a live feed.
//! - `DeliveryPolicy`: how the broadcast hands events to subscribers.
//!
//! Binaries construct a `Store` and share it as `Arc<Store>`. [`global`]
//! offers a lazily created process-wide instance for embedders that prefer
//! one store per process.

pub mod delivery;
pub mod engine;
pub mod event;
pub mod log;
pub mod subscription;

use std::sync::OnceLock;

pub use delivery::{DeliveryOutcome, DeliveryPolicy};
pub use engine::Store;
pub use event::MessageEvent;
pub use log::History;
pub use subscription::{Subscription, SubscriptionId};

static GLOBAL_STORE: OnceLock<Store> = OnceLock::new();

/// The process-wide store, created with the default policy on first use
/// and never torn down.
pub fn global() -> &'static Store {
    GLOBAL_STORE.get_or_init(Store::default)
}
