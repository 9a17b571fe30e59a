//! The `client` module holds the small WebSocket client behind the CLI's
//! `publish` and `subscribe` commands.

pub mod ws_client;

pub use ws_client::{ClientError, publish, subscribe, topic_url};

#[cfg(test)]
mod tests;
