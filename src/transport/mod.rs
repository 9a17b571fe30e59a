//! The `transport` module exposes the store over the network.
//!
//! Every topic gets two endpoints, `publish` and `subscribe`, each of which
//! speaks plain HTTP or WebSocket depending on whether the request asks
//! for an upgrade. The transport only calls the store's public operations.

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod websocket;

pub use router::build_router;
pub use server::{ServerError, serve, start_server};

#[cfg(test)]
mod tests;
