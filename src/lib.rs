//! # topiclog
//!
//! `topiclog` is an in-memory, topic-addressed message store with live
//! subscriptions. Every topic keeps its full history; a subscriber gets that
//! history and, atomically with it, a feed of everything published after.
//! It is served over plain HTTP and WebSockets.
//!
//! ## Core Modules
//!
//! - `store`: topic logs, subscriptions and the broadcast pass.
//! - `transport`: the HTTP/WebSocket server in front of the store.
//! - `client`: a small WebSocket client for the CLI.
//! - `config`: loading and merging server configuration.
//! - `utils`: error types and logging setup.
//!
//! Topic logs are never trimmed, so memory grows with every publish. Nothing
//! survives a restart.

pub mod client;
pub mod config;
pub mod store;
pub mod transport;
pub mod utils;
