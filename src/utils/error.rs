//! The `error` module defines the error types shared across `topiclog`.
//!
//! The store itself has exactly one failure mode: reading a topic that has
//! never been published to. Publishing never fails.

use thiserror::Error;

/// Errors returned by the read paths of the [`Store`](crate::store::Store).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The topic has never received a publish.
    #[error("topic does not exist: {0}")]
    TopicNotFound(String),
}
