//! The notification-stream collaborator.

use async_trait::async_trait;
use thiserror::Error;

/// Errors from a publish attempt. Never surfaced to HTTP clients.
#[derive(Error, Debug)]
pub enum PublishError {
    /// The event could not be serialized.
    #[error("failed to serialize event: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The stream could not be reached or refused the message.
    #[error("stream unavailable: {0}")]
    Unavailable(String),
}

/// A keyed-message sink.
///
/// Implementations must be safe to call from many tasks at once; the
/// notifier shares one instance behind an `Arc`.
#[async_trait]
pub trait EventPublisher: Send + Sync + std::fmt::Debug {
    /// Publish one message. Delivery is fire-and-forget from the caller's view.
    async fn publish(&self, key: &str, value: Vec<u8>) -> Result<(), PublishError>;
}

/// Publisher used when no broker is configured: each event becomes a log line.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogPublisher;

#[async_trait]
impl EventPublisher for LogPublisher {
    async fn publish(&self, key: &str, value: Vec<u8>) -> Result<(), PublishError> {
        tracing::info!(
            key,
            value = %String::from_utf8_lossy(&value),
            "notification (no stream configured)"
        );
        Ok(())
    }
}
