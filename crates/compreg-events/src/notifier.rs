//! Fire-and-forget dispatch of notification events.

use std::sync::Arc;

use crate::event::NotificationEvent;
use crate::publisher::EventPublisher;

/// Hands events to an [`EventPublisher`] without blocking the caller.
///
/// Cloning is cheap; every clone shares the same publisher.
#[derive(Debug, Clone)]
pub struct Notifier {
    publisher: Arc<dyn EventPublisher>,
}

impl Notifier {
    /// Wrap a publisher.
    pub fn new(publisher: Arc<dyn EventPublisher>) -> Self {
        Self { publisher }
    }

    /// Publish `event` on a spawned task and return immediately.
    ///
    /// Must be called from within a tokio runtime. Failures are logged at
    /// error level; nothing is retried.
    pub fn emit(&self, event: NotificationEvent) {
        let publisher = Arc::clone(&self.publisher);
        tokio::spawn(async move {
            let key = event.dedupe_key();
            let value = match event.payload() {
                Ok(value) => value,
                Err(e) => {
                    tracing::error!(key, error = %e, "unable to encode notification");
                    return;
                }
            };
            match publisher.publish(key, value).await {
                Ok(()) => tracing::debug!(
                    key,
                    operation = %event.operation(),
                    "notification published"
                ),
                Err(e) => tracing::error!(
                    key,
                    operation = %event.operation(),
                    error = %e,
                    "unable to publish notification"
                ),
            }
        });
    }
}
