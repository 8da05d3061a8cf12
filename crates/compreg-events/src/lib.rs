//! # compreg-events: Mutation Notifications
//!
//! Every successful pipeline operation hands one [`NotificationEvent`] to a
//! [`Notifier`]. The notifier publishes it on a spawned task and returns
//! immediately; a failed publish is logged and otherwise ignored.
//!
//! ## Publishers
//!
//! | Publisher          | When                          |
//! |--------------------|-------------------------------|
//! | [`KafkaPublisher`] | `KAFKA_URL` is configured     |
//! | [`LogPublisher`]   | no broker configured          |
//!
//! There is no retry, no buffering, and no ordering guarantee between
//! events from concurrent requests.

pub mod event;
pub mod kafka;
pub mod notifier;
pub mod publisher;

pub use event::{NotificationEvent, Operation};
pub use kafka::{KafkaConfig, KafkaPublisher};
pub use notifier::Notifier;
pub use publisher::{EventPublisher, LogPublisher, PublishError};
