//! Kafka-backed [`EventPublisher`].
//!
//! Produces to a single partition of one topic through an `rskafka`
//! partition client. The client is connected once at startup and shared by
//! every request; `rskafka` multiplexes concurrent produce calls over its
//! broker connection.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use rskafka::client::partition::{Compression, PartitionClient, UnknownTopicHandling};
use rskafka::client::ClientBuilder;
use rskafka::record::Record;

use crate::publisher::{EventPublisher, PublishError};

/// Connection parameters for the notification topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KafkaConfig {
    /// Bootstrap broker, `host:port`.
    pub bootstrap: String,
    /// Topic that receives company notifications.
    pub topic: String,
    /// Partition to produce to.
    pub partition: i32,
}

/// Publishes notifications to Kafka.
pub struct KafkaPublisher {
    client: PartitionClient,
    topic: String,
    partition: i32,
}

impl std::fmt::Debug for KafkaPublisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KafkaPublisher")
            .field("topic", &self.topic)
            .field("partition", &self.partition)
            .finish()
    }
}

impl KafkaPublisher {
    /// Connect to the bootstrap broker and resolve the topic partition.
    pub async fn connect(config: &KafkaConfig) -> Result<Self, PublishError> {
        let client = ClientBuilder::new(vec![config.bootstrap.clone()])
            .build()
            .await
            .map_err(|e| PublishError::Unavailable(e.to_string()))?;
        let partition_client = client
            .partition_client(
                config.topic.clone(),
                config.partition,
                UnknownTopicHandling::Retry,
            )
            .await
            .map_err(|e| PublishError::Unavailable(e.to_string()))?;

        tracing::info!(
            bootstrap = %config.bootstrap,
            topic = %config.topic,
            partition = config.partition,
            "connected to notification stream"
        );

        Ok(Self {
            client: partition_client,
            topic: config.topic.clone(),
            partition: config.partition,
        })
    }
}

#[async_trait]
impl EventPublisher for KafkaPublisher {
    async fn publish(&self, key: &str, value: Vec<u8>) -> Result<(), PublishError> {
        let record = Record {
            key: Some(key.as_bytes().to_vec()),
            value: Some(value),
            headers: BTreeMap::new(),
            timestamp: Utc::now(),
        };
        self.client
            .produce(vec![record], Compression::NoCompression)
            .await
            .map(|_offsets| ())
            .map_err(|e| PublishError::Unavailable(e.to_string()))
    }
}
