use crate::sink::{SinkError, StatusSink};
use async_trait::async_trait;
use pipewatch_config::{AuthMechanism, KafkaConfig};
use rdkafka::config::ClientConfig;
use rdkafka::producer::{FutureProducer, FutureRecord};
use rdkafka::util::Timeout;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Kafka-backed [`StatusSink`].
///
/// Holds one long-lived `FutureProducer`, created at startup and shared by
/// every in-flight request. The producer handle is cheap to share and safe
/// for concurrent use.
pub struct KafkaStatusSink {
    producer: FutureProducer,
    topic: String,
    max_message_bytes: usize,
    send_timeout: Duration,
}

impl KafkaStatusSink {
    pub fn new(config: &KafkaConfig) -> Result<Self, rdkafka::error::KafkaError> {
        let mut client_config = ClientConfig::new();
        client_config
            .set("bootstrap.servers", &config.brokers)
            .set("message.timeout.ms", config.message_timeout_ms.to_string())
            // One record per request; dispatch immediately instead of
            // waiting for a batch to fill.
            .set("linger.ms", "0");

        match config.auth.mechanism {
            AuthMechanism::None => {}
            AuthMechanism::SaslPlain => {
                client_config
                    .set("security.protocol", "sasl_ssl")
                    .set("sasl.mechanism", "PLAIN")
                    .set("sasl.username", &config.auth.username)
                    .set("sasl.password", &config.auth.password);
            }
            AuthMechanism::SaslScram => {
                client_config
                    .set("security.protocol", "sasl_ssl")
                    .set("sasl.mechanism", "SCRAM-SHA-256")
                    .set("sasl.username", &config.auth.username)
                    .set("sasl.password", &config.auth.password);
            }
        }

        let producer: FutureProducer = client_config.create()?;

        info!(
            "Created Kafka producer for topic {} on {}",
            config.topic, config.brokers
        );

        Ok(Self {
            producer,
            topic: config.topic.clone(),
            max_message_bytes: config.max_message_bytes,
            send_timeout: Duration::from_millis(config.message_timeout_ms),
        })
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }
}

#[async_trait]
impl StatusSink for KafkaStatusSink {
    async fn send(&self, partition_key: &str, payload: &[u8]) -> Result<(), SinkError> {
        // Size gate before any broker I/O. Oversized events are a client
        // problem, not a delivery failure; no splitting, no retry.
        if payload.len() > self.max_message_bytes {
            warn!(
                "Event of {} bytes exceeds limit {}, rejecting",
                payload.len(),
                self.max_message_bytes
            );
            return Err(SinkError::TooLarge {
                size: payload.len(),
                max: self.max_message_bytes,
            });
        }

        let record: FutureRecord<str, [u8]> = FutureRecord::to(&self.topic)
            .key(partition_key)
            .payload(payload);

        self.producer
            .send(record, Timeout::After(self.send_timeout))
            .await
            .map_err(|(e, _)| SinkError::Delivery(e))?;

        debug!("Delivered event for partition key {}", partition_key);
        Ok(())
    }
}
