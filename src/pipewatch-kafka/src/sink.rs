use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("event of {size} bytes exceeds the sink limit of {max} bytes")]
    TooLarge { size: usize, max: usize },

    #[error("failed to deliver event: {0}")]
    Delivery(#[from] rdkafka::error::KafkaError),
}

/// A partitioned append-only sink for serialized status events.
///
/// One call delivers one record, routed by `partition_key` so that all
/// events sharing a key keep their relative order downstream. A single
/// attempt, no retry; callers map the error to a response and let the
/// HTTP client re-issue the request if it wants another try.
#[async_trait]
pub trait StatusSink: Send + Sync {
    async fn send(&self, partition_key: &str, payload: &[u8]) -> Result<(), SinkError>;
}
