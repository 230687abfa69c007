pub mod producer;
pub mod sink;

pub use producer::KafkaStatusSink;
pub use sink::{SinkError, StatusSink};
