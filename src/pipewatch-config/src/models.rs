use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default)]
    pub gateway: HttpConfig,

    pub kafka: KafkaConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KafkaConfig {
    /// Comma-separated broker list, e.g. "broker-1:9092,broker-2:9092"
    pub brokers: String,

    #[serde(default = "default_topic")]
    pub topic: String,

    /// Upper bound on a single serialized event; larger events are rejected
    /// before any broker I/O.
    #[serde(default = "default_max_message_bytes")]
    pub max_message_bytes: usize,

    /// Delivery deadline for one produce attempt. A hung broker surfaces as
    /// a delivery error instead of blocking the request forever.
    #[serde(default = "default_message_timeout_ms")]
    pub message_timeout_ms: u64,

    #[serde(default)]
    pub auth: KafkaAuthConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KafkaAuthConfig {
    #[serde(default)]
    pub mechanism: AuthMechanism,

    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMechanism {
    #[default]
    None,
    SaslPlain,
    SaslScram,
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_topic() -> String {
    "pipeline-status".to_string()
}

fn default_max_message_bytes() -> usize {
    1024 * 1024
}

fn default_message_timeout_ms() -> u64 {
    10_000
}
