use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Normalized pipeline-status envelope, built once per request and handed
/// to the sink.
///
/// `tenant_id`, `run_id`, `status` and `received_utc` are always populated.
/// Every other field carries the value the client supplied or is absent
/// from the serialized form entirely; absence is never encoded as a
/// placeholder string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusEvent {
    pub tenant_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pipeline: Option<String>,

    pub run_id: String,

    pub status: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<String>,

    /// Client-supplied timestamp, passed through as an opaque string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_utc: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ended_utc: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<i64>,

    /// Ingestion wall-clock time, independent of any client timestamps.
    pub received_utc: DateTime<Utc>,

    /// The entire parsed request body, present only when the top level was
    /// a JSON object. Preserves extra client fields for downstream use.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original: Option<Value>,
}
