use axum::http::HeaderMap;
use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;

use crate::event::StatusEvent;

/// Request header carrying the tenant identifier.
pub const TENANT_HEADER: &str = "x-tenant-id";

const UNKNOWN_TENANT: &str = "unknown";
const UNKNOWN_STATUS: &str = "Unknown";

/// Builds a [`StatusEvent`] from a raw request body and header map.
///
/// Never fails the request: an unparseable body is treated as a document
/// with no fields, and every extraction below falls back to its default.
pub fn normalize(body: &[u8], headers: &HeaderMap) -> StatusEvent {
    let root = serde_json::from_slice::<Value>(body).unwrap_or(Value::Null);

    StatusEvent {
        tenant_id: tenant_id(headers),
        pipeline: opt_string(&root, "pipeline"),
        run_id: opt_string(&root, "runId").unwrap_or_else(|| Uuid::new_v4().to_string()),
        status: opt_string(&root, "status").unwrap_or_else(|| UNKNOWN_STATUS.to_string()),
        environment: opt_string(&root, "environment"),
        workspace_id: opt_string(&root, "workspaceId"),
        started_utc: opt_string(&root, "startedUtc"),
        ended_utc: opt_string(&root, "endedUtc"),
        duration_ms: opt_i64(&root, "durationMs"),
        received_utc: Utc::now(),
        original: if root.is_object() { Some(root) } else { None },
    }
}

/// First `X-Tenant-Id` value, or `"unknown"` when the header is missing,
/// unreadable or empty.
fn tenant_id(headers: &HeaderMap) -> String {
    headers
        .get(TENANT_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .unwrap_or(UNKNOWN_TENANT)
        .to_string()
}

/// Optional string field: a missing key, a non-object document or a
/// non-string value all resolve to `None`.
fn opt_string(root: &Value, key: &str) -> Option<String> {
    root.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Optional integer field, same absence rules as [`opt_string`].
fn opt_i64(root: &Value, key: &str) -> Option<i64> {
    root.get(key).and_then(Value::as_i64)
}
