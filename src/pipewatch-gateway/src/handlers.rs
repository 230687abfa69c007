use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use std::sync::Arc;
use tracing::info;

use pipewatch_kafka::StatusSink;

use crate::forwarder::{forward, ForwardOutcome};
use crate::normalizer::normalize;

/// Shared state for handlers
#[derive(Clone)]
pub struct HandlerState {
    pub sink: Arc<dyn StatusSink>,
}

/// Handler for POST /pipeline-status
///
/// The response contract is code-only and bodies are always empty:
/// 202 accepted, 413 oversized event, 500 sink failure. Malformed input
/// never fails the request; it degrades to envelope defaults.
pub async fn handle_pipeline_status(
    State(state): State<HandlerState>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    let event = normalize(&body, &headers);
    info!(
        "Received status for tenant {} (run {}, status {})",
        event.tenant_id, event.run_id, event.status
    );

    match forward(state.sink.as_ref(), &event).await {
        ForwardOutcome::Accepted => StatusCode::ACCEPTED,
        ForwardOutcome::TooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        ForwardOutcome::SinkFailure => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "pipewatch-gateway"
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::create_router;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use pipewatch_kafka::SinkError;
    use rdkafka::error::KafkaError;
    use rdkafka::types::RDKafkaErrorCode;
    use serde_json::Value;
    use std::sync::Mutex;
    use tower::ServiceExt;

    /// Records every submitted (partition key, payload) pair.
    #[derive(Default)]
    struct RecordingSink {
        sent: Mutex<Vec<(String, Vec<u8>)>>,
    }

    #[async_trait]
    impl StatusSink for RecordingSink {
        async fn send(&self, partition_key: &str, payload: &[u8]) -> Result<(), SinkError> {
            self.sent
                .lock()
                .unwrap()
                .push((partition_key.to_string(), payload.to_vec()));
            Ok(())
        }
    }

    /// Rejects everything over `max` bytes, accepts the rest silently.
    struct BoundedSink {
        max: usize,
    }

    #[async_trait]
    impl StatusSink for BoundedSink {
        async fn send(&self, _partition_key: &str, payload: &[u8]) -> Result<(), SinkError> {
            if payload.len() > self.max {
                return Err(SinkError::TooLarge {
                    size: payload.len(),
                    max: self.max,
                });
            }
            Ok(())
        }
    }

    /// Fails every submission the way an unreachable broker does.
    struct FailingSink;

    #[async_trait]
    impl StatusSink for FailingSink {
        async fn send(&self, _partition_key: &str, _payload: &[u8]) -> Result<(), SinkError> {
            Err(SinkError::Delivery(KafkaError::MessageProduction(
                RDKafkaErrorCode::MessageTimedOut,
            )))
        }
    }

    fn status_request(body: &str, tenant: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/pipeline-status")
            .header("content-type", "application/json");
        if let Some(tenant) = tenant {
            builder = builder.header("X-Tenant-Id", tenant);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    #[tokio::test]
    async fn test_valid_event_accepted_with_empty_body() {
        let sink = Arc::new(RecordingSink::default());
        let app = create_router(sink.clone());

        let response = app
            .oneshot(status_request(
                r#"{"pipeline":"etl-1","status":"Succeeded","durationMs":4200}"#,
                Some("acme"),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::ACCEPTED);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(body.is_empty());

        let sent = sink.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);

        let (key, payload) = &sent[0];
        assert_eq!(key, "acme");

        let event: Value = serde_json::from_slice(payload).unwrap();
        assert_eq!(event["tenantId"], "acme");
        assert_eq!(event["pipeline"], "etl-1");
        assert_eq!(event["status"], "Succeeded");
        assert_eq!(event["durationMs"], 4200);
        assert!(event["runId"].as_str().is_some_and(|id| !id.is_empty()));
        assert!(event["receivedUtc"].as_str().is_some());
        assert_eq!(event["original"]["pipeline"], "etl-1");
    }

    #[tokio::test]
    async fn test_unparseable_body_still_accepted() {
        let sink = Arc::new(RecordingSink::default());
        let app = create_router(sink.clone());

        let response = app
            .oneshot(status_request("not json {{{", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::ACCEPTED);

        let sent = sink.sent.lock().unwrap();
        let (key, payload) = &sent[0];
        assert_eq!(key, "unknown");

        let event: Value = serde_json::from_slice(payload).unwrap();
        assert_eq!(event["tenantId"], "unknown");
        assert_eq!(event["status"], "Unknown");
        assert!(event.get("pipeline").is_none());
        assert!(event.get("original").is_none());
    }

    #[tokio::test]
    async fn test_oversized_event_returns_413() {
        let app = create_router(Arc::new(BoundedSink { max: 8 }));

        let response = app
            .oneshot(status_request(r#"{"status":"Succeeded"}"#, Some("acme")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_sink_failure_returns_500() {
        let app = create_router(Arc::new(FailingSink));

        let response = app
            .oneshot(status_request(r#"{"status":"Succeeded"}"#, Some("acme")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_resubmission_is_not_deduplicated() {
        // Same body twice means two sink submissions with two distinct
        // generated run identifiers; idempotence is the caller's problem.
        let sink = Arc::new(RecordingSink::default());

        for _ in 0..2 {
            let app = create_router(sink.clone());
            let response = app
                .oneshot(status_request(r#"{"status":"Succeeded"}"#, Some("acme")))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::ACCEPTED);
        }

        let sent = sink.sent.lock().unwrap();
        assert_eq!(sent.len(), 2);

        let first: Value = serde_json::from_slice(&sent[0].1).unwrap();
        let second: Value = serde_json::from_slice(&sent[1].1).unwrap();
        assert_ne!(first["runId"], second["runId"]);
    }

    #[tokio::test]
    async fn test_missing_tenant_header_routes_to_unknown_partition() {
        let sink = Arc::new(RecordingSink::default());
        let app = create_router(sink.clone());

        let response = app
            .oneshot(status_request(r#"{"status":"Running"}"#, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::ACCEPTED);
        assert_eq!(sink.sent.lock().unwrap()[0].0, "unknown");
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_router(Arc::new(RecordingSink::default()));

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
