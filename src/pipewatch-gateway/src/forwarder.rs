use pipewatch_kafka::{SinkError, StatusSink};
use tracing::{debug, error, warn};

use crate::event::StatusEvent;

/// Terminal outcome of forwarding one envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForwardOutcome {
    Accepted,
    TooLarge,
    SinkFailure,
}

/// Serializes one envelope and submits it to the sink as a single record
/// keyed by the tenant identifier.
///
/// One attempt, pass or fail. Recovery is the caller re-issuing the whole
/// request; oversized events must be shrunk by the client, not retried.
pub async fn forward(sink: &dyn StatusSink, event: &StatusEvent) -> ForwardOutcome {
    let payload = match serde_json::to_vec(event) {
        Ok(payload) => payload,
        Err(e) => {
            error!("Failed to serialize status event: {}", e);
            return ForwardOutcome::SinkFailure;
        }
    };

    match sink.send(&event.tenant_id, &payload).await {
        Ok(()) => {
            debug!(
                "Event for tenant {} (run {}) handed to sink",
                event.tenant_id, event.run_id
            );
            ForwardOutcome::Accepted
        }
        Err(SinkError::TooLarge { size, max }) => {
            warn!(
                "Event for tenant {} is {} bytes, sink limit is {}",
                event.tenant_id, size, max
            );
            ForwardOutcome::TooLarge
        }
        Err(e) => {
            error!("Sink submission failed for tenant {}: {}", event.tenant_id, e);
            ForwardOutcome::SinkFailure
        }
    }
}
