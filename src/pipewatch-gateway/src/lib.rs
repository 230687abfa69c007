pub mod event;
pub mod forwarder;
pub mod handlers;
pub mod normalizer;
pub mod server;

pub use event::StatusEvent;
pub use forwarder::{forward, ForwardOutcome};
pub use normalizer::normalize;
pub use server::GatewayServer;

// Re-export commonly used types
pub use serde_json::Value as JsonValue;
