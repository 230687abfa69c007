// Pipewatch Configuration System
//
// All configuration for the gateway process is managed through the
// GatewayConfig struct, loaded once at startup. A config that fails
// validation aborts startup; there is no degraded-config mode.

pub mod loader;
pub mod models;

// Re-export config types for convenient access
pub use loader::{ConfigError, Result};
pub use models::{AuthMechanism, GatewayConfig, HttpConfig, KafkaAuthConfig, KafkaConfig};
