use crate::models::{AuthMechanism, GatewayConfig};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlParseError(#[from] serde_yaml::Error),

    #[error("Config validation error: {0}")]
    ValidationError(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

impl GatewayConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(yaml_content: &str) -> Result<Self> {
        let expanded_content = expand_env_vars(yaml_content);
        let config: GatewayConfig = serde_yaml::from_str(&expanded_content)?;

        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.kafka.brokers.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "kafka.brokers must not be empty".to_string(),
            ));
        }

        if self.kafka.topic.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "kafka.topic must not be empty".to_string(),
            ));
        }

        if self.kafka.max_message_bytes == 0 {
            return Err(ConfigError::ValidationError(
                "kafka.max_message_bytes must be greater than zero".to_string(),
            ));
        }

        // A SASL mechanism without credentials would fail every produce at
        // runtime; refuse to start instead.
        if self.kafka.auth.mechanism != AuthMechanism::None
            && (self.kafka.auth.username.is_empty() || self.kafka.auth.password.is_empty())
        {
            return Err(ConfigError::ValidationError(format!(
                "kafka.auth.mechanism is {:?} but username/password are not configured",
                self.kafka.auth.mechanism
            )));
        }

        Ok(())
    }
}

fn expand_env_vars(content: &str) -> String {
    let mut result = content.to_string();
    let env_var_pattern = regex::Regex::new(r"\$\{([^}]+)\}").unwrap();

    for cap in env_var_pattern.captures_iter(content) {
        let var_name = &cap[1];
        let placeholder = format!("${{{}}}", var_name);

        match std::env::var(var_name) {
            Ok(env_value) => {
                result = result.replace(&placeholder, &env_value);
            }
            Err(_) => {
                warn!(
                    "Environment variable '{}' not found, using empty string",
                    var_name
                );
                result = result.replace(&placeholder, "");
            }
        }
    }

    result
}
