//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::ProxyConfig;

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(msg) => write!(f, "Validation failed: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ProxyConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: ProxyConfig = toml::from_str(&content).map_err(ConfigError::Parse)?;

    validate_config(&config)?;

    Ok(config)
}

/// Semantic checks that serde cannot express.
fn validate_config(config: &ProxyConfig) -> Result<(), ConfigError> {
    if config.forwarder.allowed_hosts.is_empty() {
        return Err(ConfigError::Validation(
            "forwarder.allowed_hosts must not be empty".to_string(),
        ));
    }
    if config.forwarder.request_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "forwarder.request_timeout_secs must be greater than zero".to_string(),
        ));
    }
    if config.forwarder.max_body_size == 0 {
        return Err(ConfigError::Validation(
            "forwarder.max_body_size must be greater than zero".to_string(),
        ));
    }
    Ok(())
}
