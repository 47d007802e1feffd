//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::forward::allowlist::DEFAULT_ALLOWED_HOSTS;

/// Root configuration for the forward proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address, port).
    pub listener: ListenerConfig,

    /// Forwarder configuration (allowlist, outbound timeouts).
    pub forwarder: ForwarderConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl ProxyConfig {
    /// Load configuration: optional TOML file named by `PROXY_CONFIG`,
    /// then environment overrides. With neither set, defaults apply.
    pub fn load() -> Result<Self, crate::config::ConfigError> {
        let mut config = match std::env::var("PROXY_CONFIG") {
            Ok(path) => crate::config::loader::load_config(std::path::Path::new(&path))?,
            Err(_) => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    /// Apply environment overrides. `PORT` sets the listening port.
    pub fn apply_env(&mut self) {
        if let Ok(port) = std::env::var("PORT") {
            match port.parse() {
                Ok(p) => self.listener.port = p,
                Err(_) => {
                    tracing::warn!(value = %port, "Ignoring unparseable PORT variable");
                }
            }
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind (all interfaces by default).
    pub bind_address: String,

    /// Listening port.
    pub port: u16,
}

impl ListenerConfig {
    /// Bind target in `host:port` form.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 3007,
        }
    }
}

/// Forwarder configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ForwarderConfig {
    /// Hostnames requests may be forwarded to. A hostname is allowed when it
    /// equals an entry or is a subdomain of one.
    pub allowed_hosts: Vec<String>,

    /// Total time budget for an outbound call, in seconds.
    pub request_timeout_secs: u64,

    /// Maximum inbound body size buffered for POST/PUT/PATCH, in bytes.
    pub max_body_size: usize,
}

impl Default for ForwarderConfig {
    fn default() -> Self {
        Self {
            allowed_hosts: DEFAULT_ALLOWED_HOSTS
                .iter()
                .map(|h| h.to_string())
                .collect(),
            request_timeout_secs: 30,
            max_body_size: 2 * 1024 * 1024,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
