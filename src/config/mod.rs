//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional config file (TOML, path in PROXY_CONFIG)
//!     → loader.rs (parse & deserialize)
//!     → semantic checks
//!     → environment overrides (PORT)
//!     → ProxyConfig (validated, immutable)
//!     → shared with the server and Forwarder at construction
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no hot reload
//! - All fields have defaults so the proxy runs with no file at all
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;

pub use loader::ConfigError;
pub use schema::ForwarderConfig;
pub use schema::ListenerConfig;
pub use schema::ObservabilityConfig;
pub use schema::ProxyConfig;
