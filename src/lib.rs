//! Restricted Forward Proxy Library
//!
//! Accepts HTTP requests whose path names a target URL, forwards them to a
//! fixed set of allowed streaming-media hosts, and streams the origin
//! response back with sanitized headers.

pub mod config;
pub mod forward;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::ProxyConfig;
pub use forward::Forwarder;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
