//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, health routes, proxy fallback)
//!     → request.rs (attach request ID)
//!     → forward pipeline (normalize, validate, dispatch)
//!     → streamed response back to the caller
//! ```

pub mod request;
pub mod server;

pub use request::{RequestId, RequestIdExt, RequestIdLayer, X_REQUEST_ID};
pub use server::HttpServer;
