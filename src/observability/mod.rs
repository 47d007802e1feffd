//! Observability subsystem: metrics exposition.
//!
//! Structured logging is initialized in `main` via `tracing-subscriber`;
//! this module owns the Prometheus side.

pub mod metrics;
