//! Request-forwarding pipeline.
//!
//! # Data Flow
//! ```text
//! InboundRequest (method, raw target, headers, body)
//!     → target.rs (normalize raw path into a full URL)
//!     → allowlist.rs (host allow/deny, terminal 403 on deny)
//!     → headers.rs (strip hop-by-hop, inject UA/Accept-Encoding defaults)
//!     → forwarder.rs (outbound dispatch: TLS on, redirects off, bounded)
//!     → headers.rs (strip hop-by-hop from the origin response)
//!     → relay.rs (fixed-size chunked body stream)
//!     → OutboundResult (status, sanitized headers, body stream)
//! ```
//!
//! # Design Decisions
//! - Per-request state is threaded as values; nothing is shared between
//!   requests except the client and the read-only allowlist
//! - Denied and malformed targets never produce an outbound call
//! - No retries; every failure is terminal for its request

pub mod allowlist;
pub mod error;
pub mod forwarder;
pub mod headers;
pub mod relay;
pub mod target;

pub use allowlist::HostAllowlist;
pub use error::ForwardError;
pub use forwarder::{Forwarder, InboundRequest, OutboundResult};
