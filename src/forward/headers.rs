//! Header sanitization for both proxy directions.
//!
//! # Responsibilities
//! - Strip hop-by-hop headers from inbound requests before dispatch
//! - Strip hop-by-hop headers from origin responses before relay
//! - Inject a realistic User-Agent and an Accept-Encoding when absent
//!
//! # Design Decisions
//! - Content-Length is never forwarded; the outbound transport recomputes it
//! - Defaults are injected only when the caller omitted the header; a
//!   caller-supplied value always wins

use axum::http::header::{ACCEPT_ENCODING, USER_AGENT};
use axum::http::{HeaderMap, HeaderValue};

/// User-Agent sent when the caller supplied none. Origins may reject
/// requests without one.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Accept-Encoding sent when the caller supplied none.
pub const DEFAULT_ACCEPT_ENCODING: &str = "gzip, deflate";

/// Headers never forwarded from the caller to the origin.
const REQUEST_DROP_LIST: &[&str] = &[
    "host",
    "connection",
    "content-length",
    "transfer-encoding",
    "proxy-connection",
];

/// Headers never relayed from the origin back to the caller.
const RESPONSE_DROP_LIST: &[&str] = &[
    "content-encoding",
    "content-length",
    "transfer-encoding",
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailers",
    "upgrade",
];

fn is_dropped(name: &str, drop_list: &[&str]) -> bool {
    drop_list.iter().any(|h| name.eq_ignore_ascii_case(h))
}

fn copy_except(headers: &HeaderMap, drop_list: &[&str]) -> HeaderMap {
    let mut out = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        if is_dropped(name.as_str(), drop_list) {
            continue;
        }
        out.append(name.clone(), value.clone());
    }
    out
}

/// Produce the header set to send to the origin.
pub fn sanitize_request_headers(headers: &HeaderMap) -> HeaderMap {
    let mut out = copy_except(headers, REQUEST_DROP_LIST);

    if !out.contains_key(USER_AGENT) {
        out.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));
    }
    if !out.contains_key(ACCEPT_ENCODING) {
        out.insert(
            ACCEPT_ENCODING,
            HeaderValue::from_static(DEFAULT_ACCEPT_ENCODING),
        );
    }

    out
}

/// Produce the header set relayed back to the caller.
pub fn sanitize_response_headers(headers: &HeaderMap) -> HeaderMap {
    copy_except(headers, RESPONSE_DROP_LIST)
}
