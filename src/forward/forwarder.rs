//! Outbound dispatch and the per-request pipeline.
//!
//! # Responsibilities
//! - Reject CONNECT before any other processing
//! - Normalize the raw target and enforce the host allowlist
//! - Issue the outbound request with sanitized headers
//! - Hand back the origin status, sanitized headers, and a relayed body
//!
//! # Design Decisions
//! - Redirects are not followed; the caller sees the origin 3xx as-is
//! - TLS certificate verification stays enabled, no insecure fallback
//! - One fixed timeout bounds the whole outbound call
//! - A body is attached only for methods that semantically carry one

use axum::body::Body;
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use futures_util::stream::BoxStream;
use futures_util::StreamExt;
use std::time::Duration;

use crate::config::ForwarderConfig;
use crate::forward::allowlist::HostAllowlist;
use crate::forward::error::ForwardError;
use crate::forward::{headers, relay, target};

/// A single inbound request, as handed to the pipeline.
pub struct InboundRequest {
    pub method: Method,
    /// Inbound path and query with the leading `/` stripped.
    pub raw_target: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// The origin's answer for one validated inbound request.
pub struct OutboundResult {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Lazy, single-pass chunk stream. Dropping it releases the origin
    /// connection.
    pub body: BoxStream<'static, Result<Bytes, reqwest::Error>>,
}

impl std::fmt::Debug for OutboundResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutboundResult")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .field("body", &"<stream>")
            .finish()
    }
}

impl IntoResponse for OutboundResult {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from_stream(self.body));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}

/// Returns true for methods that semantically carry a request body.
pub fn carries_body(method: &Method) -> bool {
    *method == Method::POST || *method == Method::PUT || *method == Method::PATCH
}

/// The request-forwarding pipeline. Constructed once, shared across
/// request tasks; holds only read-only state.
pub struct Forwarder {
    client: reqwest::Client,
    allowlist: HostAllowlist,
}

impl Forwarder {
    /// Build a forwarder from configuration.
    pub fn new(config: &ForwarderConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            allowlist: HostAllowlist::new(config.allowed_hosts.iter()),
        })
    }

    /// Run one request through the pipeline.
    ///
    /// Denied and malformed targets fail before any outbound call is made.
    pub async fn forward(&self, inbound: InboundRequest) -> Result<OutboundResult, ForwardError> {
        let InboundRequest {
            method,
            raw_target,
            headers,
            body,
        } = inbound;

        if method == Method::CONNECT {
            tracing::info!(target = %raw_target, "CONNECT request rejected");
            return Err(ForwardError::ConnectNotSupported);
        }

        let url = target::normalize(&raw_target).map_err(|e| {
            tracing::warn!(target = %raw_target, error = %e, "Unparseable target URL");
            ForwardError::MalformedTarget(e)
        })?;

        let host = url.host_str().unwrap_or_default();
        if !self.allowlist.allows(host) {
            tracing::warn!(host = %host, "Blocked request to non-allowlisted host");
            return Err(ForwardError::HostNotAllowed);
        }

        let outbound_headers = headers::sanitize_request_headers(&headers);

        tracing::info!(method = %method, url = %url, "Forwarding request");

        let mut request = self
            .client
            .request(method.clone(), url.clone())
            .headers(outbound_headers);
        if carries_body(&method) {
            request = request.body(body);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                tracing::error!(url = %url, "Outbound request timed out");
                ForwardError::Timeout
            } else if e.is_builder() {
                tracing::error!(url = %url, error = %e, "Failed to build outbound request");
                ForwardError::Internal(describe(&e))
            } else {
                tracing::error!(url = %url, error = %e, "Outbound request failed");
                ForwardError::Upstream(describe(&e))
            }
        })?;

        let status = response.status();
        let response_headers = headers::sanitize_response_headers(response.headers());

        tracing::info!(status = %status, url = %url, "Relaying origin response");

        Ok(OutboundResult {
            status,
            headers: response_headers,
            body: relay::chunked(response.bytes_stream().boxed()).boxed(),
        })
    }
}

/// Flatten an outbound error and its source chain into one detail string.
fn describe(e: &reqwest::Error) -> String {
    use std::error::Error as _;

    let mut message = e.to_string();
    let mut source = e.source();
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }
    message
}
