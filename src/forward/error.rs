//! Per-request error taxonomy.
//!
//! Every failure is terminal for its request: the variant fixes the status
//! code and the JSON body returned to the caller. Internal detail is logged
//! server-side and never echoed.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use thiserror::Error;

/// Errors produced by the forwarding pipeline.
#[derive(Debug, Error)]
pub enum ForwardError {
    /// CONNECT tunneling is not supported; rejected before any processing.
    #[error("CONNECT not supported in this proxy")]
    ConnectNotSupported,

    /// The raw target did not parse into a URL, so it has no valid host.
    #[error("Only YouTube requests are allowed")]
    MalformedTarget(#[source] url::ParseError),

    /// The target host failed the allowlist check.
    #[error("Only YouTube requests are allowed")]
    HostNotAllowed,

    /// The outbound call exceeded its time budget.
    #[error("Request timeout")]
    Timeout,

    /// Transport-level failure reaching the origin (DNS, connect, TLS).
    #[error("Proxy error: {0}")]
    Upstream(String),

    /// Unanticipated failure; the detail is logged, not echoed.
    #[error("Internal proxy error")]
    Internal(String),
}

impl ForwardError {
    /// Status code reported to the caller.
    pub fn status(&self) -> StatusCode {
        match self {
            ForwardError::ConnectNotSupported => StatusCode::METHOD_NOT_ALLOWED,
            ForwardError::MalformedTarget(_) | ForwardError::HostNotAllowed => {
                StatusCode::FORBIDDEN
            }
            ForwardError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            ForwardError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ForwardError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ForwardError {
    fn into_response(self) -> Response {
        match self {
            // Tunneling rejection keeps its plain-text body.
            ForwardError::ConnectNotSupported => (
                StatusCode::METHOD_NOT_ALLOWED,
                "CONNECT not supported in this proxy",
            )
                .into_response(),
            other => {
                let status = other.status();
                let body = Json(serde_json::json!({ "error": other.to_string() }));
                (status, body).into_response()
            }
        }
    }
}
