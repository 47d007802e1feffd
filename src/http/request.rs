//! Request identification.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) per inbound request
//! - Expose the ID to handlers via request extensions
//! - Echo the ID on the response as `x-request-id`
//!
//! # Design Decisions
//! - The ID lives in extensions, never in the request header map, so the
//!   outbound header set stays exactly what the sanitizer produced

use std::task::{Context, Poll};

use axum::body::Body;
use axum::http::{Extensions, HeaderValue, Request};
use axum::response::Response;
use futures_util::future::BoxFuture;
use tower::{Layer, Service};
use uuid::Uuid;

/// Response header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Per-request identifier attached to request extensions.
#[derive(Clone, Debug)]
pub struct RequestId(pub String);

/// Convenience accessor for the request ID.
pub trait RequestIdExt {
    /// The request ID, or `"unknown"` when the layer is absent.
    fn request_id(&self) -> &str;
}

impl RequestIdExt for Extensions {
    fn request_id(&self) -> &str {
        self.get::<RequestId>()
            .map(|id| id.0.as_str())
            .unwrap_or("unknown")
    }
}

/// Layer that tags every request with a fresh ID.
#[derive(Clone, Copy, Debug)]
pub struct RequestIdLayer;

impl<S> Layer<S> for RequestIdLayer {
    type Service = RequestIdService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestIdService { inner }
    }
}

/// Middleware service produced by [`RequestIdLayer`].
#[derive(Clone, Debug)]
pub struct RequestIdService<S> {
    inner: S,
}

impl<S> Service<Request<Body>> for RequestIdService<S>
where
    S: Service<Request<Body>, Response = Response> + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let id = Uuid::new_v4().to_string();
        let header_value = HeaderValue::from_str(&id).ok();
        req.extensions_mut().insert(RequestId(id));

        let future = self.inner.call(req);
        Box::pin(async move {
            let mut response = future.await?;
            if let Some(value) = header_value {
                response.headers_mut().insert(X_REQUEST_ID, value);
            }
            Ok(response)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_id_from_extensions() {
        let mut extensions = Extensions::new();
        assert_eq!(extensions.request_id(), "unknown");

        extensions.insert(RequestId("abc-123".to_string()));
        assert_eq!(extensions.request_id(), "abc-123");
    }
}
