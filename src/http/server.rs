//! HTTP server setup and request dispatch.
//!
//! # Responsibilities
//! - Create the Axum router (health routes + proxy fallback)
//! - Wire up middleware (tracing, request ID)
//! - Buffer inbound bodies for the methods that carry one
//! - Hand requests to the forwarding pipeline and relay its result
//! - Record per-request metrics

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Bytes,
    extract::{Request, State},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::config::ProxyConfig;
use crate::forward::{forwarder, ForwardError, Forwarder, InboundRequest};
use crate::http::request::{RequestIdExt, RequestIdLayer};
use crate::observability::metrics;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub forwarder: Arc<Forwarder>,
    pub max_body_size: usize,
}

/// HTTP server for the forward proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Result<Self, reqwest::Error> {
        let forwarder = Arc::new(Forwarder::new(&config.forwarder)?);

        let state = AppState {
            forwarder,
            max_body_size: config.forwarder.max_body_size,
        };

        let router = Self::build_router(state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/", get(health_handler))
            .route("/health", get(health_handler))
            .fallback(proxy_handler)
            .with_state(state)
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }
}

/// Static service-identity payload for the health routes.
#[derive(Serialize)]
struct ServiceIdentity {
    status: &'static str,
    service: &'static str,
    version: &'static str,
}

async fn health_handler() -> Json<ServiceIdentity> {
    Json(ServiceIdentity {
        status: "ok",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Main proxy handler: every non-health request lands here, including
/// CONNECT (whose authority-form target matches no route).
async fn proxy_handler(State(state): State<AppState>, request: Request) -> Response {
    let start_time = Instant::now();
    let (parts, body) = request.into_parts();

    let request_id = parts.extensions.request_id().to_string();
    let method = parts.method.clone();
    let method_str = method.to_string();
    let raw_target = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("")
        .trim_start_matches('/')
        .to_string();

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        target = %raw_target,
        "Proxying request"
    );

    let body_bytes = if forwarder::carries_body(&method) {
        match axum::body::to_bytes(body, state.max_body_size).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::error!(
                    request_id = %request_id,
                    error = %e,
                    "Failed to read request body"
                );
                metrics::record_request(&method_str, 500, start_time);
                return ForwardError::Internal(e.to_string()).into_response();
            }
        }
    } else {
        Bytes::new()
    };

    let inbound = InboundRequest {
        method,
        raw_target,
        headers: parts.headers,
        body: body_bytes,
    };

    match state.forwarder.forward(inbound).await {
        Ok(outbound) => {
            metrics::record_request(&method_str, outbound.status.as_u16(), start_time);
            outbound.into_response()
        }
        Err(err) => {
            metrics::record_request(&method_str, err.status().as_u16(), start_time);
            err.into_response()
        }
    }
}
