//! Restricted forward proxy for a fixed set of streaming-media hosts.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────┐
//!                      │               FORWARD PROXY                   │
//!                      │                                               │
//!   Client Request     │  ┌─────────┐    ┌───────────────────────┐    │
//!   ──────────────────►│  │  http   │───►│       forward          │    │
//!                      │  │ server  │    │  normalize → allowlist │    │
//!                      │  └─────────┘    │  → sanitize → dispatch │    │
//!                      │                 └───────────┬───────────┘    │
//!                      │                             │                 │
//!   Client Response    │  ┌─────────┐    ┌───────────▼───────────┐    │
//!   ◄──────────────────┼──│  relay  │◄───│   outbound client     │◄───┼── Allowed
//!                      │  │ stream  │    │  (TLS, no redirects)  │    │    Origin
//!                      │  └─────────┘    └───────────────────────┘    │
//!                      │                                               │
//!                      │  ┌────────────────────────────────────────┐  │
//!                      │  │  config · observability · lifecycle    │  │
//!                      │  └────────────────────────────────────────┘  │
//!                      └──────────────────────────────────────────────┘
//! ```

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use youtube_proxy::config::ProxyConfig;
use youtube_proxy::http::HttpServer;
use youtube_proxy::lifecycle::{self, Shutdown};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "youtube_proxy=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("youtube-proxy v{} starting", env!("CARGO_PKG_VERSION"));

    let config = ProxyConfig::load()?;

    tracing::info!(
        bind_address = %config.listener.bind_address,
        port = config.listener.port,
        allowed_hosts = config.forwarder.allowed_hosts.len(),
        request_timeout_secs = config.forwarder.request_timeout_secs,
        "Configuration loaded"
    );

    // Bind TCP listener
    let listener = TcpListener::bind(config.listener.socket_addr()).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    // Initialize metrics exporter
    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            youtube_proxy::observability::metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    // Trigger shutdown on Ctrl+C
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        lifecycle::wait_for_signal().await;
        shutdown.trigger();
    });

    // Create and run HTTP server
    let server = HttpServer::new(config)?;
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
