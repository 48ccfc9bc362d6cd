//! Horeca Relay server binary.
//!
//! Wires the registry, hub, router, and heartbeat together and serves the
//! WebSocket and health endpoints.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::Router;
use http::{HeaderValue, Method};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use horeca_relay::adapters::http::health_router;
use horeca_relay::adapters::websocket::{websocket_router, ConnectionHub, RelayState};
use horeca_relay::application::{ConnectionRegistry, HeartbeatEmitter};
use horeca_relay::config::AppConfig;
use horeca_relay::ports::EventTransport;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;

    init_tracing(&config.server.log_level);
    tracing::info!("Starting horeca-relay v{}", env!("CARGO_PKG_VERSION"));

    let registry = Arc::new(ConnectionRegistry::new());
    let hub = Arc::new(ConnectionHub::new());
    let state = RelayState::new(registry.clone(), hub.clone());

    let heartbeat = HeartbeatEmitter::new(
        registry,
        hub as Arc<dyn EventTransport>,
        Duration::from_secs(config.server.heartbeat_interval_secs),
    );
    tokio::spawn(heartbeat.run());

    let cors_origin = config
        .server
        .cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("invalid CORS origin: {}", config.server.cors_origin))?;
    let cors = CorsLayer::new()
        .allow_origin(cors_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_credentials(true);

    let app = Router::new()
        .merge(health_router())
        .merge(websocket_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    let addr = config
        .server
        .socket_addr()
        .context("invalid listen address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    tracing::info!("Relay listening on {}", addr);
    tracing::info!("CORS enabled for {}", config.server.cors_origin);
    tracing::info!("Health check at http://{}/health", addr);

    axum::serve(listener, app)
        .await
        .context("server terminated")?;

    Ok(())
}

/// Initialize the tracing subscriber with environment-based filtering.
fn init_tracing(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
