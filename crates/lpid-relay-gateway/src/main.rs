//! LPID wallet relay - gateway binary.
//!
//! Single process: exchange the caller's ID-porten token against Altinn,
//! relay the request to one of the two fixed LPID wallet endpoints, copy
//! the response back.
//!
//! Configuration is environment-with-defaults; the defaults are the fixed
//! TT02 endpoints, so running with no environment reproduces the stock
//! behavior. `LISTEN_ADDR`, `EXCHANGE_BASE_URL` and `UPSTREAM_BASE_URL`
//! override them.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lpid_relay_auth::{ExchangeConfig, HttpExchanger};
use lpid_relay_gateway::{create_router, GatewayConfig, GatewayState};
use lpid_relay_upstream::{HttpUpstreamClient, UpstreamConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "info,lpid_relay_gateway=debug,lpid_relay_auth=debug,lpid_relay_upstream=debug"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting LPID wallet relay");

    // Load configuration from environment
    let config = GatewayConfig {
        listen_addr: std::env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| GatewayConfig::default().listen_addr),
    };
    let exchange_base_url = std::env::var("EXCHANGE_BASE_URL")
        .unwrap_or_else(|_| ExchangeConfig::default().base_url);
    let upstream_base_url = std::env::var("UPSTREAM_BASE_URL")
        .unwrap_or_else(|_| UpstreamConfig::default().base_url);

    tracing::info!(
        listen_addr = %config.listen_addr,
        exchange_base_url = %exchange_base_url,
        upstream_base_url = %upstream_base_url,
        "Relay configuration loaded"
    );

    let exchanger = Arc::new(HttpExchanger::new(ExchangeConfig {
        base_url: exchange_base_url,
    }));
    let upstream = Arc::new(HttpUpstreamClient::new(UpstreamConfig {
        base_url: upstream_base_url,
    }));

    let state = GatewayState::new(exchanger, upstream);
    let app = create_router(state);

    // Start HTTP server
    tracing::info!(listen_addr = %config.listen_addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
