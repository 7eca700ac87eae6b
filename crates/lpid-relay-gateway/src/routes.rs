//! Router configuration.
//!
//! The request gate is layered over the two relay routes only: `OPTIONS` on
//! a gated route answers 204 before method routing, and unknown paths keep
//! the router's default not-found behavior without a gate check.

use std::sync::Arc;

use axum::middleware;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use lpid_relay_auth::TokenExchanger;
use lpid_relay_upstream::UpstreamClient;

use crate::gate;
use crate::handlers::{health, relay};
use crate::state::GatewayState;

/// Create the gateway router.
///
/// # Routes
///
/// ## Public
/// - `GET /health` - Health check
///
/// ## Gated (CORS + mandatory `Authorization`)
/// - `GET /api/v1/company` - Relay the company-parties lookup
/// - `GET /api/v1/lpid` - Relay the LPID data-model lookup
/// - `OPTIONS` on either route - CORS preflight, answered 204
pub fn create_router<E, U>(state: GatewayState<E, U>) -> Router
where
    E: TokenExchanger + 'static,
    U: UpstreamClient + 'static,
{
    let state = Arc::new(state);

    let gated = Router::new()
        .route("/api/v1/company", get(relay::company_parties::<E, U>))
        .route("/api/v1/lpid", get(relay::lpid_data::<E, U>))
        .route_layer(middleware::from_fn(gate::request_gate));

    Router::new()
        .route("/health", get(health::health))
        .merge(gated)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
