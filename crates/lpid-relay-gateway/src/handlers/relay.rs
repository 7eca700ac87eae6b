//! The two relay endpoints.
//!
//! Both routes are the same operation pointed at different targets:
//! exchange the caller's ID-porten token, issue one GET to the fixed
//! upstream endpoint, copy the response back. Neither transforms, filters,
//! or validates the upstream payload.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use lpid_relay_auth::TokenExchanger;
use lpid_relay_upstream::{RelayTarget, UpstreamClient};

use crate::error::ApiError;
use crate::gate::RelayContext;
use crate::state::GatewayState;

/// `GET /api/v1/company` - the parties the caller may instantiate for.
///
/// # Errors
///
/// Returns a generic 500 if the token exchange or the relayed call fails.
pub async fn company_parties<E, U>(
    State(state): State<Arc<GatewayState<E, U>>>,
    ctx: RelayContext,
) -> Result<Response, ApiError>
where
    E: TokenExchanger + 'static,
    U: UpstreamClient + 'static,
{
    relay(&state, &ctx, RelayTarget::CompanyParties).await
}

/// `GET /api/v1/lpid` - the LPID data model for the party named by the
/// caller's `Party` header.
///
/// # Errors
///
/// Returns a generic 500 if the token exchange or the relayed call fails.
pub async fn lpid_data<E, U>(
    State(state): State<Arc<GatewayState<E, U>>>,
    ctx: RelayContext,
) -> Result<Response, ApiError>
where
    E: TokenExchanger + 'static,
    U: UpstreamClient + 'static,
{
    relay(&state, &ctx, RelayTarget::LpidData).await
}

/// Exchange, then fetch, then copy back.
///
/// The exchange must complete successfully before the data call is issued;
/// a failed exchange suppresses the data call entirely.
async fn relay<E, U>(
    state: &GatewayState<E, U>,
    ctx: &RelayContext,
    target: RelayTarget,
) -> Result<Response, ApiError>
where
    E: TokenExchanger,
    U: UpstreamClient,
{
    let token = state.exchanger.exchange(&ctx.id_porten_token).await?;

    // The data call copies the inbound Party value verbatim, which means an
    // empty header value when the client sent none.
    let party = match target {
        RelayTarget::LpidData => Some(ctx.party.as_deref().unwrap_or("")),
        RelayTarget::CompanyParties => None,
    };

    let relayed = state.upstream.fetch(target, &token, party).await?;

    let status =
        StatusCode::from_u16(relayed.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    Ok((
        status,
        [(header::CONTENT_TYPE, "application/json")],
        relayed.body,
    )
        .into_response())
}
