//! The request gate and the typed request context.
//!
//! The gate wraps the relay routes as one middleware layer. For every
//! request, in order: annotate the response with the CORS headers, answer
//! `OPTIONS` preflights with 204 and no body, and reject requests without a
//! non-empty `Authorization` header with 403 before any handler runs.
//!
//! Token *validity* is deliberately not checked here; the exchange call is
//! the only authority on that.

use axum::extract::{FromRequestParts, Request};
use axum::http::request::Parts;
use axum::http::{header, HeaderMap, HeaderValue, Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use lpid_relay_upstream::PARTY_HEADER;

use crate::error::ApiError;

fn apply_cors(headers: &mut HeaderMap) {
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type, Authorization, Party"),
    );
}

/// Middleware wrapping the relay routes.
///
/// Layered in [`crate::routes::create_router`]; see the module docs for the
/// exact ordering contract.
pub async fn request_gate(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        tracing::debug!("Answering CORS preflight");
        let mut response = StatusCode::NO_CONTENT.into_response();
        apply_cors(response.headers_mut());
        return response;
    }

    let has_token = request
        .headers()
        .get(header::AUTHORIZATION)
        .is_some_and(|value| !value.is_empty());

    let mut response = if has_token {
        next.run(request).await
    } else {
        tracing::warn!("Missing Authorization header");
        ApiError::MissingAuthorization.into_response()
    };

    apply_cors(response.headers_mut());
    response
}

/// Per-request values, read from the headers once at the boundary.
///
/// Handlers take this instead of doing their own header lookups. The gate
/// has already guaranteed `Authorization` is present and non-empty.
#[derive(Debug, Clone)]
pub struct RelayContext {
    /// The raw ID-porten token, exactly as the client sent it.
    pub id_porten_token: String,
    /// The optional `Party` routing identifier.
    pub party: Option<String>,
}

impl<S> FromRequestParts<S> for RelayContext
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        _state: &'life1 S,
    ) -> ::core::pin::Pin<
        Box<
            dyn ::core::future::Future<Output = Result<Self, Self::Rejection>>
                + ::core::marker::Send
                + 'async_trait,
        >,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let id_porten_token = parts
                .headers
                .get(header::AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .filter(|value| !value.is_empty())
                .map(ToString::to_string)
                .ok_or(ApiError::MissingAuthorization)?;

            let party = parts
                .headers
                .get(PARTY_HEADER)
                .and_then(|value| value.to_str().ok())
                .map(ToString::to_string);

            Ok(RelayContext {
                id_porten_token,
                party,
            })
        })
    }
}
