//! API error types and responses.
//!
//! Every failure behind the trust boundary collapses to a fixed message and
//! an HTTP status; the full detail is written to the log only. An invalid
//! ID-porten token therefore presents exactly like a network fault: a
//! generic 500 from the exchange step.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use lpid_relay_auth::ExchangeError;
use lpid_relay_upstream::UpstreamError;

/// API error type that implements `IntoResponse`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request carried no authorization header.
    #[error("forbidden")]
    MissingAuthorization,

    /// The token exchange against Altinn failed, for any reason.
    #[error("error authenticating to the Altinn platform")]
    ExchangeFailed,

    /// The relayed call to the business-data API failed.
    #[error("failed to relay request to the upstream API")]
    RelayFailed,
}

/// Error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

/// Error details.
#[derive(Debug, Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

impl ApiError {
    /// Get the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingAuthorization => StatusCode::FORBIDDEN,
            Self::ExchangeFailed | Self::RelayFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code string for this error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MissingAuthorization => "forbidden",
            Self::ExchangeFailed => "exchange_failed",
            Self::RelayFailed => "relay_failed",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();
        let message = self.to_string();

        let body = ErrorResponse {
            error: ErrorBody { code, message },
        };

        (status, Json(body)).into_response()
    }
}

impl From<ExchangeError> for ApiError {
    fn from(err: ExchangeError) -> Self {
        if err.is_upstream_rejection() {
            tracing::warn!(error = %err, "Token exchange rejected");
        } else {
            tracing::error!(error = %err, "Token exchange failed");
        }
        Self::ExchangeFailed
    }
}

impl From<UpstreamError> for ApiError {
    fn from(err: UpstreamError) -> Self {
        tracing::error!(error = %err, "Upstream relay failed");
        Self::RelayFailed
    }
}
