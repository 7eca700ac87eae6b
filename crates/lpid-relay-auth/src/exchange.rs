//! The exchange call itself: one GET against the Altinn authentication API.
//!
//! The inbound ID-porten token is presented verbatim; no local validation of
//! its shape or expiry happens here. The exchange endpoint is the sole
//! authority on whether the token is good.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header;

use crate::error::{ExchangeError, Result};
use crate::ExchangeConfig;

/// An exchanged Altinn platform bearer token.
///
/// Opaque credential blob, already stamped with the `Bearer ` prefix and
/// ready to be used as an `Authorization` header value. It is minted for a
/// single outbound data call and never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformToken(String);

impl PlatformToken {
    /// Stamp a raw exchange response body with the bearer prefix.
    #[must_use]
    pub fn bearer(raw_body: &str) -> Self {
        Self(format!("Bearer {raw_body}"))
    }

    /// The full `Authorization` header value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Trait for exchanging an ID-porten token for a platform token.
#[async_trait]
pub trait TokenExchanger: Send + Sync {
    /// Exchange a raw ID-porten token for an Altinn platform token.
    ///
    /// The input may be empty or malformed; it is forwarded as-is and the
    /// exchange endpoint's verdict is the only signal of validity.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be built, the call cannot be
    /// completed, the endpoint answers non-OK, or the body cannot be read.
    async fn exchange(&self, id_porten_token: &str) -> Result<PlatformToken>;
}

/// HTTP implementation of the token exchange.
///
/// Performs exactly one outbound call per invocation. There is no caching:
/// repeated invocations with the same token incur repeated exchanges.
pub struct HttpExchanger {
    config: ExchangeConfig,
    client: reqwest::Client,
}

impl HttpExchanger {
    /// Create a new exchanger with the given configuration.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be created (should never happen with
    /// default TLS).
    #[must_use]
    pub fn new(config: ExchangeConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .expect("failed to create HTTP client");

        Self { config, client }
    }

    /// Create a new exchanger with a custom reqwest client.
    #[must_use]
    pub fn with_client(client: reqwest::Client, config: ExchangeConfig) -> Self {
        Self { config, client }
    }
}

#[async_trait]
impl TokenExchanger for HttpExchanger {
    async fn exchange(&self, id_porten_token: &str) -> Result<PlatformToken> {
        let url = self.config.exchange_url();
        tracing::debug!(url = %url, "Exchanging ID-porten token");

        let request = self
            .client
            .get(&url)
            .header(header::AUTHORIZATION, id_porten_token)
            .header(header::CONTENT_TYPE, "application/json")
            .build()
            .map_err(|e| ExchangeError::BuildRequest(e.to_string()))?;

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| ExchangeError::Transport(e.to_string()))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            tracing::warn!(status = %status, "Exchange endpoint rejected the token");
            return Err(ExchangeError::UpstreamStatus(status.to_string()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ExchangeError::ReadBody(e.to_string()))?;

        tracing::debug!("Token exchange succeeded");
        Ok(PlatformToken::bearer(&body))
    }
}

/// A mock exchanger for testing.
///
/// Returns a fixed platform token (or a fixed rejection) and counts how many
/// times it was invoked, so callers can assert that each relay request
/// triggers exactly one exchange and that a failed exchange suppresses the
/// data call.
#[cfg(any(test, feature = "test-utils"))]
#[derive(Debug)]
pub struct MockExchanger {
    raw_token: Option<String>,
    calls: std::sync::atomic::AtomicUsize,
}

#[cfg(any(test, feature = "test-utils"))]
impl MockExchanger {
    /// An exchanger that succeeds, minting `Bearer <raw_token>`.
    #[must_use]
    pub fn succeeding(raw_token: &str) -> Self {
        Self {
            raw_token: Some(raw_token.to_string()),
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    /// An exchanger that fails every call with an upstream rejection.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            raw_token: None,
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    /// Number of `exchange` invocations so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[async_trait]
impl TokenExchanger for MockExchanger {
    async fn exchange(&self, _id_porten_token: &str) -> Result<PlatformToken> {
        self.calls
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);

        match &self.raw_token {
            Some(raw) => Ok(PlatformToken::bearer(raw)),
            None => Err(ExchangeError::UpstreamStatus("403 Forbidden".to_string())),
        }
    }
}
