//! HTTP client for the business-data upstream.
//!
//! One authenticated GET per invocation; the response status and body are
//! returned untouched for the gateway to copy back. No retries, no caching,
//! no interpretation of the payload.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header;

use lpid_relay_auth::PlatformToken;

use crate::error::{Result, UpstreamError};
use crate::UpstreamConfig;

/// The `Party` routing header forwarded to the LPID data endpoint.
pub const PARTY_HEADER: &str = "Party";

/// The two fixed endpoints the relay can forward to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayTarget {
    /// Parties the authenticated user is allowed to instantiate for.
    CompanyParties,
    /// The LPID data-model resource (Norwegian-language, row IDs included).
    LpidData,
}

/// An upstream response, carried back to the caller unmodified.
#[derive(Debug, Clone)]
pub struct RelayedResponse {
    /// The upstream HTTP status code, whatever it was.
    pub status: u16,
    /// The raw response body bytes.
    pub body: Vec<u8>,
}

/// Trait for fetching business data on behalf of an authenticated caller.
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    /// Issue one GET to the target endpoint with the exchanged platform
    /// token, forwarding `party` as the `Party` header when given.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be built, the call cannot be
    /// completed, or the body cannot be read. A non-2xx upstream status is
    /// not an error; it is part of the relayed response.
    async fn fetch(
        &self,
        target: RelayTarget,
        token: &PlatformToken,
        party: Option<&str>,
    ) -> Result<RelayedResponse>;
}

/// HTTP implementation of the relay client.
#[derive(Debug, Clone)]
pub struct HttpUpstreamClient {
    config: UpstreamConfig,
    client: reqwest::Client,
}

impl HttpUpstreamClient {
    /// Create a new relay client with the given configuration.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be created (should never happen with
    /// default TLS).
    #[must_use]
    pub fn new(config: UpstreamConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .expect("failed to create HTTP client");

        Self { config, client }
    }

    /// Create a new relay client with a custom reqwest client.
    #[must_use]
    pub fn with_client(client: reqwest::Client, config: UpstreamConfig) -> Self {
        Self { config, client }
    }

    /// The configured base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }
}

#[async_trait]
impl UpstreamClient for HttpUpstreamClient {
    async fn fetch(
        &self,
        target: RelayTarget,
        token: &PlatformToken,
        party: Option<&str>,
    ) -> Result<RelayedResponse> {
        let url = self.config.url_for(target);
        tracing::debug!(url = %url, target = ?target, "Relaying request upstream");

        let mut builder = self
            .client
            .get(&url)
            .header(header::AUTHORIZATION, token.as_str())
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(party) = party {
            builder = builder.header(PARTY_HEADER, party);
        }

        let request = builder
            .build()
            .map_err(|e| UpstreamError::BuildRequest(e.to_string()))?;

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        let status = response.status().as_u16();

        let body = response
            .bytes()
            .await
            .map_err(|e| UpstreamError::ReadBody(e.to_string()))?
            .to_vec();

        tracing::info!(status, target = ?target, "Upstream responded");
        Ok(RelayedResponse { status, body })
    }
}
