//! Relay client for the LPID wallet business-data endpoints.
//!
//! The two upstream endpoints (company parties and the LPID data model) are
//! near-identical: a single authenticated GET whose response is copied back
//! unmodified. This crate folds them into one parameterized client,
//! [`UpstreamClient::fetch`], with [`RelayTarget`] selecting the endpoint
//! and deciding whether the `Party` routing header is forwarded.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod client;
pub mod error;

pub use client::{HttpUpstreamClient, RelayTarget, RelayedResponse, UpstreamClient, PARTY_HEADER};
pub use error::{Result, UpstreamError};

/// Configuration for the business-data upstream.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Base URL of the LPID wallet app
    /// (e.g. `https://brg.apps.tt02.altinn.no/brg/lpid-wallet-2024`).
    pub base_url: String,
}

impl UpstreamConfig {
    /// URL of the company-parties endpoint.
    #[must_use]
    pub fn parties_url(&self) -> String {
        format!(
            "{}/api/v1/parties?allowedtoinstantiatefilter=true",
            self.base_url
        )
    }

    /// URL of the LPID data-model endpoint.
    #[must_use]
    pub fn data_url(&self) -> String {
        format!(
            "{}/v1/data?dataType=model&includeRowId=true&language=nb",
            self.base_url
        )
    }

    /// URL for a relay target.
    #[must_use]
    pub fn url_for(&self, target: RelayTarget) -> String {
        match target {
            RelayTarget::CompanyParties => self.parties_url(),
            RelayTarget::LpidData => self.data_url(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "https://brg.apps.tt02.altinn.no/brg/lpid-wallet-2024".to_string(),
        }
    }
}
