//! ID-porten token exchange for the LPID wallet relay.
//!
//! Clients of the relay authenticate with an ID-porten token. Altinn's
//! business APIs do not accept that token directly; it has to be traded for
//! a short-lived platform token first. This crate provides:
//!
//! - The [`TokenExchanger`] trait used by the gateway
//! - [`HttpExchanger`], which performs the single exchange call against the
//!   Altinn authentication API
//! - [`PlatformToken`], the opaque bearer credential the exchange yields
//!
//! # Example
//!
//! ```no_run
//! use lpid_relay_auth::{ExchangeConfig, HttpExchanger, TokenExchanger};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let exchanger = HttpExchanger::new(ExchangeConfig::default());
//!
//! // In a request handler:
//! let token = exchanger.exchange("<raw ID-porten token>").await?;
//! println!("platform token: {}", token.as_str());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod exchange;

pub use error::{ExchangeError, Result};
pub use exchange::{HttpExchanger, PlatformToken, TokenExchanger};

#[cfg(any(test, feature = "test-utils"))]
pub use exchange::MockExchanger;

/// Configuration for the Altinn token exchange endpoint.
#[derive(Debug, Clone)]
pub struct ExchangeConfig {
    /// Base URL of the Altinn platform (e.g. `https://platform.tt02.altinn.no`).
    pub base_url: String,
}

impl ExchangeConfig {
    /// Get the ID-porten exchange endpoint URL.
    #[must_use]
    pub fn exchange_url(&self) -> String {
        format!("{}/authentication/api/v1/exchange/id-porten", self.base_url)
    }
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            base_url: "https://platform.tt02.altinn.no".to_string(),
        }
    }
}
