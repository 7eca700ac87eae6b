//! Token exchange error types.

use thiserror::Error;

/// A result type using `ExchangeError`.
pub type Result<T> = std::result::Result<T, ExchangeError>;

/// Errors that can occur while exchanging an ID-porten token.
#[derive(Debug, Error)]
pub enum ExchangeError {
    /// The outbound exchange request could not be built.
    #[error("failed to build exchange request: {0}")]
    BuildRequest(String),

    /// The exchange call could not be completed.
    #[error("exchange call to Altinn failed: {0}")]
    Transport(String),

    /// The exchange endpoint answered with a non-OK status. The status text
    /// is carried for diagnostics only.
    #[error("Altinn exchange endpoint responded with {0}")]
    UpstreamStatus(String),

    /// The exchange response body could not be drained.
    #[error("failed to read exchange response body: {0}")]
    ReadBody(String),
}

impl ExchangeError {
    /// Returns `true` if the exchange endpoint itself rejected the token,
    /// as opposed to a local or transport fault.
    #[must_use]
    pub const fn is_upstream_rejection(&self) -> bool {
        matches!(self, Self::UpstreamStatus(_))
    }
}
