//! Relay client error types.
//!
//! An upstream HTTP status is not an error here: whatever status the
//! business API answers with is data to be copied back to the caller. Only
//! faults that prevent a response from being relayed at all are errors.

use thiserror::Error;

/// A result type using `UpstreamError`.
pub type Result<T> = std::result::Result<T, UpstreamError>;

/// Errors that can occur while relaying a call to the business-data API.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The outbound request could not be built.
    #[error("failed to build upstream request: {0}")]
    BuildRequest(String),

    /// The outbound call could not be completed.
    #[error("upstream call failed: {0}")]
    Transport(String),

    /// The upstream response body could not be drained.
    #[error("failed to read upstream response body: {0}")]
    ReadBody(String),
}
