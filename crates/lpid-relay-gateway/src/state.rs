//! Gateway application state.

use std::sync::Arc;

use lpid_relay_auth::TokenExchanger;
use lpid_relay_upstream::UpstreamClient;

/// Shared application state for the gateway.
///
/// Holds the two outbound clients every relay handler needs. Nothing in
/// here is mutable; requests share the clients and nothing else.
pub struct GatewayState<E, U>
where
    E: TokenExchanger,
    U: UpstreamClient,
{
    /// The token exchanger for the Altinn authentication API.
    pub exchanger: Arc<E>,
    /// The relay client for the business-data endpoints.
    pub upstream: Arc<U>,
}

impl<E, U> GatewayState<E, U>
where
    E: TokenExchanger,
    U: UpstreamClient,
{
    /// Create a new gateway state.
    #[must_use]
    pub fn new(exchanger: Arc<E>, upstream: Arc<U>) -> Self {
        Self {
            exchanger,
            upstream,
        }
    }
}

impl<E, U> Clone for GatewayState<E, U>
where
    E: TokenExchanger,
    U: UpstreamClient,
{
    fn clone(&self) -> Self {
        Self {
            exchanger: Arc::clone(&self.exchanger),
            upstream: Arc::clone(&self.upstream),
        }
    }
}
