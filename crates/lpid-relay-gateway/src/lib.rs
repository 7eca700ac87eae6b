//! HTTP gateway for the LPID wallet relay.
//!
//! The gateway is the public face of the relay. Per request it composes
//! three steps linearly: the request gate (CORS annotations, preflight
//! short-circuit, mandatory authorization check), the token exchange, and
//! one relayed GET to a fixed Altinn business endpoint whose response is
//! copied back verbatim.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                   Wallet frontend                     │
//! └──────────────────────────────────────────────────────┘
//!                          │
//!                          ▼
//! ┌──────────────────────────────────────────────────────┐
//! │                  lpid-relay-gateway                   │
//! │  ┌──────────┐  ┌───────────────┐  ┌──────────────┐   │
//! │  │  Request │  │    Router     │  │    Relay     │   │
//! │  │   Gate   │  │  + Handlers   │  │   routine    │   │
//! │  └──────────┘  └───────────────┘  └──────────────┘   │
//! └──────────────────────────────────────────────────────┘
//!                 │                      │
//!                 ▼                      ▼
//!        ┌────────────────┐    ┌──────────────────┐
//!        │ Altinn token   │    │ LPID wallet app  │
//!        │ exchange       │    │ (parties / data) │
//!        └────────────────┘    └──────────────────┘
//! ```
//!
//! No state survives a request: every relay operation is exactly one
//! exchange call followed by exactly one data call.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod gate;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::GatewayConfig;
pub use error::ApiError;
pub use gate::RelayContext;
pub use routes::create_router;
pub use state::GatewayState;
