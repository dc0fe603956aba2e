//! Error taxonomy for the relay.
//!
//! Every variant maps to one HTTP status and is rendered to the caller as
//! `{"error": "<message>"}`. Upstream non-success statuses are not errors:
//! they are relayed as-is by the relay itself.

use axum::http::StatusCode;
use thiserror::Error;

use crate::auth::token::TokenError;
use crate::relay::upstream::UpstreamError;

/// Failure of a single relayed request.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Missing or placeholder credential configuration.
    #[error(transparent)]
    Config(#[from] TokenError),

    /// Shared-secret check rejected the request.
    #[error("Unauthorized")]
    Unauthorized,

    /// No route matched the method/path combination.
    #[error("Not found")]
    NotFound,

    /// Network-level failure talking to the upstream API.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl RelayError {
    /// Status code surfaced to the inbound caller.
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RelayError::Unauthorized => StatusCode::UNAUTHORIZED,
            RelayError::NotFound => StatusCode::NOT_FOUND,
            RelayError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
