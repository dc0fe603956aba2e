//! Relay subsystem.
//!
//! # Data Flow
//! ```text
//! Route (from route.rs table or axum router)
//!     → TokenSource lookup (500 on configuration failure)
//!     → upstream.rs (one HTTPS call)
//!     → status normalization (delete 200/204 → {"success": true})
//!     → RelayResponse
//! ```
//!
//! # Design Decisions
//! - One relay shared by both profiles; adapters only add profile specifics
//! - Unroutable requests are answered before the token is consulted
//! - Upstream non-success statuses are relayed, not treated as errors

pub mod response;
pub mod route;
pub mod upstream;

pub use response::RelayResponse;
pub use route::{extract_site_id, Route, RouteTable};
pub use upstream::{UpstreamClient, UpstreamError, UpstreamResponse};

use axum::http::StatusCode;
use serde_json::{json, Value};
use std::fmt;
use std::sync::Arc;

use crate::auth::token::TokenSource;
use crate::error::RelayError;

/// Deployment profile a relay is serving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Always-on web server, token from `config.yaml`, no gate.
    Server,
    /// One-shot function, token from the environment, optional gate.
    Function,
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Profile::Server => f.write_str("server"),
            Profile::Function => f.write_str("function"),
        }
    }
}

/// Converts one resolved route into one upstream call and one response.
#[derive(Clone)]
pub struct Relay {
    upstream: UpstreamClient,
    tokens: Arc<dyn TokenSource>,
    profile: Profile,
}

impl Relay {
    pub fn new(upstream: UpstreamClient, tokens: Arc<dyn TokenSource>, profile: Profile) -> Self {
        Self {
            upstream,
            tokens,
            profile,
        }
    }

    /// Handle a route. Never fails: every error becomes a JSON response.
    pub async fn handle(&self, route: Route) -> RelayResponse {
        let name = route.name();
        match self.dispatch(route).await {
            Ok(response) => response,
            Err(err) => {
                match &err {
                    RelayError::NotFound => {}
                    RelayError::Upstream(e) => {
                        tracing::error!(profile = %self.profile, route = name, error = %e, "Upstream call failed");
                    }
                    other => {
                        tracing::warn!(profile = %self.profile, route = name, error = %other, "Request rejected");
                    }
                }
                err.into()
            }
        }
    }

    async fn dispatch(&self, route: Route) -> Result<RelayResponse, RelayError> {
        if route == Route::NotFound {
            return Err(RelayError::NotFound);
        }

        let token = self.tokens.token()?;

        match route {
            Route::ListSites => {
                let upstream = self.upstream.list_sites(&token).await?;
                tracing::debug!(status = %upstream.status, "Listed sites");
                Ok(RelayResponse::new(
                    upstream.status,
                    upstream.body.unwrap_or(Value::Null),
                ))
            }
            Route::DeleteSite { id } => {
                let upstream = self.upstream.delete_site(&id, &token).await?;
                Ok(delete_outcome(&id, upstream))
            }
            Route::NotFound => Err(RelayError::NotFound),
        }
    }
}

impl fmt::Debug for Relay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Relay")
            .field("upstream", self.upstream.base_url())
            .field("profile", &self.profile)
            .finish()
    }
}

fn delete_outcome(id: &str, upstream: UpstreamResponse) -> RelayResponse {
    match upstream.status {
        StatusCode::OK | StatusCode::NO_CONTENT => {
            tracing::info!(site_id = %id, "Site deleted");
            RelayResponse::new(StatusCode::OK, json!({ "success": true }))
        }
        status => {
            tracing::debug!(site_id = %id, status = %status, "Delete refused upstream");
            match upstream.body {
                Some(body) if !body.is_null() => RelayResponse::new(status, body),
                _ => RelayResponse::error(status, "Delete failed"),
            }
        }
    }
}
