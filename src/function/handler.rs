//! Function-profile adapter around the shared relay.

use std::sync::Arc;

use crate::auth::gate::{AuthGate, APP_PASSWORD_VAR};
use crate::auth::token::{EnvTokenSource, TokenSource};
use crate::config::UpstreamConfig;
use crate::function::event::{FunctionEvent, FunctionResponse};
use crate::relay::{Profile, Relay, RelayResponse, Route, RouteTable, UpstreamClient, UpstreamError};

/// Environment variable overriding the upstream base URL.
pub const UPSTREAM_URL_VAR: &str = "SITE_PROXY_UPSTREAM_URL";

/// Settings read from the function's environment.
#[derive(Debug, Clone, Default)]
pub struct FunctionSettings {
    pub upstream: UpstreamConfig,
    pub app_password: Option<String>,
}

impl FunctionSettings {
    pub fn from_env() -> Self {
        let mut upstream = UpstreamConfig::default();
        if let Ok(url) = std::env::var(UPSTREAM_URL_VAR) {
            if !url.is_empty() {
                upstream.base_url = url;
            }
        }
        Self {
            upstream,
            app_password: std::env::var(APP_PASSWORD_VAR).ok(),
        }
    }
}

/// Gate → route table → relay.
#[derive(Debug, Clone)]
pub struct FunctionHandler {
    relay: Relay,
    gate: AuthGate,
    routes: RouteTable,
}

impl FunctionHandler {
    pub fn new(relay: Relay, gate: AuthGate) -> Self {
        Self {
            relay,
            gate,
            routes: RouteTable::standard(),
        }
    }

    /// Build a handler with an explicit token source.
    pub fn with_tokens(
        settings: FunctionSettings,
        tokens: Arc<dyn TokenSource>,
    ) -> Result<Self, UpstreamError> {
        let upstream = UpstreamClient::new(&settings.upstream)?;
        let relay = Relay::new(upstream, tokens, Profile::Function);
        Ok(Self::new(relay, AuthGate::new(settings.app_password)))
    }

    /// Build a handler reading `NETLIFY_API_TOKEN` from the environment.
    pub fn from_settings(settings: FunctionSettings) -> Result<Self, UpstreamError> {
        Self::with_tokens(settings, Arc::new(EnvTokenSource::default()))
    }

    pub async fn handle(&self, event: &FunctionEvent) -> FunctionResponse {
        if let Err(err) = self.gate.check(&event.header_map()) {
            tracing::warn!(path = %event.path, "Rejected by app password gate");
            return RelayResponse::from(err).into();
        }

        let route = match event.method() {
            Some(method) => self.routes.resolve(&method, &event.path),
            None => Route::NotFound,
        };
        tracing::debug!(method = %event.http_method, path = %event.path, route = route.name(), "Function invoked");

        self.relay.handle(route).await.into()
    }
}
