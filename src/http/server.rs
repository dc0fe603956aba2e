//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the axum Router with the two relayed API routes (a trailing
//!   slash is accepted on either)
//! - Serve static assets for every other path when a directory is configured
//! - Answer anything left over with a JSON 404
//! - Wire up middleware (tracing, request ID)
//! - Bound each relayed request by the configured request timeout
//! - Serve until the shutdown signal fires

use axum::{
    extract::{rejection::PathRejection, Path, State},
    handler::HandlerWithoutStateExt,
    http::StatusCode,
    routing::{delete, get},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::auth::token::TokenSource;
use crate::config::ProxyConfig;
use crate::http::request::{request_span, MakeRequestUuidV4, X_REQUEST_ID};
use crate::lifecycle::signals::wait_for_shutdown;
use crate::relay::{Profile, Relay, RelayResponse, Route, UpstreamClient, UpstreamError};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<Relay>,
    pub request_timeout: Duration,
}

impl AppState {
    /// Relay a route, answering 500 if it outlives the request timeout.
    async fn relay(&self, route: Route) -> RelayResponse {
        match tokio::time::timeout(self.request_timeout, self.relay.handle(route)).await {
            Ok(response) => response,
            Err(_) => {
                tracing::error!(timeout = ?self.request_timeout, "Request timed out");
                RelayResponse::error(StatusCode::INTERNAL_SERVER_ERROR, "Request timed out")
            }
        }
    }
}

/// HTTP server for the server profile.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and token source.
    pub fn new(config: ProxyConfig, tokens: Arc<dyn TokenSource>) -> Result<Self, UpstreamError> {
        let upstream = UpstreamClient::new(&config.upstream)?;
        let state = AppState {
            relay: Arc::new(Relay::new(upstream, tokens, Profile::Server)),
            request_timeout: Duration::from_secs(config.timeouts.request_secs),
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the axum router with all middleware layers.
    fn build_router(config: &ProxyConfig, state: AppState) -> Router {
        let api = Router::new()
            .route("/api/sites", get(list_sites).fallback(not_found))
            .route("/api/sites/", get(list_sites).fallback(not_found))
            .route("/api/sites/{id}", delete(delete_site).fallback(not_found))
            .route("/api/sites/{id}/", delete(delete_site).fallback(not_found))
            .with_state(state);

        let app = match &config.files.static_dir {
            Some(dir) => api.fallback_service(
                ServeDir::new(dir)
                    .call_fallback_on_method_not_allowed(true)
                    .not_found_service(not_found.into_service()),
            ),
            None => api.fallback(not_found),
        };

        app.layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(TraceLayer::new_for_http().make_span_with(request_span))
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuidV4))
    }

    /// A clone of the fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener until
    /// Ctrl+C or `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.base_url,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(wait_for_shutdown(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn list_sites(State(state): State<AppState>) -> RelayResponse {
    state.relay(Route::ListSites).await
}

async fn delete_site(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> RelayResponse {
    match id {
        Ok(Path(id)) => state.relay(Route::DeleteSite { id }).await,
        Err(_) => RelayResponse::not_found(),
    }
}

async fn not_found() -> RelayResponse {
    RelayResponse::not_found()
}
