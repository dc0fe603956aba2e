//! Shared utilities for integration tests.

use axum::{
    extract::Request,
    http::{header, Method, StatusCode},
    Router,
};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

use site_proxy::auth::{ResolvedToken, Token, TokenError, TokenSource};
use site_proxy::config::{ProxyConfig, UpstreamConfig};

pub const TEST_TOKEN: &str = "test-token";

/// One request observed by the mock upstream.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct RecordedCall {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub user_agent: Option<String>,
}

/// Handle on a running mock upstream.
#[derive(Clone)]
pub struct MockUpstream {
    pub base_url: String,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

#[allow(dead_code)]
impl MockUpstream {
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

/// Start a mock upstream on an ephemeral port that answers every request
/// with `status` and `body`, recording what it received.
pub async fn start_mock_upstream(status: u16, body: &'static str) -> MockUpstream {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let calls = Arc::new(Mutex::new(Vec::new()));

    let recorded = calls.clone();
    let app = Router::new().fallback(move |request: Request| {
        let recorded = recorded.clone();
        async move {
            let header_str = |name: header::HeaderName| {
                request
                    .headers()
                    .get(name)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string)
            };
            let call = RecordedCall {
                method: request.method().clone(),
                path: request.uri().path().to_string(),
                query: request.uri().query().map(str::to_string),
                authorization: header_str(header::AUTHORIZATION),
                content_type: header_str(header::CONTENT_TYPE),
                user_agent: header_str(header::USER_AGENT),
            };
            recorded.lock().unwrap().push(call);

            (StatusCode::from_u16(status).unwrap(), body)
        }
    });

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockUpstream {
        base_url: format!("http://{}/api/v1", addr),
        calls,
    }
}

/// Base URL of a port nothing listens on.
#[allow(dead_code)]
pub async fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/api/v1", addr)
}

/// Base URL of an upstream that accepts connections and never answers.
#[allow(dead_code)]
pub async fn start_hanging_upstream() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((stream, _)) = listener.accept().await {
            held.push(stream);
        }
    });

    format!("http://{}/api/v1", addr)
}

pub fn upstream_config(base_url: &str) -> UpstreamConfig {
    UpstreamConfig {
        base_url: base_url.to_string(),
        timeout_secs: 5,
        ..UpstreamConfig::default()
    }
}

/// Server config pointed at `base_url`, with static assets disabled.
#[allow(dead_code)]
pub fn server_config(base_url: &str) -> ProxyConfig {
    let mut config = ProxyConfig::default();
    config.listener.host = "127.0.0.1".into();
    config.listener.port = 0;
    config.upstream = upstream_config(base_url);
    config.files.static_dir = None;
    config
}

pub fn valid_token() -> Arc<dyn TokenSource> {
    Arc::new(ResolvedToken::from_token(Token::new(TEST_TOKEN)))
}

pub fn missing_token() -> Arc<dyn TokenSource> {
    Arc::new(ResolvedToken::from_error(TokenError::NotConfigured {
        field: "NETLIFY_API_TOKEN".into(),
        file: "config.yaml".into(),
    }))
}
