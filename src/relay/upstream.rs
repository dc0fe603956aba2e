//! Upstream API client.
//!
//! # Responsibilities
//! - Build versioned upstream URLs for the two supported operations
//! - Attach bearer auth, JSON content type and the identifying user agent
//! - Parse the response body as JSON, swallowing parse failures
//!
//! # Design Decisions
//! - One request per call, no retries
//! - Bounded by the configured timeout
//! - Transport errors surface as `UpstreamError`; HTTP statuses never do

use axum::http::{header, Method, StatusCode};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::auth::token::Token;
use crate::config::UpstreamConfig;

/// Page size requested when listing sites.
pub const SITES_PER_PAGE: &str = "100";

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("invalid upstream base URL '{url}': {reason}")]
    BaseUrl { url: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("{0}")]
    Request(#[from] reqwest::Error),
}

/// Status and (optionally) parsed body of one upstream call.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub body: Option<Value>,
}

/// Parse an upstream body. Empty or non-JSON bodies yield `None`.
pub fn parse_body(bytes: &[u8]) -> Option<Value> {
    if bytes.is_empty() {
        return None;
    }
    serde_json::from_slice(bytes).ok()
}

fn is_loopback(url: &Url) -> bool {
    match url.host() {
        Some(url::Host::Ipv4(ip)) => ip.is_loopback(),
        Some(url::Host::Ipv6(ip)) => ip.is_loopback(),
        Some(url::Host::Domain(domain)) => domain == "localhost",
        None => false,
    }
}

#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: Client,
    base_url: Url,
}

impl UpstreamClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| UpstreamError::BaseUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(UpstreamError::BaseUrl {
                url: config.base_url.clone(),
                reason: "cannot be a base".into(),
            });
        }

        let mut builder = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone());

        // Loopback upstreams (local stubs) bypass any system proxy.
        if is_loopback(&base_url) {
            builder = builder.no_proxy();
        }

        let http = builder.build().map_err(UpstreamError::Client)?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `GET /sites?per_page=100&sort_by=updated_at&sort_order=desc`
    pub async fn list_sites(&self, token: &Token) -> Result<UpstreamResponse, UpstreamError> {
        let mut url = self.endpoint(&["sites"]);
        url.query_pairs_mut()
            .append_pair("per_page", SITES_PER_PAGE)
            .append_pair("sort_by", "updated_at")
            .append_pair("sort_order", "desc");
        self.send(Method::GET, url, token).await
    }

    /// `DELETE /sites/{id}`
    pub async fn delete_site(
        &self,
        id: &str,
        token: &Token,
    ) -> Result<UpstreamResponse, UpstreamError> {
        let url = self.endpoint(&["sites", id]);
        self.send(Method::DELETE, url, token).await
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn send(
        &self,
        method: Method,
        url: Url,
        token: &Token,
    ) -> Result<UpstreamResponse, UpstreamError> {
        tracing::debug!(method = %method, path = %url.path(), "Calling upstream");

        let response = self
            .http
            .request(method, url)
            .bearer_auth(token.expose())
            .header(header::CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;

        Ok(UpstreamResponse {
            status,
            body: parse_body(&bytes),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client(base_url: &str) -> UpstreamClient {
        UpstreamClient::new(&UpstreamConfig {
            base_url: base_url.into(),
            ..UpstreamConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_parse_body() {
        assert_eq!(parse_body(b""), None);
        assert_eq!(parse_body(b"<html>oops</html>"), None);
        assert_eq!(parse_body(b"[1,2]"), Some(json!([1, 2])));
        assert_eq!(parse_body(b"null"), Some(Value::Null));
    }

    #[test]
    fn test_endpoint_keeps_version_prefix() {
        let c = client("https://api.netlify.com/api/v1");
        assert_eq!(
            c.endpoint(&["sites", "abc123"]).as_str(),
            "https://api.netlify.com/api/v1/sites/abc123"
        );

        let trailing = client("https://api.netlify.com/api/v1/");
        assert_eq!(
            trailing.endpoint(&["sites"]).as_str(),
            "https://api.netlify.com/api/v1/sites"
        );
    }

    #[test]
    fn test_endpoint_encodes_site_id() {
        let c = client("https://api.netlify.com/api/v1");
        assert_eq!(
            c.endpoint(&["sites", "a b?c"]).as_str(),
            "https://api.netlify.com/api/v1/sites/a%20b%3Fc"
        );
    }

    #[test]
    fn test_loopback_detection() {
        assert!(is_loopback(&Url::parse("http://127.0.0.1:9000/api/v1").unwrap()));
        assert!(is_loopback(&Url::parse("http://localhost/api/v1").unwrap()));
        assert!(!is_loopback(&Url::parse("https://api.netlify.com/api/v1").unwrap()));
    }

    #[test]
    fn test_rejects_bad_base_url() {
        let err = UpstreamClient::new(&UpstreamConfig {
            base_url: "not a url".into(),
            ..UpstreamConfig::default()
        })
        .unwrap_err();
        assert!(matches!(err, UpstreamError::BaseUrl { .. }));
    }
}
