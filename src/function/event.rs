//! Platform event and response shapes for the function profile.
//!
//! ```json
//! {"httpMethod": "DELETE", "path": "/api/sites/abc123", "headers": {"x-app-password": "..."}}
//! ```
//!
//! `path` is the original request path, before any platform redirect.

use axum::http::{header, HeaderMap, HeaderName, HeaderValue, Method};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::relay::RelayResponse;

/// Inbound invocation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionEvent {
    pub http_method: String,
    pub path: String,
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl FunctionEvent {
    /// Parsed method, `None` if the platform sent something unparsable.
    /// Methods are case-sensitive: `get` is an extension method, not `GET`.
    pub fn method(&self) -> Option<Method> {
        Method::from_bytes(self.http_method.as_bytes()).ok()
    }

    /// Headers as a case-insensitive map. Invalid names or values are dropped.
    pub fn header_map(&self) -> HeaderMap {
        self.headers
            .iter()
            .filter_map(|(name, value)| {
                let name = HeaderName::from_bytes(name.as_bytes()).ok()?;
                let value = HeaderValue::from_str(value).ok()?;
                Some((name, value))
            })
            .collect()
    }
}

/// Invocation result handed back to the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl From<RelayResponse> for FunctionResponse {
    fn from(resp: RelayResponse) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert(
            header::CONTENT_TYPE.as_str().to_string(),
            "application/json".to_string(),
        );
        Self {
            status_code: resp.status.as_u16(),
            headers,
            body: resp.body_string(),
        }
    }
}
