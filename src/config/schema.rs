//! Configuration schema definitions.
//!
//! Server-profile settings. Everything has a default so an empty document (or
//! no flags at all) yields a runnable configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Upstream API root, including the version prefix.
pub const DEFAULT_UPSTREAM_URL: &str = "https://api.netlify.com/api/v1";

/// Identifying user agent sent upstream.
pub const DEFAULT_USER_AGENT: &str = "netlify-project-manager/1.0";

/// Root configuration for the server profile.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (host, port).
    pub listener: ListenerConfig,

    /// Upstream API settings.
    pub upstream: UpstreamConfig,

    /// Inbound timeouts.
    pub timeouts: TimeoutConfig,

    /// Files on disk (token file, static assets).
    pub files: FilesConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    pub host: String,
    pub port: u16,
}

impl ListenerConfig {
    /// `host:port` string suitable for `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

/// Upstream API settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL the relay paths are appended to.
    pub base_url: String,

    pub user_agent: String,

    /// Bound on a single upstream call, in seconds.
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_UPSTREAM_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 30,
        }
    }
}

/// Timeout configuration for inbound requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Total time allowed for one inbound request, in seconds. Must exceed
    /// `upstream.timeout_secs`.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 35 }
    }
}

/// Paths read by the server profile.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FilesConfig {
    /// YAML file holding `NETLIFY_API_TOKEN`, relative to the working directory.
    pub token_file: PathBuf,

    /// Directory of static assets served outside `/api`. `None` disables it.
    pub static_dir: Option<PathBuf>,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            token_file: PathBuf::from("config.yaml"),
            static_dir: Some(PathBuf::from("public")),
        }
    }
}
