//! Site management proxy: server profile.
//!
//! ```text
//!   Browser / CLI                         site-proxy                          Netlify
//!   ─────────────                         ──────────                          ───────
//!   GET    /api/sites       ──▶  router ──▶ relay ──▶ GET    /api/v1/sites?per_page=100&...
//!   DELETE /api/sites/{id}  ──▶  router ──▶ relay ──▶ DELETE /api/v1/sites/{id}
//!   GET    /index.html      ──▶  static assets (public/)
//! ```
//!
//! The upstream token is read once at startup from `config.yaml`:
//!
//! ```yaml
//! NETLIFY_API_TOKEN: your_token_here
//! ```
//!
//! A missing or placeholder token does not stop the server; API calls answer
//! 500 until the file is fixed and the process restarted.

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

use site_proxy::auth::{FileTokenSource, ResolvedToken};
use site_proxy::config::schema::DEFAULT_UPSTREAM_URL;
use site_proxy::config::{validate_config, ConfigError, ProxyConfig};
use site_proxy::observability::logging;
use site_proxy::{HttpServer, Shutdown};

#[derive(Debug, Parser)]
#[command(name = "site-proxy", version)]
#[command(about = "List and delete Netlify sites through a local proxy", long_about = None)]
struct Args {
    /// Port to listen on.
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// Interface to bind.
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// YAML file holding NETLIFY_API_TOKEN.
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Directory of static assets.
    #[arg(long, default_value = "public")]
    static_dir: PathBuf,

    /// Disable static asset serving.
    #[arg(long)]
    no_static: bool,

    /// Upstream API base URL, including the version prefix.
    #[arg(long, default_value = DEFAULT_UPSTREAM_URL)]
    upstream_url: String,

    /// Upstream call timeout in seconds.
    #[arg(long, default_value_t = 30)]
    upstream_timeout_secs: u64,

    /// Inbound request timeout in seconds; must exceed the upstream timeout.
    #[arg(long, default_value_t = 35)]
    request_timeout_secs: u64,
}

impl Args {
    fn into_config(self) -> ProxyConfig {
        let mut config = ProxyConfig::default();
        config.listener.host = self.host;
        config.listener.port = self.port;
        config.files.token_file = self.config;
        config.files.static_dir = (!self.no_static).then_some(self.static_dir);
        config.upstream.base_url = self.upstream_url;
        config.upstream.timeout_secs = self.upstream_timeout_secs;
        config.timeouts.request_secs = self.request_timeout_secs;
        config
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init(logging::DEFAULT_FILTER);

    let config = Args::parse().into_config();
    validate_config(&config).map_err(ConfigError::Validation)?;

    let source = FileTokenSource::new(&config.files.token_file);
    let tokens = ResolvedToken::resolve(&source);
    match tokens.error() {
        None => tracing::info!(file = %source.path().display(), "Upstream token loaded"),
        Some(e) => tracing::warn!(
            file = %source.path().display(),
            error = %e,
            "Upstream token not configured; API calls will fail until restart"
        ),
    }

    let listener = TcpListener::bind(config.listener.bind_address()).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        url = %format!("http://localhost:{}", local_addr.port()),
        token_file = %config.files.token_file.display(),
        "Netlify Project Manager listening; put your token in the token file under NETLIFY_API_TOKEN"
    );

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, Arc::new(tokens))?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
