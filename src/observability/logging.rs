//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber for both binaries
//! - Honor `RUST_LOG`, falling back to a per-binary default
//!
//! # Design Decisions
//! - Logs go to stderr; stdout belongs to the function binary's response
//! - Tokens are never passed to log macros

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "site_proxy=info,tower_http=info";

/// Install the global subscriber.
pub fn init(default_filter: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
