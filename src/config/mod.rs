//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! CLI flags / env (PORT, ...)
//!     → schema.rs (ProxyConfig with defaults)
//!     → validation.rs (semantic checks)
//!     → ProxyConfig (validated, immutable)
//!
//! config.yaml
//!     → loader.rs (TokenFile)
//!     → auth::token::FileTokenSource
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - The token file is read once at startup, not per request

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::{FilesConfig, ListenerConfig, ProxyConfig, TimeoutConfig, UpstreamConfig};
pub use validation::{validate_config, ConfigError, ValidationError};
