//! Upstream bearer token sources.
//!
//! # Responsibilities
//! - Produce the bearer token used for upstream calls, or a configuration error
//! - Read from the process environment (function profile)
//! - Read from a YAML file on disk (server profile)
//! - Capture a source once at startup and replay it per request
//!
//! # Design Decisions
//! - Token values never appear in `Debug` output or logs
//! - Errors are `Clone` so a failed startup resolution can be replayed as 500s

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::loader::load_token_file;

/// Environment variable / YAML field that holds the token.
pub const TOKEN_VAR: &str = "NETLIFY_API_TOKEN";

/// Value shipped in the example config file; treated as "not configured".
pub const TOKEN_PLACEHOLDER: &str = "your_token_here";

/// Configuration problem preventing an upstream call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("{var} environment variable not set")]
    EnvNotSet { var: String },

    #[error("{field} not set in {file}")]
    NotConfigured { field: String, file: String },

    #[error("failed to read {file}: {reason}")]
    Unreadable { file: String, reason: String },

    #[error("failed to parse {file}: {reason}")]
    Invalid { file: String, reason: String },
}

/// Opaque bearer credential.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Raw value, for building the `Authorization` header only.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(***)")
    }
}

/// Anything able to hand out the upstream token.
pub trait TokenSource: Send + Sync {
    fn token(&self) -> Result<Token, TokenError>;
}

/// Reads the token from an environment variable on every call.
#[derive(Debug, Clone)]
pub struct EnvTokenSource {
    var: String,
}

impl EnvTokenSource {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvTokenSource {
    fn default() -> Self {
        Self::new(TOKEN_VAR)
    }
}

impl TokenSource for EnvTokenSource {
    fn token(&self) -> Result<Token, TokenError> {
        match std::env::var(&self.var) {
            Ok(value) if !value.is_empty() => Ok(Token(value)),
            _ => Err(TokenError::EnvNotSet {
                var: self.var.clone(),
            }),
        }
    }
}

/// Reads the token from the `NETLIFY_API_TOKEN` field of a YAML file.
#[derive(Debug, Clone)]
pub struct FileTokenSource {
    path: PathBuf,
}

impl FileTokenSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenSource for FileTokenSource {
    fn token(&self) -> Result<Token, TokenError> {
        let file = load_token_file(&self.path)?;
        let display = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string());

        match file.netlify_api_token {
            Some(value) if !value.is_empty() && value != TOKEN_PLACEHOLDER => Ok(Token(value)),
            _ => Err(TokenError::NotConfigured {
                field: TOKEN_VAR.to_string(),
                file: display,
            }),
        }
    }
}

/// A source evaluated once, replayed for every request.
#[derive(Debug, Clone)]
pub struct ResolvedToken {
    result: Result<Token, TokenError>,
}

impl ResolvedToken {
    pub fn resolve(source: &dyn TokenSource) -> Self {
        Self {
            result: source.token(),
        }
    }

    pub fn from_token(token: Token) -> Self {
        Self { result: Ok(token) }
    }

    pub fn from_error(error: TokenError) -> Self {
        Self { result: Err(error) }
    }

    pub fn is_configured(&self) -> bool {
        self.result.is_ok()
    }

    /// The captured configuration problem, if resolution failed.
    pub fn error(&self) -> Option<&TokenError> {
        self.result.as_ref().err()
    }
}

impl TokenSource for ResolvedToken {
    fn token(&self) -> Result<Token, TokenError> {
        self.result.clone()
    }
}
