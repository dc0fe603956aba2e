//! Credentials subsystem.
//!
//! # Data Flow
//! ```text
//! inbound headers ──▶ gate.rs (function profile only) ──▶ 401 or pass
//!
//! env var / config.yaml ──▶ token.rs (TokenSource) ──▶ Token or TokenError (500)
//! ```
//!
//! # Design Decisions
//! - Token sources are trait objects so the relay does not know which profile runs it
//! - The gate is a plain value checked by the function adapter, not a middleware

pub mod gate;
pub mod token;

pub use gate::AuthGate;
pub use token::{EnvTokenSource, FileTokenSource, ResolvedToken, Token, TokenError, TokenSource};
