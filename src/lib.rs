//! Site management proxy library.
//!
//! Relays two operations (list sites, delete a site) to the Netlify REST API,
//! either as an always-on HTTP server or as a one-shot serverless function.

pub mod auth;
pub mod config;
pub mod error;
pub mod function;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod relay;

pub use config::schema::ProxyConfig;
pub use error::RelayError;
pub use function::FunctionHandler;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use relay::{Profile, Relay, RelayResponse, Route};
