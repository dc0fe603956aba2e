//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! relay, adapters, tower-http TraceLayer
//!     → tracing events/spans (request_id, route, status)
//!     → logging.rs (fmt layer on stderr, EnvFilter)
//! ```

pub mod logging;
