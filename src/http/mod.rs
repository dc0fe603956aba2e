//! HTTP server profile.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum router, middleware)
//!     → request.rs (request ID, trace span)
//!     → /api/sites, /api/sites/{id} → relay
//!     → everything else → static assets or JSON 404
//!     → response.rs (RelayResponse → JSON response)
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuidV4, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
