//! Serverless function profile.
//!
//! # Data Flow
//! ```text
//! platform event (JSON)
//!     → event.rs (FunctionEvent)
//!     → handler.rs (AuthGate → RouteTable → Relay)
//!     → FunctionResponse (statusCode, headers, body string)
//! ```

pub mod event;
pub mod handler;

pub use event::{FunctionEvent, FunctionResponse};
pub use handler::{FunctionHandler, FunctionSettings};
