//! Outbound response value shared by both deployment profiles.

use axum::http::StatusCode;
use serde_json::{json, Value};

use crate::error::RelayError;

/// Status plus JSON body. Always rendered with `Content-Type: application/json`.
#[derive(Debug, Clone, PartialEq)]
pub struct RelayResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl RelayResponse {
    pub fn new(status: StatusCode, body: Value) -> Self {
        Self { status, body }
    }

    /// `{"error": message}` with the given status.
    pub fn error(status: StatusCode, message: impl Into<String>) -> Self {
        Self::new(status, json!({ "error": message.into() }))
    }

    pub fn not_found() -> Self {
        RelayError::NotFound.into()
    }

    /// Serialized body. `Value` serialization cannot fail.
    pub fn body_string(&self) -> String {
        self.body.to_string()
    }
}

impl From<RelayError> for RelayResponse {
    fn from(err: RelayError) -> Self {
        Self::error(err.status(), err.to_string())
    }
}
