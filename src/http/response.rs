//! Response rendering.
//!
//! Relay responses always leave as JSON with `Content-Type: application/json`,
//! including error paths and a `null` body from an empty upstream response.

use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::error::RelayError;
use crate::relay::RelayResponse;

impl IntoResponse for RelayResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        RelayResponse::from(self).into_response()
    }
}
