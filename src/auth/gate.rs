//! Shared-secret gate for the function profile.
//!
//! When a secret is configured, requests must carry it verbatim in the
//! `x-app-password` header. Without a secret the gate lets everything through.

use axum::http::HeaderMap;

use crate::error::RelayError;

/// Header carrying the shared secret.
pub const APP_PASSWORD_HEADER: &str = "x-app-password";

/// Environment variable holding the expected secret.
pub const APP_PASSWORD_VAR: &str = "APP_PASSWORD";

#[derive(Clone, Default)]
pub struct AuthGate {
    secret: Option<String>,
}

impl AuthGate {
    /// Gate expecting `secret`; an empty secret disables the check.
    pub fn new(secret: Option<String>) -> Self {
        Self {
            secret: secret.filter(|s| !s.is_empty()),
        }
    }

    /// Open gate.
    pub fn open() -> Self {
        Self { secret: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.secret.is_some()
    }

    /// Check the inbound headers. Header names are matched case-insensitively
    /// by `HeaderMap`; a missing header counts as the empty string.
    pub fn check(&self, headers: &HeaderMap) -> Result<(), RelayError> {
        let Some(expected) = &self.secret else {
            return Ok(());
        };

        let provided = headers
            .get(APP_PASSWORD_HEADER)
            .map(|v| v.as_bytes())
            .unwrap_or_default();

        if constant_time_eq(provided, expected.as_bytes()) {
            Ok(())
        } else {
            Err(RelayError::Unauthorized)
        }
    }
}

impl std::fmt::Debug for AuthGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGate")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(name: &'static str, value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(name, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_open_gate_allows_everything() {
        let gate = AuthGate::open();
        assert!(gate.check(&HeaderMap::new()).is_ok());
        assert!(gate.check(&headers_with("x-app-password", "anything")).is_ok());
    }

    #[test]
    fn test_empty_secret_disables_gate() {
        let gate = AuthGate::new(Some(String::new()));
        assert!(!gate.is_enabled());
        assert!(gate.check(&HeaderMap::new()).is_ok());
    }

    #[test]
    fn test_secret_required() {
        let gate = AuthGate::new(Some("hunter2".into()));

        assert!(matches!(
            gate.check(&HeaderMap::new()),
            Err(RelayError::Unauthorized)
        ));
        assert!(gate.check(&headers_with("x-app-password", "hunter3")).is_err());
        assert!(gate.check(&headers_with("x-app-password", "hunter")).is_err());
        assert!(gate.check(&headers_with("x-app-password", "hunter2")).is_ok());
    }

    #[test]
    fn test_header_name_case_insensitive() {
        let gate = AuthGate::new(Some("hunter2".into()));
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::HeaderName::from_bytes(b"X-App-Password").unwrap(),
            HeaderValue::from_static("hunter2"),
        );
        assert!(gate.check(&headers).is_ok());
    }

    #[test]
    fn test_debug_hides_secret() {
        let gate = AuthGate::new(Some("hunter2".into()));
        assert!(!format!("{:?}", gate).contains("hunter2"));
    }
}
