//! Error types
//!
//! Request-path errors ([`AuthError`]) are kept separate from startup errors
//! ([`ConfigError`]). A rejected login always surfaces as
//! [`AuthError::AuthFailed`]; the reason it was rejected only reaches the
//! audit log through [`RejectReason`].

use std::fmt;

use thiserror::Error;

/// Errors returned by [`AuthService::authenticate`](crate::AuthService::authenticate)
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown email or wrong password. Deliberately carries no detail.
    #[error("authentication failed")]
    AuthFailed,

    /// The user store could not be reached or the lookup query failed.
    #[error("user store unavailable")]
    StoreUnavailable(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Encoding the token failed after the key passed the startup probe.
    #[error("failed to sign token")]
    TokenSigning(#[from] jsonwebtoken::errors::Error),
}

impl AuthError {
    pub fn is_auth_failed(&self) -> bool {
        matches!(self, AuthError::AuthFailed)
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        AuthError::StoreUnavailable(err.into())
    }
}

/// Why a login was rejected. Logged, never returned to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    UnknownIdentity,
    BadCredential,
}

impl RejectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectReason::UnknownIdentity => "unknown_identity",
            RejectReason::BadCredential => "bad_credential",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Startup failures. Any of these should stop the process before it serves
/// a single login.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),

    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },

    #[error("signing secret must be at least {min} bytes, got {actual}")]
    WeakSecret { min: usize, actual: usize },

    #[error("unsupported signing algorithm {0}, expected HS256, HS384 or HS512")]
    UnsupportedAlgorithm(String),

    #[error("signing key rejected by probe signature")]
    SigningProbe(#[source] jsonwebtoken::errors::Error),
}

/// Errors raised by store adapters on writes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("email already registered: {0}")]
    DuplicateEmail(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_failed_has_no_detail() {
        assert_eq!(AuthError::AuthFailed.to_string(), "authentication failed");
        assert!(AuthError::AuthFailed.is_auth_failed());
    }

    #[test]
    fn test_store_failure_keeps_source() {
        let err: AuthError = anyhow::anyhow!("connection refused").into();
        assert!(!err.is_auth_failed());
        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("connection refused"));
    }

    #[test]
    fn test_reject_reason_labels() {
        assert_eq!(RejectReason::UnknownIdentity.to_string(), "unknown_identity");
        assert_eq!(RejectReason::BadCredential.as_str(), "bad_credential");
    }
}
