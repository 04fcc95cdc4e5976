//! Authentication Models
//!
//! Data structures for authentication requests, responses, and user information.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Normalize an email for lookup: trim surrounding whitespace and lowercase.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// A stored user, as read from a [`UserStore`](crate::auth::store::UserStore).
///
/// The credential hash stays inside the crate: there is no public getter,
/// the type is not serializable, and `Debug` redacts it.
#[derive(Clone, PartialEq, Eq)]
pub struct Identity {
    id: i32,
    email: String,
    pub(crate) credential_hash: String,
}

impl Identity {
    /// Build an identity. The email is normalized here so every store keys
    /// on the same form.
    pub fn new(id: i32, email: &str, credential_hash: impl Into<String>) -> Self {
        Self {
            id,
            email: normalize_email(email),
            credential_hash: credential_hash.into(),
        }
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("credential_hash", &"<redacted>")
            .finish()
    }
}

/// Login request payload
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Token response after successful authentication.
///
/// Built once by the token issuer and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResult {
    token: String,
    expires_in: u64,
}

impl AuthResult {
    pub(crate) fn new(token: String, expires_in: u64) -> Self {
        Self { token, expires_in }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Seconds until the token expires
    pub fn expires_in(&self) -> u64 {
        self.expires_in
    }

    pub fn into_token(self) -> String {
        self.token
    }
}

/// Authenticated user information extracted from a validated token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: i32,
}
