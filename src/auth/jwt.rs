//! JWT Token Service
//!
//! Handles JWT creation, validation, and claims management for user authentication.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, TokenData, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::models::{AuthResult, AuthUser, Identity};
use crate::config::{JwtConfig, MIN_SECRET_LEN};
use crate::error::{AuthError, ConfigError};

/// JWT Claims structure containing user information and token metadata
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// User identifier
    pub sub: String,
    /// Token issued at timestamp
    pub iat: i64,
    /// Token expiration timestamp
    pub exp: i64,
    /// Token issuer
    pub iss: String,
    /// Unique token id
    pub jti: String,
}

/// JWT service for token operations.
///
/// Built once at startup. Holds no mutable state, so one instance behind an
/// `Arc` serves every request without locking.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    header: Header,
    validation: Validation,
    issuer: String,
    ttl: Duration,
    ttl_seconds: u64,
}

impl JwtService {
    /// Create the service, refusing configurations that could not sign.
    pub fn new(config: &JwtConfig) -> Result<Self, ConfigError> {
        if !matches!(config.algorithm, Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512) {
            return Err(ConfigError::UnsupportedAlgorithm(format!("{:?}", config.algorithm)));
        }
        if config.secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::WeakSecret {
                min: MIN_SECRET_LEN,
                actual: config.secret.len(),
            });
        }
        let ttl = i64::try_from(config.ttl_seconds)
            .ok()
            .and_then(Duration::try_seconds)
            .filter(|ttl| Utc::now().checked_add_signed(*ttl).is_some());
        let ttl = match ttl {
            Some(ttl) if config.ttl_seconds > 0 => ttl,
            _ => {
                return Err(ConfigError::Invalid {
                    key: "TOKEN_TTL_SECONDS",
                    reason: format!("{} is out of range", config.ttl_seconds),
                });
            }
        };

        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(config.algorithm);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "sub", "iss"]);

        let service = Self {
            encoding_key,
            decoding_key,
            header: Header::new(config.algorithm),
            validation,
            issuer: config.issuer.clone(),
            ttl,
            ttl_seconds: config.ttl_seconds,
        };

        // Probe once so a bad key fails at startup instead of on a login.
        let probe = service.claims_for("probe");
        encode(&service.header, &probe, &service.encoding_key).map_err(ConfigError::SigningProbe)?;

        tracing::info!(
            "JWT service ready: alg={:?}, iss={}, ttl={}s",
            config.algorithm,
            service.issuer,
            service.ttl_seconds
        );
        Ok(service)
    }

    /// Configured token lifetime in seconds
    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }

    fn claims_for(&self, subject: &str) -> Claims {
        let now = Utc::now();
        let expiration = now
            .checked_add_signed(self.ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            iss: self.issuer.clone(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Sign a token for an authenticated identity
    pub fn issue(&self, identity: &Identity) -> Result<AuthResult, AuthError> {
        let claims = self.claims_for(&identity.id().to_string());
        let token = encode(&self.header, &claims, &self.encoding_key)?;
        Ok(AuthResult::new(token, self.ttl_seconds))
    }

    /// Validate and decode a JWT token
    pub fn validate_token(&self, token: &str) -> Result<TokenData<Claims>> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .context("Failed to validate JWT token")
    }

    /// Validate a token and return the user it was issued for
    pub fn authenticate_token(&self, token: &str) -> Result<AuthUser> {
        let token_data = self.validate_token(token)?;
        let id = token_data
            .claims
            .sub
            .parse::<i32>()
            .context("Token subject is not a user id")?;
        Ok(AuthUser { id })
    }
}

#[cfg(test)]
pub(crate) const TEST_SECRET: &str = "test-secret-test-secret-test-secret";
