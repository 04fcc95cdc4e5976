//! Configuration module for environment variables and application settings

use std::env;

use jsonwebtoken::Algorithm;

use crate::database::connection::DatabaseConfig;
use crate::error::ConfigError;

/// Default token lifetime in seconds
pub const DEFAULT_TOKEN_TTL_SECONDS: u64 = 3600;

/// Default `iss` claim
pub const DEFAULT_ISSUER: &str = "login-auth";

/// Shortest accepted HMAC secret, in bytes
pub const MIN_SECRET_LEN: usize = 32;

/// Configuration loaded once at startup
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Token signing configuration
    pub jwt: JwtConfig,

    /// Database connection string, when a postgres store is used
    pub database_url: Option<String>,

    /// Pool size for the postgres store
    pub database_max_connections: usize,

    /// Create the `users` table on startup
    pub run_migrations: bool,
}

#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub algorithm: Algorithm,
    /// Token lifetime in seconds
    pub ttl_seconds: u64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("algorithm", &self.algorithm)
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

impl JwtConfig {
    /// HS256 config with the default issuer and TTL
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            issuer: DEFAULT_ISSUER.to_string(),
            algorithm: Algorithm::HS256,
            ttl_seconds: DEFAULT_TOKEN_TTL_SECONDS,
        }
    }

    pub fn with_ttl(mut self, ttl_seconds: u64) -> Self {
        self.ttl_seconds = ttl_seconds;
        self
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }
}

impl AuthConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// Missing optional keys fall back to their defaults. Present but
    /// unparsable values are errors, so a typo fails startup instead of
    /// silently using a default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let issuer = lookup("JWT_ISSUER").unwrap_or_else(|| DEFAULT_ISSUER.to_string());

        let algorithm = match lookup("JWT_ALGORITHM") {
            Some(raw) => parse_algorithm(&raw)?,
            None => Algorithm::HS256,
        };

        let ttl_seconds = match lookup("TOKEN_TTL_SECONDS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| ConfigError::Invalid {
                key: "TOKEN_TTL_SECONDS",
                reason: e.to_string(),
            })?,
            None => DEFAULT_TOKEN_TTL_SECONDS,
        };
        if ttl_seconds == 0 {
            return Err(ConfigError::Invalid {
                key: "TOKEN_TTL_SECONDS",
                reason: "must be greater than zero".to_string(),
            });
        }

        let database_max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw.trim().parse::<usize>().map_err(|e| ConfigError::Invalid {
                key: "DATABASE_MAX_CONNECTIONS",
                reason: e.to_string(),
            })?,
            None => DatabaseConfig::DEFAULT_MAX_SIZE,
        };
        if database_max_connections == 0 {
            return Err(ConfigError::Invalid {
                key: "DATABASE_MAX_CONNECTIONS",
                reason: "must be greater than zero".to_string(),
            });
        }

        let run_migrations = match lookup("RUN_MIGRATIONS") {
            Some(raw) => parse_bool(&raw).ok_or_else(|| ConfigError::Invalid {
                key: "RUN_MIGRATIONS",
                reason: format!("expected true or false, got {raw:?}"),
            })?,
            None => false,
        };

        Ok(Self {
            jwt: JwtConfig {
                secret,
                issuer,
                algorithm,
                ttl_seconds,
            },
            database_url: lookup("DATABASE_URL"),
            database_max_connections,
            run_migrations,
        })
    }
}

/// Only the HMAC family is accepted; the key is a shared secret.
pub fn parse_algorithm(raw: &str) -> Result<Algorithm, ConfigError> {
    match raw.trim().to_ascii_uppercase().as_str() {
        "HS256" => Ok(Algorithm::HS256),
        "HS384" => Ok(Algorithm::HS384),
        "HS512" => Ok(Algorithm::HS512),
        _ => Err(ConfigError::UnsupportedAlgorithm(raw.to_string())),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config =
            AuthConfig::from_lookup(lookup_from(&[("JWT_SECRET", "0123456789abcdef0123456789abcdef")]))
                .unwrap();

        assert_eq!(config.jwt.ttl_seconds, 3600);
        assert_eq!(config.jwt.issuer, "login-auth");
        assert_eq!(config.jwt.algorithm, Algorithm::HS256);
        assert_eq!(config.database_url, None);
        assert_eq!(config.database_max_connections, 16);
        assert!(!config.run_migrations);
    }

    #[test]
    fn test_overrides() {
        let config = AuthConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET", "0123456789abcdef0123456789abcdef"),
            ("JWT_ISSUER", "accounts"),
            ("JWT_ALGORITHM", "hs512"),
            ("TOKEN_TTL_SECONDS", "900"),
            ("DATABASE_URL", "postgres://u:p@localhost/auth"),
            ("DATABASE_MAX_CONNECTIONS", "4"),
            ("RUN_MIGRATIONS", "true"),
        ]))
        .unwrap();

        assert_eq!(config.jwt.ttl_seconds, 900);
        assert_eq!(config.jwt.issuer, "accounts");
        assert_eq!(config.jwt.algorithm, Algorithm::HS512);
        assert_eq!(config.database_url.as_deref(), Some("postgres://u:p@localhost/auth"));
        assert_eq!(config.database_max_connections, 4);
        assert!(config.run_migrations);
    }

    #[test]
    fn test_missing_secret() {
        let err = AuthConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("JWT_SECRET")));
    }

    #[test]
    fn test_rejects_bad_values() {
        let secret = ("JWT_SECRET", "0123456789abcdef0123456789abcdef");

        let err = AuthConfig::from_lookup(lookup_from(&[secret, ("TOKEN_TTL_SECONDS", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "TOKEN_TTL_SECONDS", .. }));

        let err = AuthConfig::from_lookup(lookup_from(&[secret, ("TOKEN_TTL_SECONDS", "1h")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "TOKEN_TTL_SECONDS", .. }));

        let err = AuthConfig::from_lookup(lookup_from(&[secret, ("JWT_ALGORITHM", "RS256")])).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedAlgorithm(_)));

        let err = AuthConfig::from_lookup(lookup_from(&[secret, ("DATABASE_MAX_CONNECTIONS", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "DATABASE_MAX_CONNECTIONS", .. }));

        let err = AuthConfig::from_lookup(lookup_from(&[secret, ("RUN_MIGRATIONS", "maybe")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "RUN_MIGRATIONS", .. }));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = JwtConfig::new("0123456789abcdef0123456789abcdef");
        let printed = format!("{config:?}");
        assert!(!printed.contains("0123456789abcdef"));
        assert!(printed.contains("<redacted>"));
    }
}
