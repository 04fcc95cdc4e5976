//! # Startup
//!
//! Builds the login stack once: configuration, signing key, user store and
//! the [`AuthService`] that ties them together.

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::auth::jwt::JwtService;
use crate::auth::password::Argon2Verifier;
use crate::auth::service::AuthService;
use crate::config::AuthConfig;
use crate::database::{DatabaseConfig, DatabaseConnection, migrations};

/// Everything a request handler needs to log users in
#[derive(Clone)]
pub struct AuthContext {
    pub service: AuthService,
    pub db: Arc<DatabaseConnection>,
    pub verifier: Arc<Argon2Verifier>,
}

impl AuthContext {
    /// Load `.env` and the process environment, then start.
    pub async fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        let config = AuthConfig::from_env().context("Failed to load configuration from environment")?;
        Self::start(config).await
    }

    /// Start with an explicit configuration.
    ///
    /// Fails if the signing key is unusable or the database is unreachable.
    pub async fn start(config: AuthConfig) -> Result<Self> {
        tracing::info!("Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

        let jwt_service = Arc::new(JwtService::new(&config.jwt).context("Invalid token signing configuration")?);

        let database_url = config
            .database_url
            .as_deref()
            .context("DATABASE_URL must be set in the environment")?;
        let db_config = DatabaseConfig::from_url(database_url)?.with_max_size(config.database_max_connections);
        let db = Arc::new(DatabaseConnection::new(db_config).await?);

        if config.run_migrations {
            migrations::run_migrations(db.pool()).await?;
        } else if migrations::needs_migration(db.pool()).await? {
            tracing::warn!("users table is missing; set RUN_MIGRATIONS=true to create it");
        }

        let verifier = Arc::new(Argon2Verifier::new());
        let service = AuthService::new(db.clone(), verifier.clone(), jwt_service);

        tracing::info!("Auth service ready");
        Ok(Self { service, db, verifier })
    }

    /// Hash a password and store a new user
    pub async fn register(&self, email: &str, password: &str) -> Result<crate::Identity> {
        let hash = self
            .verifier
            .hash(password)
            .map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?;
        self.db.create_user(email, &hash).await
    }
}
