//! # Login Auth
//!
//! Credential authentication and token issuance for a login/JWT backend.
//!
//! A login attempt goes through three collaborators:
//! - a [`UserStore`](auth::store::UserStore) that finds the user by email,
//! - a [`CredentialVerifier`](auth::password::CredentialVerifier) that checks
//!   the password against the stored Argon2 hash,
//! - the [`JwtService`](auth::jwt::JwtService) that signs a time-bounded token.
//!
//! [`AuthService`](auth::service::AuthService) wires them together and
//! returns an [`AuthResult`](auth::models::AuthResult), serialized as
//! `{"token": "...", "expiresIn": 3600}`.
//!
//! ## Startup
//! ```no_run
//! # async fn run() -> anyhow::Result<()> {
//! login_auth::telemetry::init();
//! let ctx = login_auth::context::AuthContext::from_env().await?;
//! let result = ctx.service.authenticate("a@b.com", "pw123").await?;
//! println!("{}", result.token());
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment
//! See [`config::AuthConfig`] for the variables read at startup. A `.env`
//! file in the working directory is honored.

pub mod auth;
pub mod config;
pub mod context;
pub mod database;
pub mod error;
pub mod telemetry;

pub use auth::models::{AuthResult, Identity};
pub use auth::service::AuthService;
pub use error::{AuthError, ConfigError};
