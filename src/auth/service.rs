//! Login orchestration: lookup, verification, issuance.

use std::sync::Arc;

use crate::auth::jwt::JwtService;
use crate::auth::models::{AuthResult, Identity, normalize_email};
use crate::auth::password::CredentialVerifier;
use crate::auth::store::UserStore;
use crate::error::{AuthError, RejectReason};

/// Authenticates email/password pairs and issues tokens.
///
/// Cheap to clone; every collaborator sits behind an `Arc` and all request
/// state lives on the stack of [`authenticate`](Self::authenticate).
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn UserStore>,
    verifier: Arc<dyn CredentialVerifier>,
    issuer: Arc<JwtService>,
}

impl AuthService {
    pub fn new(
        store: Arc<dyn UserStore>,
        verifier: Arc<dyn CredentialVerifier>,
        issuer: Arc<JwtService>,
    ) -> Self {
        Self {
            store,
            verifier,
            issuer,
        }
    }

    /// Token issuer, for validating tokens on later requests
    pub fn jwt_service(&self) -> &Arc<JwtService> {
        &self.issuer
    }

    /// Authenticate a user and issue a token.
    ///
    /// Unknown email and wrong password both return [`AuthError::AuthFailed`].
    /// A failing store returns [`AuthError::StoreUnavailable`]. Nothing is
    /// retried.
    pub async fn authenticate(&self, email: &str, secret: &str) -> Result<AuthResult, AuthError> {
        let email = normalize_email(email);

        let identity = if email.is_empty() {
            None
        } else {
            self.store.find_by_email(&email).await.map_err(|e| {
                tracing::error!("User lookup failed: {:#}", e);
                AuthError::from(e)
            })?
        };

        let identity = match identity {
            Some(identity) => identity,
            None => {
                self.run_decoy(secret).await;
                return Err(self.reject(&email, RejectReason::UnknownIdentity));
            }
        };

        if !self.verify(secret, &identity).await {
            return Err(self.reject(&email, RejectReason::BadCredential));
        }

        let result = self.issuer.issue(&identity).map_err(|e| {
            tracing::error!("Token signing failed for user {}: {}", identity.id(), e);
            e
        })?;
        tracing::debug!("Issued token for user {}, expires in {}s", identity.id(), result.expires_in());
        Ok(result)
    }

    /// Argon2 is CPU-bound, so it runs on the blocking pool.
    async fn verify(&self, secret: &str, identity: &Identity) -> bool {
        let verifier = Arc::clone(&self.verifier);
        let secret = secret.to_owned();
        let hash = identity.credential_hash.clone();

        match tokio::task::spawn_blocking(move || verifier.verify(&secret, &hash)).await {
            Ok(matched) => matched,
            Err(e) => {
                tracing::error!("Credential verification task failed: {}", e);
                false
            }
        }
    }

    async fn run_decoy(&self, secret: &str) {
        let verifier = Arc::clone(&self.verifier);
        let secret = secret.to_owned();
        if let Err(e) = tokio::task::spawn_blocking(move || verifier.verify_decoy(&secret)).await {
            tracing::warn!("Decoy verification task failed: {}", e);
        }
    }

    fn reject(&self, email: &str, reason: RejectReason) -> AuthError {
        tracing::warn!(reason = %reason, email = %email, "Login rejected");
        AuthError::AuthFailed
    }
}
