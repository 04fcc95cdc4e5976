//! Password hashing and verification.

use argon2::password_hash::rand_core::OsRng;
use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use once_cell::sync::OnceCell;

/// Checks a plaintext secret against a stored hash.
///
/// Implementations fail closed: anything that is not a positive match,
/// including a hash that does not parse, returns `false`.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, plaintext: &str, credential_hash: &str) -> bool;

    /// Spend the same effort as [`verify`](Self::verify) when there is no
    /// stored hash to check against.
    fn verify_decoy(&self, _plaintext: &str) {}
}

/// Argon2id verifier. Hashes are PHC strings with a random per-hash salt.
#[derive(Clone)]
pub struct Argon2Verifier {
    argon2: Argon2<'static>,
    decoy_hash: OnceCell<String>,
}

impl Default for Argon2Verifier {
    fn default() -> Self {
        Self::with_params(Params::DEFAULT)
    }
}

impl Argon2Verifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cost parameters apply to new hashes. Verification always uses the
    /// parameters encoded in the stored hash.
    pub fn with_params(params: Params) -> Self {
        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
            decoy_hash: OnceCell::new(),
        }
    }

    /// Hash a password for storage
    pub fn hash(&self, plaintext: &str) -> Result<String, argon2::password_hash::Error> {
        let salt = SaltString::generate(&mut OsRng);
        Ok(self
            .argon2
            .hash_password(plaintext.as_bytes(), &salt)?
            .to_string())
    }

    fn decoy_hash(&self) -> Option<&str> {
        self.decoy_hash
            .get_or_try_init(|| self.hash("decoy-credential"))
            .ok()
            .map(String::as_str)
    }
}

impl CredentialVerifier for Argon2Verifier {
    fn verify(&self, plaintext: &str, credential_hash: &str) -> bool {
        let parsed_hash = match PasswordHash::new(credential_hash) {
            Ok(h) => h,
            Err(_) => return false,
        };
        self.argon2
            .verify_password(plaintext.as_bytes(), &parsed_hash)
            .is_ok()
    }

    fn verify_decoy(&self, plaintext: &str) {
        if let Some(hash) = self.decoy_hash() {
            let _ = self.verify(plaintext, hash);
        }
    }
}

#[cfg(test)]
pub(crate) fn test_verifier() -> Argon2Verifier {
    // Minimum-cost parameters keep the tests fast.
    let params = Params::new(Params::MIN_M_COST, 1, 1, None).unwrap();
    Argon2Verifier::with_params(params)
}
