//! # Authentication Module
//!
//! Credential verification, token issuance and the login flow that ties
//! them to a user store.

pub mod jwt;
pub mod models;
pub mod password;
pub mod service;
pub mod store;

pub use jwt::{Claims, JwtService};
pub use models::{AuthResult, AuthUser, Identity, LoginRequest};
pub use password::{Argon2Verifier, CredentialVerifier};
pub use service::AuthService;
pub use store::{InMemoryUserStore, UserStore};
