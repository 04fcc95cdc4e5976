//! User lookup port and the in-memory adapter.

use anyhow::Result;
use async_trait::async_trait;
use dashmap::{DashMap, mapref::entry::Entry};

use crate::auth::models::{Identity, normalize_email};
use crate::error::StoreError;

/// Lookup of a user by unique email.
///
/// `Ok(None)` means no such user. `Err` means the store itself failed and is
/// reported to the caller as an infrastructure fault, not a bad login.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>>;
}

/// Concurrent in-process store keyed by normalized email
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: DashMap<String, Identity>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an identity. Emails are unique.
    pub fn insert(&self, identity: Identity) -> Result<(), StoreError> {
        match self.users.entry(identity.email().to_string()) {
            Entry::Occupied(entry) => Err(StoreError::DuplicateEmail(entry.key().clone())),
            Entry::Vacant(entry) => {
                entry.insert(identity);
                Ok(())
            }
        }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>> {
        Ok(self
            .users
            .get(&normalize_email(email))
            .map(|entry| entry.value().clone()))
    }
}
