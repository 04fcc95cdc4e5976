// Database Models
//
// Tokio-postgres row mappings for the tables this crate reads.

use tokio_postgres::Row;

use crate::auth::models::Identity;

/// Trait for converting from tokio-postgres Row
pub trait FromRow {
    fn from_row(row: &Row) -> Result<Self, tokio_postgres::Error>
    where
        Self: Sized;
}

/// Row of the `users` table
#[derive(Debug, Clone)]
pub struct UserRow {
    pub id: i32,
    pub email: String,
    pub password_hash: String,
}

impl FromRow for UserRow {
    fn from_row(row: &Row) -> Result<Self, tokio_postgres::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            email: row.try_get("email")?,
            password_hash: row.try_get("password_hash")?,
        })
    }
}

impl From<UserRow> for Identity {
    fn from(row: UserRow) -> Self {
        Identity::new(row.id, &row.email, row.password_hash)
    }
}
