//! The user identity record.

use serde::Serialize;

use warden_core::types::UserId;

/// A provisioned user. Immutable once the credential store is built.
#[derive(Clone, Serialize)]
pub struct User {
    /// Unique identifier.
    pub id: UserId,
    /// Unique, case-sensitive login name.
    pub username: String,
    /// Argon2 PHC string (salt and work factor embedded).
    #[serde(skip_serializing)]
    pub password_hash: String,
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}
