//! Read-only credential store built from the configured seed list.

use std::collections::HashMap;

use argon2::password_hash::{SaltString, rand_core::OsRng};
use tracing::{error, info};

use warden_core::config::SeedUser;
use warden_core::error::AppError;
use warden_core::types::UserId;

use crate::password::PasswordHasher;

use super::user::User;

/// Authoritative source of user identity and password verification.
///
/// Built once at startup and never mutated, so it can be shared across
/// request tasks behind an `Arc` without locking.
pub struct CredentialStore {
    /// Users keyed by exact username.
    users: HashMap<String, User>,
    /// Username index by id.
    ids: HashMap<UserId, String>,
    /// Hasher used for seeding and for the dummy hash.
    hasher: PasswordHasher,
    /// Hash of a random throwaway password, verified against when the
    /// username is unknown so both failure paths cost one Argon2 run.
    dummy_hash: String,
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("users", &self.users.len())
            .field("hasher", &self.hasher)
            .finish()
    }
}

impl CredentialStore {
    /// Builds the store from seed entries, hashing plaintext passwords.
    ///
    /// Ids are assigned in seed order starting at 1. Fails on empty or
    /// duplicate usernames and on entries that do not carry exactly one of
    /// `password` / `password_hash`, and on precomputed hashes whose Argon2
    /// costs differ from `hasher`'s.
    pub fn from_seed(seed: &[SeedUser], hasher: PasswordHasher) -> Result<Self, AppError> {
        let mut users = HashMap::with_capacity(seed.len());
        let mut ids = HashMap::with_capacity(seed.len());

        for (index, entry) in seed.iter().enumerate() {
            if entry.username.is_empty() {
                return Err(AppError::configuration(format!(
                    "Seed user #{} has an empty username",
                    index + 1
                )));
            }
            if users.contains_key(&entry.username) {
                return Err(AppError::configuration(format!(
                    "Duplicate seed username: {}",
                    entry.username
                )));
            }

            let password_hash = match (&entry.password, &entry.password_hash) {
                (Some(password), None) => hasher.hash_password(password)?,
                (None, Some(hash)) if hasher.uses_current_params(hash) => hash.clone(),
                (None, Some(hash)) if PasswordHasher::is_well_formed(hash) => {
                    return Err(AppError::configuration(format!(
                        "Seed user '{}' has a password_hash with different Argon2 parameters \
                         than auth.hash_*; regenerate it with `warden hash-password`",
                        entry.username
                    )));
                }
                (None, Some(_)) => {
                    return Err(AppError::configuration(format!(
                        "Seed user '{}' has a malformed password_hash",
                        entry.username
                    )));
                }
                _ => {
                    return Err(AppError::configuration(format!(
                        "Seed user '{}' must set exactly one of password or password_hash",
                        entry.username
                    )));
                }
            };

            let id = UserId::new(index as u64 + 1);
            ids.insert(id, entry.username.clone());
            users.insert(
                entry.username.clone(),
                User {
                    id,
                    username: entry.username.clone(),
                    password_hash,
                },
            );
        }

        let throwaway = SaltString::generate(&mut OsRng);
        let dummy_hash = hasher.hash_password(throwaway.as_str())?;

        info!(count = users.len(), "Credential store seeded");

        Ok(Self {
            users,
            ids,
            hasher,
            dummy_hash,
        })
    }

    /// Exact, case-sensitive username lookup.
    pub fn find_by_username(&self, username: &str) -> Option<&User> {
        self.users.get(username)
    }

    /// Looks a user up by id.
    pub fn find_by_id(&self, id: UserId) -> Option<&User> {
        self.ids.get(&id).and_then(|name| self.users.get(name))
    }

    /// Verifies `candidate` for `user`, running one Argon2 verification
    /// whether or not the user exists.
    ///
    /// Never errors: malformed hashes and hasher failures are logged and
    /// reported as `false`.
    pub fn verify_password(&self, user: Option<&User>, candidate: &str) -> bool {
        let hash = user.map_or(self.dummy_hash.as_str(), |u| u.password_hash.as_str());

        let matched = match self.hasher.verify_password(candidate, hash) {
            Ok(matched) => matched,
            Err(e) => {
                error!(
                    user_id = ?user.map(|u| u.id),
                    error = %e,
                    "Password verification error"
                );
                false
            }
        };

        matched && user.is_some()
    }

    /// Single-path credential check: lookup, then verify unconditionally.
    pub fn authenticate(&self, username: &str, candidate: &str) -> Option<User> {
        let user = self.find_by_username(username);
        if self.verify_password(user, candidate) {
            user.cloned()
        } else {
            None
        }
    }

    /// Number of provisioned users.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Returns `true` if no users are provisioned.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
