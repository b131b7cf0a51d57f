//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Credential hashing and user seeding configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Argon2 memory cost in KiB.
    #[serde(default = "default_memory_kib")]
    pub hash_memory_kib: u32,
    /// Argon2 iteration count (time cost).
    #[serde(default = "default_iterations")]
    pub hash_iterations: u32,
    /// Argon2 lanes.
    #[serde(default = "default_parallelism")]
    pub hash_parallelism: u32,
    /// Longest username or password accepted before hashing is attempted.
    #[serde(default = "default_max_credential_length")]
    pub max_credential_length: usize,
    /// Users provisioned at startup. Ids are assigned in list order from 1.
    #[serde(default = "default_seed_users")]
    pub seed_users: Vec<SeedUser>,
}

/// A user provisioned from configuration.
///
/// Exactly one of `password` (hashed at startup) or `password_hash`
/// (a PHC string, e.g. from `warden hash-password`) must be set.
#[derive(Clone, Serialize, Deserialize)]
pub struct SeedUser {
    /// Login name. Case-sensitive.
    pub username: String,
    /// Plaintext password.
    #[serde(default, skip_serializing)]
    pub password: Option<String>,
    /// Precomputed Argon2 PHC hash.
    #[serde(default)]
    pub password_hash: Option<String>,
}

impl SeedUser {
    /// Seed entry with a plaintext password.
    pub fn with_password(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: Some(password.into()),
            password_hash: None,
        }
    }
}

impl std::fmt::Debug for SeedUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeedUser")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("password_hash", &self.password_hash.is_some())
            .finish()
    }
}

/// Smallest accepted Argon2 memory cost in KiB.
pub const MIN_HASH_MEMORY_KIB: u32 = 7_168;

/// Smallest accepted product of memory cost (KiB) and iterations.
///
/// Matches the weakest of the OWASP Argon2id profiles (7 MiB, 5 passes).
pub const MIN_HASH_WORK: u64 = 35_840;

impl AuthConfig {
    /// Returns `true` if the configured Argon2 cost is at or above the floor.
    pub fn meets_work_factor_floor(&self) -> bool {
        self.hash_memory_kib >= MIN_HASH_MEMORY_KIB
            && u64::from(self.hash_memory_kib) * u64::from(self.hash_iterations) >= MIN_HASH_WORK
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            hash_memory_kib: default_memory_kib(),
            hash_iterations: default_iterations(),
            hash_parallelism: default_parallelism(),
            max_credential_length: default_max_credential_length(),
            seed_users: default_seed_users(),
        }
    }
}

fn default_memory_kib() -> u32 {
    19_456 // 19 MiB
}

fn default_iterations() -> u32 {
    2
}

fn default_parallelism() -> u32 {
    1
}

fn default_max_credential_length() -> usize {
    1024
}

fn default_seed_users() -> Vec<SeedUser> {
    vec![
        SeedUser::with_password("alice", "password123"),
        SeedUser::with_password("bob", "hunter2"),
    ]
}
