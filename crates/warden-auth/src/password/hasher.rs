//! Argon2id password hashing and verification.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use warden_core::config::AuthConfig;
use warden_core::error::AppError;

/// Handles password hashing and verification using Argon2id.
///
/// Hashes are PHC strings that embed the salt and the cost parameters, so
/// verification always re-derives with whatever cost the hash was created
/// under, regardless of the current configuration.
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl std::fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let params = self.argon2.params();
        f.debug_struct("PasswordHasher")
            .field("m_cost", &params.m_cost())
            .field("t_cost", &params.t_cost())
            .field("p_cost", &params.p_cost())
            .finish()
    }
}

impl PasswordHasher {
    /// Creates a hasher using the cost parameters from auth configuration.
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        Self::with_params(
            config.hash_memory_kib,
            config.hash_iterations,
            config.hash_parallelism,
        )
    }

    /// Creates a hasher with explicit Argon2 cost parameters.
    pub fn with_params(memory_kib: u32, iterations: u32, parallelism: u32) -> Result<Self, AppError> {
        let params = Params::new(memory_kib, iterations, parallelism, None).map_err(|e| {
            AppError::configuration(format!("Invalid Argon2 parameters: {e}"))
        })?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hashes a plaintext password using Argon2id with a random salt.
    pub fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

        Ok(hash.to_string())
    }

    /// Verifies a plaintext password against a stored Argon2 hash.
    ///
    /// Returns `Ok(true)` if the password matches, `Ok(false)` if not. The
    /// digest comparison is constant-time.
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::internal(format!("Invalid password hash format: {e}")))?;

        match self.argon2.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::internal(format!(
                "Password verification failed: {e}"
            ))),
        }
    }

    /// Returns `true` if `hash` parses as a PHC string.
    pub fn is_well_formed(hash: &str) -> bool {
        PasswordHash::new(hash).is_ok()
    }

    /// Returns `true` if `hash` is Argon2id under exactly this hasher's
    /// memory, iteration, and parallelism costs.
    ///
    /// Verification cost follows the hash, so a stored hash with other costs
    /// would take measurably different time than the dummy-hash path.
    pub fn uses_current_params(&self, hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(hash) else {
            return false;
        };
        if parsed.algorithm != Algorithm::Argon2id.ident() {
            return false;
        }
        let Ok(embedded) = Params::try_from(&parsed) else {
            return false;
        };
        let current = self.argon2.params();
        embedded.m_cost() == current.m_cost()
            && embedded.t_cost() == current.t_cost()
            && embedded.p_cost() == current.p_cost()
    }
}
