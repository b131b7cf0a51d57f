//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section. Every field has a serde default, so an empty source yields a
//! runnable configuration.

pub mod app;
pub mod auth;
pub mod logging;
pub mod sandbox;
pub mod session;

use serde::{Deserialize, Serialize};

pub use self::app::ServerConfig;
pub use self::auth::{AuthConfig, MIN_HASH_MEMORY_KIB, MIN_HASH_WORK, SeedUser};
pub use self::logging::LoggingConfig;
pub use self::sandbox::SandboxConfig;
pub use self::session::{MAX_TTL_MINUTES, SessionConfig};

use crate::error::AppError;
use crate::result::AppResult;

/// Root application configuration.
///
/// Top-level deserialization target for the merged configuration file and
/// `WARDEN_`-prefixed environment variables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Credential hashing and seed users.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Session lifetime and transport settings.
    #[serde(default)]
    pub session: SessionConfig,
    /// Path guard sandbox settings.
    #[serde(default)]
    pub sandbox: SandboxConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file plus the environment.
    ///
    /// The file is optional. Environment variables use the `WARDEN_` prefix
    /// and `__` between nested keys, e.g. `WARDEN_SESSION__TTL_MINUTES=5`.
    pub fn load(path: &str) -> AppResult<Self> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("WARDEN")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let loaded: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        loaded.validate()?;
        Ok(loaded)
    }

    /// Checks cross-field constraints serde cannot express.
    pub fn validate(&self) -> AppResult<()> {
        self.session.ttl()?;
        if self.session.cleanup_enabled && self.session.cleanup_interval_seconds == 0 {
            return Err(AppError::configuration(
                "session.cleanup_interval_seconds must be > 0 when cleanup is enabled",
            ));
        }
        if self.session.cookie_name.trim().is_empty() {
            return Err(AppError::configuration("session.cookie_name must not be empty"));
        }
        if self.sandbox.max_path_length == 0 {
            return Err(AppError::configuration("sandbox.max_path_length must be > 0"));
        }
        if self.auth.hash_parallelism == 0 || self.auth.hash_iterations == 0 {
            return Err(AppError::configuration(
                "auth.hash_iterations and auth.hash_parallelism must be > 0",
            ));
        }
        if !self.auth.meets_work_factor_floor() {
            return Err(AppError::configuration(format!(
                "auth hashing cost is below the minimum: need hash_memory_kib >= {} and \
                 hash_memory_kib * hash_iterations >= {}",
                auth::MIN_HASH_MEMORY_KIB,
                auth::MIN_HASH_WORK
            )));
        }
        Ok(())
    }
}
