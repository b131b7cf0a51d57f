//! Session management configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::result::AppResult;

/// Session lifetime, reclamation, and cookie transport configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Sliding TTL in minutes. Each authenticated access pushes expiry out by this much.
    #[serde(default = "default_ttl")]
    pub ttl_minutes: u64,
    /// Whether the background reclamation task runs.
    #[serde(default = "default_true")]
    pub cleanup_enabled: bool,
    /// Interval between reclamation passes in seconds.
    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval_seconds: u64,
    /// Name of the cookie carrying the session token.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Mark the cookie `Secure`. Only disable for plaintext local testing.
    #[serde(default = "default_true")]
    pub cookie_secure: bool,
}

/// Longest accepted session TTL: one year.
pub const MAX_TTL_MINUTES: u64 = 525_600;

impl SessionConfig {
    /// The configured TTL as a `chrono::Duration`.
    ///
    /// Fails for zero or for anything above [`MAX_TTL_MINUTES`].
    pub fn ttl(&self) -> AppResult<chrono::Duration> {
        if self.ttl_minutes == 0 || self.ttl_minutes > MAX_TTL_MINUTES {
            return Err(AppError::configuration(format!(
                "session.ttl_minutes must be between 1 and {MAX_TTL_MINUTES}"
            )));
        }
        i64::try_from(self.ttl_minutes)
            .ok()
            .and_then(chrono::Duration::try_minutes)
            .ok_or_else(|| AppError::configuration("session.ttl_minutes is out of range"))
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_minutes: default_ttl(),
            cleanup_enabled: true,
            cleanup_interval_seconds: default_cleanup_interval(),
            cookie_name: default_cookie_name(),
            cookie_secure: true,
        }
    }
}

fn default_ttl() -> u64 {
    30
}

fn default_cleanup_interval() -> u64 {
    60
}

fn default_cookie_name() -> String {
    "session_token".to_string()
}

fn default_true() -> bool {
    true
}
