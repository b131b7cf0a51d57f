//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use warden_auth::{AuthService, CredentialStore, PasswordHasher, SessionManager, SessionStore};
use warden_core::config::AppConfig;
use warden_core::error::AppError;
use warden_core::traits::{Clock, SystemClock};
use warden_storage::SandboxReader;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Login / logout / me flows
    pub auth: Arc<AuthService>,
    /// Session lifecycle manager
    pub sessions: Arc<SessionManager>,
    /// Guarded sandbox file access
    pub files: Arc<SandboxReader>,
}

impl AppState {
    /// Wires every component from configuration using the system clock.
    pub fn from_config(config: AppConfig) -> Result<Self, AppError> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Wires every component from configuration with an explicit clock.
    pub fn with_clock(config: AppConfig, clock: Arc<dyn Clock>) -> Result<Self, AppError> {
        let hasher = PasswordHasher::new(&config.auth)?;
        let credentials = Arc::new(CredentialStore::from_seed(&config.auth.seed_users, hasher)?);

        let sessions = Arc::new(SessionManager::new(
            Arc::new(SessionStore::new()),
            clock,
            &config.session,
        )?);

        let auth = Arc::new(AuthService::new(
            credentials,
            Arc::clone(&sessions),
            &config.auth,
        ));

        let files = Arc::new(SandboxReader::from_config(&config.sandbox)?);

        Ok(Self {
            config: Arc::new(config),
            auth,
            sessions,
            files,
        })
    }
}
