//! Login, logout and identity flows built on the credential store and the
//! session manager.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use warden_core::config::AuthConfig;
use warden_core::error::AppError;

use crate::credential::{CredentialStore, User};
use crate::session::{NOT_AUTHENTICATED, SessionManager};

/// The only message a failed login ever produces.
pub const LOGIN_FAILED: &str = "Invalid username or password";

/// Message returned with a successful login.
pub const LOGIN_SUCCEEDED: &str = "Login successful";

/// Result of a login attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginOutcome {
    /// Whether a session was issued.
    pub success: bool,
    /// The new session token. Delivered out of band (cookie), never in the body.
    #[serde(skip_serializing, default)]
    pub token: Option<String>,
    /// Human-readable result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl LoginOutcome {
    /// The generic failure outcome.
    pub fn failed() -> Self {
        Self {
            success: false,
            token: None,
            message: Some(LOGIN_FAILED.to_string()),
        }
    }
}

/// Result of a logout. Always successful.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutOutcome {
    /// Always `true`.
    pub success: bool,
}

/// Identity of the presented session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeOutcome {
    /// Whether the presented token names a live session.
    pub authenticated: bool,
    /// Username of the session owner.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// Orchestrates the authentication flows consumed by the HTTP layer.
#[derive(Debug, Clone)]
pub struct AuthService {
    /// Seeded users.
    credentials: Arc<CredentialStore>,
    /// Session lifecycle.
    sessions: Arc<SessionManager>,
    /// Upper bound on username and password length.
    max_credential_length: usize,
}

impl AuthService {
    /// Creates the service.
    pub fn new(
        credentials: Arc<CredentialStore>,
        sessions: Arc<SessionManager>,
        config: &AuthConfig,
    ) -> Self {
        Self {
            credentials,
            sessions,
            max_credential_length: config.max_credential_length,
        }
    }

    /// The session manager backing this service.
    pub fn sessions(&self) -> &Arc<SessionManager> {
        &self.sessions
    }

    /// The credential store backing this service.
    pub fn credentials(&self) -> &Arc<CredentialStore> {
        &self.credentials
    }

    /// Verifies credentials and, on success, rotates `prior_token` out and
    /// issues a new session.
    ///
    /// Unknown user, wrong password and oversized input all produce the
    /// same outcome and message.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        prior_token: Option<&str>,
    ) -> LoginOutcome {
        if username.len() > self.max_credential_length
            || password.len() > self.max_credential_length
        {
            warn!("Login rejected: oversized credentials");
            return LoginOutcome::failed();
        }

        let credentials = Arc::clone(&self.credentials);
        let (name, candidate) = (username.to_string(), password.to_string());
        let verified =
            tokio::task::spawn_blocking(move || credentials.authenticate(&name, &candidate)).await;

        let user = match verified {
            Ok(Some(user)) => user,
            Ok(None) => {
                warn!(username = %username, "Login failed");
                return LoginOutcome::failed();
            }
            Err(e) => {
                error!(error = %e, "Credential verification task failed");
                return LoginOutcome::failed();
            }
        };

        let token = self.sessions.rotate_session(prior_token, user.id);
        info!(user_id = %user.id, username = %user.username, "Login succeeded");

        LoginOutcome {
            success: true,
            token: Some(token),
            message: Some(LOGIN_SUCCEEDED.to_string()),
        }
    }

    /// Destroys the presented session, if any.
    pub fn logout(&self, token: Option<&str>) -> LogoutOutcome {
        if let Some(token) = token {
            self.sessions.destroy_session(token);
        }
        LogoutOutcome { success: true }
    }

    /// Reports who owns the presented session, renewing it.
    pub fn me(&self, token: Option<&str>) -> MeOutcome {
        match self.current_user(token) {
            Ok(user) => MeOutcome {
                authenticated: true,
                username: Some(user.username),
            },
            Err(_) => MeOutcome {
                authenticated: false,
                username: None,
            },
        }
    }

    /// Resolves the presented session to its user, renewing it.
    pub fn current_user(&self, token: Option<&str>) -> Result<User, AppError> {
        let user_id = self.sessions.require_auth(token)?;
        self.credentials
            .find_by_id(user_id)
            .cloned()
            .ok_or_else(|| AppError::unauthenticated(NOT_AUTHENTICATED))
    }
}
