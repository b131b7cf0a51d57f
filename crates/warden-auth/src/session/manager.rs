//! Session lifecycle manager.

use std::sync::Arc;

use chrono::Duration;
use tracing::{debug, info, warn};

use warden_core::config::SessionConfig;
use warden_core::error::AppError;
use warden_core::traits::Clock;
use warden_core::types::UserId;

use super::store::{Session, SessionStore};
use super::token::{fingerprint, generate_token};

/// The one message every unauthenticated request gets, whatever the cause.
pub const NOT_AUTHENTICATED: &str = "Not authenticated";

/// Issues, validates, renews, rotates and revokes sessions.
///
/// A session is live while `now < expires_at`. Every successful validation
/// pushes `expires_at` to `now + ttl`, so activity spaced closer than the
/// TTL keeps a session alive indefinitely.
#[derive(Clone)]
pub struct SessionManager {
    /// Token-keyed session table.
    store: Arc<SessionStore>,
    /// Source of "now".
    clock: Arc<dyn Clock>,
    /// Sliding lifetime.
    ttl: Duration,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("ttl", &self.ttl)
            .field("active", &self.store.len())
            .finish()
    }
}

impl SessionManager {
    /// Creates a manager over an injected table and clock.
    ///
    /// Fails if the configured TTL is zero or out of range.
    pub fn new(
        store: Arc<SessionStore>,
        clock: Arc<dyn Clock>,
        config: &SessionConfig,
    ) -> Result<Self, AppError> {
        Ok(Self {
            store,
            clock,
            ttl: config.ttl()?,
        })
    }

    /// Issues a fresh session for `user_id` and returns its token.
    pub fn create_session(&self, user_id: UserId) -> String {
        loop {
            let token = generate_token();
            let session = Session::new(token.clone(), user_id, self.clock.now(), self.ttl);

            if self.store.insert_new(session) {
                info!(
                    user_id = %user_id,
                    token = fingerprint(&token),
                    "Session created"
                );
                return token;
            }

            warn!("Session token collision, regenerating");
        }
    }

    /// Returns the owner of a live session, renewing it.
    ///
    /// Unknown and expired tokens yield `None`; an expired entry is removed
    /// on the way out.
    pub fn validate(&self, token: &str) -> Option<UserId> {
        let user_id = self.store.touch(token, self.clock.now(), self.ttl);
        if user_id.is_none() {
            debug!(token = fingerprint(token), "Session rejected");
        }
        user_id
    }

    /// Deletes a session. Returns whether an entry was removed.
    pub fn destroy_session(&self, token: &str) -> bool {
        match self.store.remove(token) {
            Some(session) => {
                info!(
                    user_id = %session.user_id,
                    token = fingerprint(token),
                    "Session destroyed"
                );
                true
            }
            None => false,
        }
    }

    /// Invalidates `old` (if any) and issues a replacement for `user_id`.
    ///
    /// The old token is gone before the new one exists, so no request can
    /// observe both as live.
    pub fn rotate_session(&self, old: Option<&str>, user_id: UserId) -> String {
        if let Some(old) = old {
            self.destroy_session(old);
        }
        self.create_session(user_id)
    }

    /// Gate for protected operations.
    pub fn require_auth(&self, token: Option<&str>) -> Result<UserId, AppError> {
        token
            .and_then(|t| self.validate(t))
            .ok_or_else(|| AppError::unauthenticated(NOT_AUTHENTICATED))
    }

    /// Removes every expired session. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        self.store.purge_expired(self.clock.now())
    }

    /// Entries currently in the table.
    pub fn active_sessions(&self) -> usize {
        self.store.len()
    }

    /// The sliding lifetime.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

#[cfg(test)]
mod tests {
    use warden_core::ErrorKind;
    use warden_core::traits::ManualClock;

    use super::*;

    const ALICE: UserId = UserId::new(1);

    fn manager() -> (SessionManager, Arc<ManualClock>, Arc<SessionStore>) {
        let clock = Arc::new(ManualClock::default());
        let store = Arc::new(SessionStore::new());
        let manager = SessionManager::new(
            Arc::clone(&store),
            clock.clone(),
            &SessionConfig::default(),
        )
        .unwrap();
        (manager, clock, store)
    }

    #[test]
    fn test_out_of_range_ttl_is_a_configuration_error() {
        let config = SessionConfig {
            ttl_minutes: 1_000_000_000_000,
            ..SessionConfig::default()
        };
        let err = SessionManager::new(
            Arc::new(SessionStore::new()),
            Arc::new(ManualClock::default()),
            &config,
        )
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }

    #[test]
    fn test_fresh_token_is_valid() {
        let (manager, _, _) = manager();
        let token = manager.create_session(ALICE);
        assert_eq!(manager.validate(&token), Some(ALICE));
        assert_eq!(manager.ttl(), Duration::minutes(30));
    }

    #[test]
    fn test_expires_without_activity() {
        let (manager, clock, store) = manager();
        let token = manager.create_session(ALICE);

        clock.advance(Duration::minutes(31));
        assert_eq!(manager.validate(&token), None);
        assert!(store.is_empty());
        assert_eq!(manager.validate(&token), None);
    }

    #[test]
    fn test_expiry_boundary() {
        let (manager, clock, _) = manager();
        let token = manager.create_session(ALICE);

        clock.advance(Duration::minutes(30) - Duration::milliseconds(1));
        assert_eq!(manager.validate(&token), Some(ALICE));

        let other = manager.create_session(ALICE);
        clock.advance(Duration::minutes(30));
        assert_eq!(manager.validate(&other), None);
    }

    #[test]
    fn test_sliding_renewal_keeps_session_alive() {
        let (manager, clock, _) = manager();
        let token = manager.create_session(ALICE);

        for _ in 0..20 {
            clock.advance(Duration::minutes(29));
            assert_eq!(manager.validate(&token), Some(ALICE));
        }

        clock.advance(Duration::minutes(30));
        assert_eq!(manager.validate(&token), None);
    }

    #[test]
    fn test_rotation_invalidates_old_token() {
        let (manager, _, _) = manager();
        let old = manager.create_session(ALICE);
        let new = manager.rotate_session(Some(&old), ALICE);

        assert_ne!(old, new);
        assert_eq!(manager.validate(&old), None);
        assert_eq!(manager.validate(&new), Some(ALICE));
        assert_eq!(manager.active_sessions(), 1);
    }

    #[test]
    fn test_rotation_without_prior_token() {
        let (manager, _, _) = manager();
        let token = manager.rotate_session(None, ALICE);
        assert_eq!(manager.validate(&token), Some(ALICE));
    }

    #[test]
    fn test_destroy() {
        let (manager, _, _) = manager();
        let token = manager.create_session(ALICE);
        assert!(manager.destroy_session(&token));
        assert!(!manager.destroy_session(&token));
        assert!(!manager.destroy_session("never-issued"));
        assert_eq!(manager.validate(&token), None);
    }

    #[test]
    fn test_require_auth_uniform_error() {
        let (manager, clock, _) = manager();
        let token = manager.create_session(ALICE);
        assert_eq!(manager.require_auth(Some(&token)).unwrap(), ALICE);

        let expired = manager.create_session(ALICE);
        clock.advance(Duration::hours(1));

        for presented in [None, Some("garbage"), Some(expired.as_str())] {
            let err = manager.require_auth(presented).unwrap_err();
            assert_eq!(err.kind, ErrorKind::Unauthenticated);
            assert_eq!(err.message, NOT_AUTHENTICATED);
        }
    }

    #[test]
    fn test_purge_expired() {
        let (manager, clock, store) = manager();
        manager.create_session(ALICE);
        manager.create_session(UserId::new(2));
        clock.advance(Duration::minutes(31));
        let survivor = manager.create_session(ALICE);

        assert_eq!(manager.purge_expired(), 2);
        assert_eq!(store.len(), 1);
        assert!(store.get(&survivor).is_some());
    }

    #[test]
    fn test_concurrent_validate_and_destroy() {
        let (manager, _, _) = manager();
        let token = manager.create_session(ALICE);

        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    for _ in 0..100 {
                        manager.validate(&token);
                    }
                });
            }
            scope.spawn(|| manager.destroy_session(&token));
        });

        assert_eq!(manager.validate(&token), None);
        assert_eq!(manager.active_sessions(), 0);
    }
}
