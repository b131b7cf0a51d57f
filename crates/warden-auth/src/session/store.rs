//! In-memory session table.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde::Serialize;

use warden_core::types::UserId;

/// An issued session.
#[derive(Clone, Serialize)]
pub struct Session {
    /// Opaque bearer token. Also the table key.
    #[serde(skip_serializing)]
    pub token: String,
    /// Owner of the session.
    pub user_id: UserId,
    /// When the session was issued.
    pub created_at: DateTime<Utc>,
    /// The session is live strictly before this instant.
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Creates a session issued at `now` that lives for `ttl`.
    pub fn new(token: String, user_id: UserId, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            token,
            user_id,
            created_at: now,
            expires_at: deadline(now, ttl),
        }
    }

    /// Returns `true` once `now` has reached `expires_at`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// `now + ttl`, saturating at the latest representable instant.
fn deadline(now: DateTime<Utc>, ttl: Duration) -> DateTime<Utc> {
    now.checked_add_signed(ttl).unwrap_or(DateTime::<Utc>::MAX_UTC)
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &super::token::fingerprint(&self.token))
            .field("user_id", &self.user_id)
            .field("created_at", &self.created_at)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Token-keyed session table.
///
/// Every operation on a single token runs under that key's shard lock, so
/// concurrent validate / destroy / rotate calls on one token are
/// linearizable.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: DashMap<String, Session>,
}

impl SessionStore {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `session` only if its token is not already present.
    pub fn insert_new(&self, session: Session) -> bool {
        match self.sessions.entry(session.token.clone()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(session);
                true
            }
        }
    }

    /// Validates and renews in one step.
    ///
    /// Absent tokens yield `None`. Expired entries are removed and yield
    /// `None`. Live entries get `expires_at = now + ttl`.
    pub fn touch(&self, token: &str, now: DateTime<Utc>, ttl: Duration) -> Option<UserId> {
        {
            let mut session = self.sessions.get_mut(token)?;
            if !session.is_expired(now) {
                session.expires_at = deadline(now, ttl);
                return Some(session.user_id);
            }
        }

        self.sessions.remove_if(token, |_, s| s.is_expired(now));
        None
    }

    /// Non-renewing copy of an entry.
    pub fn get(&self, token: &str) -> Option<Session> {
        self.sessions.get(token).map(|s| s.clone())
    }

    /// Removes an entry. Of several concurrent removers only one gets `Some`.
    pub fn remove(&self, token: &str) -> Option<Session> {
        self.sessions.remove(token).map(|(_, session)| session)
    }

    /// Drops every entry expired at `now`, returning how many were dropped.
    pub fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let mut purged = 0;
        self.sessions.retain(|_, session| {
            let keep = !session.is_expired(now);
            if !keep {
                purged += 1;
            }
            keep
        });
        purged
    }

    /// Number of entries, including expired ones not yet reclaimed.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Returns `true` if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
