//! Periodic reclamation of expired sessions.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time;
use tracing::{debug, info};

use warden_core::config::SessionConfig;

use super::manager::SessionManager;

/// Background task that purges expired sessions on a fixed interval.
///
/// Only reclaims memory. Validation already rejects expired tokens on
/// access, so correctness never depends on this task running.
#[derive(Debug, Clone)]
pub struct SessionCleanup {
    /// Manager whose table is swept.
    manager: Arc<SessionManager>,
    /// Time between sweeps.
    interval: Duration,
}

impl SessionCleanup {
    /// Creates a cleanup task using the configured interval.
    pub fn new(manager: Arc<SessionManager>, config: &SessionConfig) -> Self {
        Self::with_interval(
            manager,
            Duration::from_secs(config.cleanup_interval_seconds),
        )
    }

    /// Creates a cleanup task with an explicit interval.
    pub fn with_interval(manager: Arc<SessionManager>, interval: Duration) -> Self {
        Self { manager, interval }
    }

    /// Runs one sweep. Returns the number of sessions removed.
    pub fn run_cleanup(&self) -> usize {
        let purged = self.manager.purge_expired();
        if purged > 0 {
            info!(
                purged = purged,
                remaining = self.manager.active_sessions(),
                "Expired sessions purged"
            );
        } else {
            debug!("Session sweep found nothing to purge");
        }
        purged
    }

    /// Sweeps until `cancel` flips to `true`.
    pub async fn run(&self, mut cancel: watch::Receiver<bool>) {
        info!(
            interval_secs = self.interval.as_secs(),
            "Session cleanup started"
        );

        let mut interval = time::interval(self.interval);
        interval.set_missed_tick_behavior(time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    self.run_cleanup();
                }
                changed = cancel.changed() => {
                    if changed.is_err() || *cancel.borrow() {
                        info!("Session cleanup shutting down");
                        break;
                    }
                }
            }
        }
    }

    /// Spawns [`run`](Self::run) onto the current runtime.
    pub fn spawn(self, cancel: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(async move { self.run(cancel).await })
    }
}
