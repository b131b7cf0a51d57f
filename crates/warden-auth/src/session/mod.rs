//! Session lifecycle: issuance, sliding renewal, rotation, revocation and
//! background reclamation of expired entries.

pub mod cleanup;
pub mod manager;
pub mod store;
pub mod token;

pub use cleanup::SessionCleanup;
pub use manager::{NOT_AUTHENTICATED, SessionManager};
pub use store::{Session, SessionStore};
