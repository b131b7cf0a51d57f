//! # warden-auth
//!
//! Credential verification and the complete session lifecycle for Warden.
//!
//! ## Modules
//!
//! - `password`: Argon2id password hashing and verification
//! - `credential`: Seeded user records and timing-uniform password checks
//! - `session`: Token issuance, sliding renewal, rotation, revocation, reclamation
//! - `service`: The login / logout / me flows consumed by the HTTP layer

pub mod credential;
pub mod password;
pub mod service;
pub mod session;

pub use credential::{CredentialStore, User};
pub use password::PasswordHasher;
pub use service::{AuthService, LoginOutcome, LogoutOutcome, MeOutcome};
pub use session::{Session, SessionCleanup, SessionManager, SessionStore};
