//! User records and password verification.

pub mod store;
pub mod user;

pub use store::CredentialStore;
pub use user::User;
