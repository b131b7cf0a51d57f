//! # warden-core
//!
//! Core crate for Warden. Contains the configuration schema, typed
//! identifiers, the clock abstraction used by session expiry, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other Warden crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
