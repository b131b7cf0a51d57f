//! # warden-storage
//!
//! Sandboxed file access for Warden. Untrusted filenames go through a
//! [`PathGuard`] (syntactic filter, decode and re-check, resolution,
//! containment) before any read or write touches the disk.

pub mod guard;
pub mod providers;
pub mod sample;

pub use guard::{GuardError, GuardedPath, PathGuard, ValidationRule};
pub use providers::local::{FileContent, ReadError, SandboxReader};
