//! # warden-api
//!
//! HTTP API layer for Warden built on Axum.
//!
//! A thin collaborator over `warden-auth` and `warden-storage`: it extracts
//! the presented session token, calls into the core, and maps verdicts onto
//! status codes and cookies.

pub mod app;
pub mod cookie;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use state::AppState;
