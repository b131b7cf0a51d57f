//! Response DTOs.

use serde::{Deserialize, Serialize};

use warden_core::types::UserId;

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"` when the server answers.
    pub status: String,
    /// Crate version.
    pub version: String,
}

/// Protected profile response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    /// Session owner's id.
    pub user_id: UserId,
    /// Session owner's login name.
    pub username: String,
}
