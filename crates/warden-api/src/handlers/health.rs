//! Health check handler.

use axum::Json;

use crate::dto::response::HealthResponse;

/// GET /api/health
///
/// Unauthenticated, so it reports liveness only.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
