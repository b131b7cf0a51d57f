//! Protected profile handler.

use axum::Json;

use crate::dto::response::ProfileResponse;
use crate::extractors::AuthUser;

/// GET /api/profile
pub async fn profile(user: AuthUser) -> Json<ProfileResponse> {
    Json(ProfileResponse {
        user_id: user.user_id,
        username: user.username,
    })
}
