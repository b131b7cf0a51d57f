//! Sandboxed file handlers.

use axum::Json;
use axum::extract::{Query, State};
use tracing::warn;

use warden_storage::{FileContent, ReadError};

use crate::dto::request::FileReadQuery;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/files/read?filename=
pub async fn read_file(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<FileReadQuery>,
) -> Result<Json<FileContent>, ApiError> {
    match state.files.read_file(&query.filename).await {
        Ok(file) => Ok(Json(file)),
        Err(err) => {
            if matches!(err, ReadError::TraversalDetected | ReadError::ValidationFailed(_)) {
                warn!(
                    user_id = %user.user_id,
                    filename = ?query.filename,
                    error = %err,
                    "Rejected sandbox file request"
                );
            }
            Err(err.into())
        }
    }
}
