//! Session gate for protected routes.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::cookie::{append_cookie, cookie_token, presented_token, session_cookie};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// Rejects requests without a live session with 401 `UNAUTHENTICATED`.
///
/// On success the session is renewed and the resolved [`AuthUser`] is
/// stored in request extensions for handlers to pick up. Cookie clients get
/// the cookie re-issued with a fresh `Max-Age`.
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let cookie_name = &state.config.session.cookie_name;
    let token = presented_token(request.headers(), cookie_name);
    let user = state.auth.current_user(token.as_deref())?;
    let cookie = cookie_token(request.headers(), cookie_name);

    request.extensions_mut().insert(AuthUser {
        user_id: user.id,
        username: user.username,
    });

    let mut response = next.run(request).await;

    if let Some(token) = cookie {
        let renewed = session_cookie(&state.config.session, state.sessions.ttl(), token);
        append_cookie(response.headers_mut(), &renewed);
    }

    Ok(response)
}
