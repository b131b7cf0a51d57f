//! Session extractors: the raw presented token and the authenticated user.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use warden_core::types::UserId;

use crate::cookie::presented_token;
use crate::error::ApiError;
use crate::state::AppState;

/// The session token presented with the request, if any. Never rejects.
#[derive(Debug, Clone)]
pub struct SessionToken(pub Option<String>);

impl SessionToken {
    /// Borrow the token.
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl FromRequestParts<AppState> for SessionToken {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(presented_token(
            &parts.headers,
            &state.config.session.cookie_name,
        )))
    }
}

/// The owner of a live session. Extraction renews the session.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Session owner.
    pub user_id: UserId,
    /// Session owner's login name.
    pub username: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Already resolved by `require_session`.
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(user.clone());
        }

        let token = presented_token(&parts.headers, &state.config.session.cookie_name);
        let user = state.auth.current_user(token.as_deref())?;

        Ok(AuthUser {
            user_id: user.id,
            username: user.username,
        })
    }
}
