//! Auth handlers: login, logout, me.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::CookieJar;
use validator::Validate;

use warden_auth::{LoginOutcome, LogoutOutcome, MeOutcome};

use crate::cookie::{removal_cookie, session_cookie};
use crate::dto::request::LoginRequest;
use crate::extractors::SessionToken;
use crate::state::AppState;

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    prior: SessionToken,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> (StatusCode, CookieJar, Json<LoginOutcome>) {
    if req.validate().is_err() {
        return (StatusCode::UNAUTHORIZED, jar, Json(LoginOutcome::failed()));
    }

    let mut outcome = state
        .auth
        .login(&req.username, &req.password, prior.as_deref())
        .await;

    match outcome.token.take() {
        Some(token) if outcome.success => {
            let jar = jar.add(session_cookie(
                &state.config.session,
                state.sessions.ttl(),
                token,
            ));
            (StatusCode::OK, jar, Json(outcome))
        }
        _ => (StatusCode::UNAUTHORIZED, jar, Json(outcome)),
    }
}

/// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    token: SessionToken,
    jar: CookieJar,
) -> (CookieJar, Json<LogoutOutcome>) {
    let outcome = state.auth.logout(token.as_deref());
    let jar = jar.add(removal_cookie(&state.config.session));
    (jar, Json(outcome))
}

/// GET /api/auth/me
///
/// Renews the session like any authenticated access; cookie clients get the
/// cookie re-issued.
pub async fn me(
    State(state): State<AppState>,
    token: SessionToken,
    jar: CookieJar,
) -> (StatusCode, CookieJar, Json<MeOutcome>) {
    let outcome = state.auth.me(token.as_deref());
    if !outcome.authenticated {
        return (StatusCode::UNAUTHORIZED, jar, Json(outcome));
    }

    let from_cookie = jar
        .get(&state.config.session.cookie_name)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty());
    let jar = match from_cookie {
        Some(value) => jar.add(session_cookie(
            &state.config.session,
            state.sessions.ttl(),
            value,
        )),
        None => jar,
    };
    (StatusCode::OK, jar, Json(outcome))
}
