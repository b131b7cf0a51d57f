//! Session token transport: cookie issuance, renewal, removal, and lookup.

use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, HeaderValue};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::{Authorization, HeaderMapExt};

use warden_core::config::SessionConfig;

/// Builds the cookie carrying a session token, living for `ttl`.
///
/// Issued on login and again on every renewing access, so the browser copy
/// slides together with the server-side expiry.
pub fn session_cookie(
    config: &SessionConfig,
    ttl: chrono::Duration,
    token: String,
) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), token))
        .http_only(true)
        .secure(config.cookie_secure)
        .same_site(SameSite::Strict)
        .path("/")
        .max_age(time::Duration::seconds(ttl.num_seconds()))
        .build()
}

/// Builds an already-expired cookie that makes the browser drop the token.
pub fn removal_cookie(config: &SessionConfig) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), ""))
        .http_only(true)
        .secure(config.cookie_secure)
        .same_site(SameSite::Strict)
        .path("/")
        .max_age(time::Duration::ZERO)
        .build()
}

/// The token carried in the session cookie, if set and non-empty.
pub fn cookie_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    CookieJar::from_headers(headers)
        .get(cookie_name)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}

/// The token the client presented: the session cookie if set, otherwise an
/// `Authorization: Bearer` header.
pub fn presented_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    cookie_token(headers, cookie_name).or_else(|| {
        headers
            .typed_get::<Authorization<Bearer>>()
            .map(|auth| auth.token().to_string())
    })
}

/// Appends a `Set-Cookie` header for `cookie` to `headers`.
pub fn append_cookie(headers: &mut HeaderMap, cookie: &Cookie<'_>) {
    match HeaderValue::from_str(&cookie.to_string()) {
        Ok(value) => {
            headers.append(SET_COOKIE, value);
        }
        Err(e) => tracing::error!(error = %e, "Session cookie is not a valid header value"),
    }
}
