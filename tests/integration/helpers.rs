//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::header::{AUTHORIZATION, CONTENT_TYPE, COOKIE, SET_COOKIE};
use http::{HeaderMap, Request, StatusCode};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use warden_api::AppState;
use warden_core::config::AppConfig;
use warden_core::traits::ManualClock;
use warden_storage::sample::setup_sample;

/// Cookie name used by the default configuration.
pub const COOKIE_NAME: &str = "session_token";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared state, for inspecting sessions directly
    pub state: AppState,
    /// Clock driving session expiry
    pub clock: Arc<ManualClock>,
    /// Sandbox directory, removed on drop
    pub sandbox: TempDir,
}

impl TestApp {
    /// Create a new test application with a seeded sandbox.
    pub async fn new() -> Self {
        let sandbox = tempfile::tempdir().expect("Failed to create sandbox dir");

        let mut config = AppConfig::default();
        config.auth.hash_memory_kib = 256;
        config.auth.hash_iterations = 1;
        config.auth.hash_parallelism = 1;
        config.session.cleanup_enabled = false;
        config.sandbox.base_dir = sandbox.path().to_string_lossy().into_owned();

        let clock = Arc::new(ManualClock::default());
        let state =
            AppState::with_clock(config, clock.clone()).expect("Failed to build app state");

        setup_sample(&state.files)
            .await
            .expect("Failed to write sample files");

        let router = warden_api::build_app(state.clone());

        Self {
            router,
            state,
            clock,
            sandbox,
        }
    }

    /// Login and return the session token from the `Set-Cookie` header.
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .post_login(
                serde_json::json!({ "username": username, "password": password }),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response
            .session_cookie()
            .expect("No session cookie in login response")
    }

    /// POST /api/auth/login, optionally presenting an existing session cookie.
    pub async fn post_login(&self, body: Value, cookie: Option<&str>) -> TestResponse {
        self.request("POST", "/api/auth/login", Some(body), cookie)
            .await
    }

    /// Make an HTTP request, presenting `cookie` as the session cookie.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        cookie: Option<&str>,
    ) -> TestResponse {
        let mut req = Request::builder().method(method).uri(path);
        if let Some(token) = cookie {
            req = req.header(COOKIE, format!("{COOKIE_NAME}={token}"));
        }
        self.send(req, body).await
    }

    /// Make an HTTP request, presenting `token` as a bearer token.
    pub async fn request_bearer(&self, method: &str, path: &str, token: &str) -> TestResponse {
        let req = Request::builder()
            .method(method)
            .uri(path)
            .header(AUTHORIZATION, format!("Bearer {token}"));
        self.send(req, None).await
    }

    async fn send(&self, req: http::request::Builder, body: Option<Value>) -> TestResponse {
        let req = match body {
            Some(body) => req
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(
                    serde_json::to_string(&body).expect("Failed to serialize body"),
                )),
            None => req.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// Raw `Set-Cookie` header for the session cookie, if any.
    pub fn set_cookie(&self) -> Option<String> {
        self.headers
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with(&format!("{COOKIE_NAME}=")))
            .map(str::to_string)
    }

    /// Value of the session cookie set by this response, if any.
    pub fn session_cookie(&self) -> Option<String> {
        let header = self.set_cookie()?;
        let pair = header.split(';').next()?;
        let (_, value) = pair.split_once('=')?;
        Some(value.to_string()).filter(|v| !v.is_empty())
    }
}
