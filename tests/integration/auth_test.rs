//! Integration tests for the login, logout and identity flows.

use http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_login_success_sets_hardened_cookie() {
    let app = TestApp::new().await;

    let response = app
        .post_login(json!({ "username": "alice", "password": "password123" }), None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        json!({ "success": true, "message": "Login successful" })
    );

    let cookie = response.set_cookie().expect("session cookie");
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Secure"));
    assert!(cookie.contains("SameSite=Strict"));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("Max-Age=1800"));

    let token = response.session_cookie().expect("token");
    assert_eq!(token.len(), 43);
    assert!(!response.body.to_string().contains(&token));
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::new().await;
    let attempts = [
        json!({ "username": "alice", "password": "wrong" }),
        json!({ "username": "nobody", "password": "password123" }),
        json!({ "username": "Alice", "password": "password123" }),
        json!({ "username": "", "password": "" }),
        json!({ "username": "alice", "password": "x".repeat(2048) }),
    ];

    for body in attempts {
        let response = app.post_login(body, None).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.body,
            json!({ "success": false, "message": "Invalid username or password" })
        );
        assert!(response.set_cookie().is_none());
    }
    assert_eq!(app.state.sessions.active_sessions(), 0);
}

#[tokio::test]
async fn test_login_rotates_presented_session() {
    let app = TestApp::new().await;
    let first = app.login("alice", "password123").await;

    let response = app
        .post_login(
            json!({ "username": "alice", "password": "password123" }),
            Some(&first),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let second = response.session_cookie().expect("new token");

    assert_ne!(first, second);
    assert_eq!(app.state.sessions.active_sessions(), 1);

    let stale = app.request("GET", "/api/auth/me", None, Some(&first)).await;
    assert_eq!(stale.status, StatusCode::UNAUTHORIZED);
    let fresh = app.request("GET", "/api/auth/me", None, Some(&second)).await;
    assert_eq!(fresh.status, StatusCode::OK);
}

#[tokio::test]
async fn test_me() {
    let app = TestApp::new().await;

    let anonymous = app.request("GET", "/api/auth/me", None, None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);
    assert_eq!(anonymous.body, json!({ "authenticated": false }));

    let forged = app
        .request("GET", "/api/auth/me", None, Some("not-a-real-token"))
        .await;
    assert_eq!(forged.status, StatusCode::UNAUTHORIZED);

    let token = app.login("bob", "hunter2").await;
    let me = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body, json!({ "authenticated": true, "username": "bob" }));
}

#[tokio::test]
async fn test_bearer_token_is_accepted() {
    let app = TestApp::new().await;
    let token = app.login("bob", "hunter2").await;

    let me = app.request_bearer("GET", "/api/auth/me", &token).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["username"], "bob");
}

#[tokio::test]
async fn test_logout_invalidates_session() {
    let app = TestApp::new().await;
    let token = app.login("alice", "password123").await;

    let response = app
        .request("POST", "/api/auth/logout", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "success": true }));

    let cleared = response.set_cookie().expect("removal cookie");
    assert!(cleared.contains("Max-Age=0"));
    assert!(response.session_cookie().is_none());

    let me = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(me.status, StatusCode::UNAUTHORIZED);
    assert_eq!(app.state.sessions.active_sessions(), 0);
}

#[tokio::test]
async fn test_logout_without_session_succeeds() {
    let app = TestApp::new().await;

    let response = app.request("POST", "/api/auth/logout", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "success": true }));
    assert!(response.set_cookie().is_some());
}

#[tokio::test]
async fn test_profile_requires_session() {
    let app = TestApp::new().await;

    let anonymous = app.request("GET", "/api/profile", None, None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);
    assert_eq!(anonymous.body["error"], "UNAUTHENTICATED");
    assert_eq!(anonymous.body["message"], "Not authenticated");

    let token = app.login("alice", "password123").await;
    let profile = app.request("GET", "/api/profile", None, Some(&token)).await;
    assert_eq!(profile.status, StatusCode::OK);
    assert_eq!(profile.body, json!({ "user_id": 1, "username": "alice" }));
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;
    app.login("alice", "password123").await;

    let health = app.request("GET", "/api/health", None, None).await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body["status"], "ok");
    assert!(health.body.get("active_sessions").is_none());
}
