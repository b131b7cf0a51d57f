//! Integration tests for sliding session expiry over HTTP.

use chrono::Duration;
use http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_idle_session_expires() {
    let app = TestApp::new().await;
    let token = app.login("alice", "password123").await;

    app.clock.advance(Duration::minutes(31));

    let profile = app.request("GET", "/api/profile", None, Some(&token)).await;
    assert_eq!(profile.status, StatusCode::UNAUTHORIZED);
    assert_eq!(profile.body["message"], "Not authenticated");
    assert_eq!(app.state.sessions.active_sessions(), 0);
}

#[tokio::test]
async fn test_activity_keeps_session_alive() {
    let app = TestApp::new().await;
    let token = app.login("alice", "password123").await;

    for _ in 0..6 {
        app.clock.advance(Duration::minutes(25));
        let profile = app.request("GET", "/api/profile", None, Some(&token)).await;
        assert_eq!(profile.status, StatusCode::OK);
    }

    app.clock.advance(Duration::minutes(30));
    let me = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(me.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unauthenticated_requests_do_not_renew() {
    let app = TestApp::new().await;
    let token = app.login("alice", "password123").await;

    app.clock.advance(Duration::minutes(20));
    let health = app.request("GET", "/api/health", None, Some(&token)).await;
    assert_eq!(health.status, StatusCode::OK);

    app.clock.advance(Duration::minutes(11));
    let me = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(me.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_sessions_are_independent() {
    let app = TestApp::new().await;
    let alice = app.login("alice", "password123").await;
    app.clock.advance(Duration::minutes(20));
    let bob = app.login("bob", "hunter2").await;

    app.clock.advance(Duration::minutes(15));
    let alice_me = app.request("GET", "/api/auth/me", None, Some(&alice)).await;
    let bob_me = app.request("GET", "/api/auth/me", None, Some(&bob)).await;

    assert_eq!(alice_me.status, StatusCode::UNAUTHORIZED);
    assert_eq!(bob_me.status, StatusCode::OK);
    assert_eq!(bob_me.body["username"], "bob");
}

#[tokio::test]
async fn test_purge_reclaims_abandoned_sessions() {
    let app = TestApp::new().await;
    app.login("alice", "password123").await;
    app.login("bob", "hunter2").await;
    assert_eq!(app.state.sessions.active_sessions(), 2);

    app.clock.advance(Duration::minutes(30));
    assert_eq!(app.state.sessions.purge_expired(), 2);
    assert_eq!(app.state.sessions.active_sessions(), 0);
}

#[tokio::test]
async fn test_renewal_reissues_cookie() {
    let app = TestApp::new().await;
    let token = app.login("alice", "password123").await;

    app.clock.advance(Duration::minutes(20));
    let profile = app.request("GET", "/api/profile", None, Some(&token)).await;
    assert_eq!(profile.status, StatusCode::OK);

    let header = profile.set_cookie().expect("Renewal should re-issue the cookie");
    assert!(header.contains("Max-Age=1800"));
    assert!(header.contains("HttpOnly"));
    assert_eq!(profile.session_cookie().as_deref(), Some(token.as_str()));

    app.clock.advance(Duration::minutes(20));
    let me = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.session_cookie().as_deref(), Some(token.as_str()));
    assert!(me.set_cookie().unwrap().contains("Max-Age=1800"));
}

#[tokio::test]
async fn test_bearer_renewal_sets_no_cookie() {
    let app = TestApp::new().await;
    let token = app.login("alice", "password123").await;

    let profile = app.request_bearer("GET", "/api/profile", &token).await;
    assert_eq!(profile.status, StatusCode::OK);
    assert!(profile.set_cookie().is_none());
}

#[tokio::test]
async fn test_rejected_request_sets_no_cookie() {
    let app = TestApp::new().await;
    let token = app.login("alice", "password123").await;

    app.clock.advance(Duration::minutes(31));
    let profile = app.request("GET", "/api/profile", None, Some(&token)).await;
    assert_eq!(profile.status, StatusCode::UNAUTHORIZED);
    assert!(profile.set_cookie().is_none());
}
