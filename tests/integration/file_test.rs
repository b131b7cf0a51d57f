//! Integration tests for guarded sandbox reads over HTTP.

use http::StatusCode;
use serde_json::json;

use warden_storage::sample::{HELLO_CONTENT, HELLO_FILE, README_FILE, SAMPLE_README};

use crate::helpers::TestApp;

async fn read(app: &TestApp, token: &str, query: &str) -> crate::helpers::TestResponse {
    app.request(
        "GET",
        &format!("/api/files/read?{query}"),
        None,
        Some(token),
    )
    .await
}

#[tokio::test]
async fn test_read_requires_session() {
    let app = TestApp::new().await;

    let response = app
        .request("GET", "/api/files/read?filename=hello.txt", None, None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHENTICATED");
}

#[tokio::test]
async fn test_read_sample_files() {
    let app = TestApp::new().await;
    let token = app.login("alice", "password123").await;

    let hello = read(&app, &token, "filename=hello.txt").await;
    assert_eq!(hello.status, StatusCode::OK);
    assert_eq!(hello.body, json!({ "path": HELLO_FILE, "content": HELLO_CONTENT }));

    let readme = read(&app, &token, "filename=notes/readme.md").await;
    assert_eq!(readme.status, StatusCode::OK);
    assert_eq!(readme.body["path"], README_FILE);
    assert_eq!(readme.body["content"], SAMPLE_README);

    let dotted = read(&app, &token, "filename=./notes//readme.md").await;
    assert_eq!(dotted.status, StatusCode::OK);
    assert_eq!(dotted.body["path"], README_FILE);
}

#[tokio::test]
async fn test_syntactic_rejections() {
    let app = TestApp::new().await;
    let token = app.login("alice", "password123").await;
    let too_long = format!("filename={}", "a".repeat(256));

    let cases = [
        ("filename=", "empty"),
        ("", "empty"),
        (too_long.as_str(), "too_long"),
        ("filename=..%2F..%2Fetc%2Fpasswd", "parent_reference"),
        ("filename=notes/../hello.txt", "parent_reference"),
        ("filename=%2Fetc%2Fpasswd", "absolute_path"),
        ("filename=hello%5Ctxt", "disallowed_character"),
        ("filename=hello.txt%00.md", "disallowed_character"),
        ("filename=%252e%252e%252fsecret", "disallowed_character"),
        ("filename=caf%C3%A9.txt", "disallowed_character"),
    ];

    for (query, rule) in cases {
        let response = read(&app, &token, query).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "query {query:?}");
        assert_eq!(response.body["error"], "VALIDATION_FAILED", "query {query:?}");
        assert_eq!(response.body["details"]["rule"], rule, "query {query:?}");
    }
}

#[tokio::test]
async fn test_missing_file_is_not_found() {
    let app = TestApp::new().await;
    let token = app.login("alice", "password123").await;

    for query in ["filename=missing.txt", "filename=notes", "filename=hello.txt/inner"] {
        let response = read(&app, &token, query).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "query {query:?}");
        assert_eq!(response.body["error"], "FILE_NOT_FOUND");
    }
}

#[cfg(unix)]
#[tokio::test]
async fn test_symlink_out_of_sandbox_is_forbidden() {
    let app = TestApp::new().await;
    let token = app.login("alice", "password123").await;

    let outside = tempfile::tempdir().unwrap();
    std::fs::write(outside.path().join("secret.txt"), "top secret").unwrap();
    std::os::unix::fs::symlink(outside.path(), app.sandbox.path().join("escape")).unwrap();

    let response = read(&app, &token, "filename=escape/secret.txt").await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["error"], "TRAVERSAL_DETECTED");
    assert!(!response.body.to_string().contains("top secret"));
}

#[tokio::test]
async fn test_rejected_reads_keep_session_alive() {
    let app = TestApp::new().await;
    let token = app.login("bob", "hunter2").await;

    let response = read(&app, &token, "filename=../secret").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let me = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(me.status, StatusCode::OK);
}
