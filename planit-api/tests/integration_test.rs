/// Integration tests for the PlanIt API
///
/// These drive the real router end-to-end over an in-memory database:
/// - registration, login, and token identity
/// - the auth gateway's rejection paths
/// - ownership scoping across accounts
/// - validation and error mapping

mod common;

use axum::http::StatusCode;
use chrono::Duration;
use common::{TestContext, TEST_SECRET};
use planit_shared::auth::token::{sign_claims, validate_token, Claims};
use planit_shared::models::user::User;
use serde_json::json;

#[tokio::test]
async fn test_health_check() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx.request_json("GET", "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");
}

#[tokio::test]
async fn test_register_then_login_returns_matching_identity() {
    let ctx = TestContext::new().await.unwrap();

    ctx.register("alice", "secret1").await;
    let (token, user_id) = ctx.login("alice", "secret1").await;

    // The token's validated identity matches the registered account
    let claims = validate_token(&token, TEST_SECRET).unwrap();
    assert_eq!(claims.sub, user_id);
    assert_eq!(claims.username, "alice");
}

#[tokio::test]
async fn test_duplicate_registration_conflict() {
    let ctx = TestContext::new().await.unwrap();

    ctx.register("alice", "secret1").await;

    let (status, body) = ctx
        .request_json(
            "POST",
            "/register",
            None,
            Some(json!({ "username": "alice", "password": "other-password" })),
        )
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "User already exists");

    // No second account was created
    assert_eq!(User::count(&ctx.db).await.unwrap(), 1);
}

#[tokio::test]
async fn test_register_validation_collects_all_violations() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx
        .request_json(
            "POST",
            "/register",
            None,
            Some(json!({ "username": "", "password": "abc" })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let details = body["details"].as_array().unwrap();
    assert_eq!(details.len(), 2, "both violations reported: {}", body);
}

#[tokio::test]
async fn test_register_rejects_oversized_username() {
    let ctx = TestContext::new().await.unwrap();

    let (status, _) = ctx
        .request_json(
            "POST",
            "/register",
            None,
            Some(json!({ "username": "a".repeat(51), "password": "secret1" })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_failures_are_undifferentiated() {
    let ctx = TestContext::new().await.unwrap();
    ctx.register("alice", "secret1").await;

    // Unknown username and wrong password produce identical responses
    let (status1, body1) = ctx
        .request_json(
            "POST",
            "/login",
            None,
            Some(json!({ "username": "nobody", "password": "secret1" })),
        )
        .await;
    let (status2, body2) = ctx
        .request_json(
            "POST",
            "/login",
            None,
            Some(json!({ "username": "alice", "password": "wrong" })),
        )
        .await;

    assert_eq!(status1, StatusCode::UNAUTHORIZED);
    assert_eq!(status2, StatusCode::UNAUTHORIZED);
    assert_eq!(body1["message"], body2["message"]);
    assert_eq!(body1["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_protected_routes_reject_missing_and_bad_auth() {
    let ctx = TestContext::new().await.unwrap();

    // No header
    let (status, body) = ctx.request_json("GET", "/tasks", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Authentication required");

    // Malformed header (missing token segment)
    let request = axum::http::Request::builder()
        .method("GET")
        .uri("/tasks")
        .header("authorization", "Bearer")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = ctx.send(request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Garbage token
    let (status, body) = ctx
        .request_json("GET", "/tasks", Some("not-a-real-token"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid or expired token");
}

#[tokio::test]
async fn test_expired_token_rejected() {
    let ctx = TestContext::new().await.unwrap();
    let (_, user_id) = ctx.register_and_login("alice", "secret1").await;

    let expired = sign_claims(
        &Claims::with_expiration(user_id, "alice", Duration::seconds(-60)),
        TEST_SECRET,
    )
    .unwrap();

    let (status, body) = ctx.request_json("GET", "/tasks", Some(&expired), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid or expired token");
}

#[tokio::test]
async fn test_task_lifecycle_scenario() {
    let ctx = TestContext::new().await.unwrap();
    let (alice_token, _) = ctx.register_and_login("alice", "secret1").await;
    let (bob_token, _) = ctx.register_and_login("bob", "secret2").await;

    // Create
    let (status, created) = ctx
        .request_json(
            "POST",
            "/tasks",
            Some(&alice_token),
            Some(json!({ "title": "Buy milk" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let task_id = created["id"].as_i64().unwrap();

    // List reflects the create (read-your-writes)
    let (status, body) = ctx.request_json("GET", "/tasks", Some(&alice_token), None).await;
    assert_eq!(status, StatusCode::OK);
    let tasks = body.as_array().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["title"], "Buy milk");
    assert_eq!(tasks[0]["is_done"], 0);

    // A different account sees an empty list, not alice's task
    let (status, body) = ctx.request_json("GET", "/tasks", Some(&bob_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());

    // Partial update: only is_done changes
    let (status, updated) = ctx
        .request_json(
            "PUT",
            &format!("/tasks/{}", task_id),
            Some(&alice_token),
            Some(json!({ "is_done": 1 })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Buy milk");
    assert_eq!(updated["is_done"], 1);

    // Delete, then deleting again is 404
    let (status, _) = ctx
        .request_json(
            "DELETE",
            &format!("/tasks/{}", task_id),
            Some(&alice_token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = ctx
        .request_json(
            "DELETE",
            &format!("/tasks/{}", task_id),
            Some(&alice_token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_nonexistent_task_is_404_not_500() {
    let ctx = TestContext::new().await.unwrap();
    let (token, _) = ctx.register_and_login("alice", "secret1").await;

    let (status, _) = ctx
        .request_json(
            "PUT",
            "/tasks/999",
            Some(&token),
            Some(json!({ "title": "ghost" })),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cross_account_access_is_indistinguishable_from_missing() {
    let ctx = TestContext::new().await.unwrap();
    let (alice_token, _) = ctx.register_and_login("alice", "secret1").await;
    let (bob_token, _) = ctx.register_and_login("bob", "secret2").await;

    let (_, created) = ctx
        .request_json(
            "POST",
            "/tasks",
            Some(&alice_token),
            Some(json!({ "title": "alice's task" })),
        )
        .await;
    let task_id = created["id"].as_i64().unwrap();

    // Bob guessing alice's task id gets the same 404 as a nonexistent id
    let (status, _) = ctx
        .request_json(
            "PUT",
            &format!("/tasks/{}", task_id),
            Some(&bob_token),
            Some(json!({ "title": "hijacked" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = ctx
        .request_json(
            "DELETE",
            &format!("/tasks/{}", task_id),
            Some(&bob_token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Alice's task is untouched
    let (_, body) = ctx.request_json("GET", "/tasks", Some(&alice_token), None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["title"], "alice's task");
}

#[tokio::test]
async fn test_create_task_ignores_identity_fields_in_body() {
    let ctx = TestContext::new().await.unwrap();
    let (alice_token, alice_id) = ctx.register_and_login("alice", "secret1").await;
    let (_, bob_id) = ctx.register_and_login("bob", "secret2").await;

    // A smuggled user_id has no effect: ownership comes from the token
    let (status, created) = ctx
        .request_json(
            "POST",
            "/tasks",
            Some(&alice_token),
            Some(json!({ "title": "mine", "user_id": bob_id })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["user_id"].as_i64().unwrap(), alice_id);
}

#[tokio::test]
async fn test_search_requires_query_and_matches_literally() {
    let ctx = TestContext::new().await.unwrap();
    let (token, _) = ctx.register_and_login("alice", "secret1").await;

    for title in ["Buy milk", "Mom's birthday", "Call plumber"] {
        let (status, _) = ctx
            .request_json("POST", "/tasks", Some(&token), Some(json!({ "title": title })))
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    // Missing q
    let (status, _) = ctx.request_json("GET", "/tasks/search", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Plain substring
    let (status, body) = ctx
        .request_json("GET", "/tasks/search?q=milk", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["title"], "Buy milk");

    // An injection payload is a literal substring: no error, never all rows
    let payload = "' OR '1'='1";
    let (status, body) = ctx
        .request_json(
            "GET",
            &format!("/tasks/search?q={}", urlencode(payload)),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_events_lifecycle_and_scoping() {
    let ctx = TestContext::new().await.unwrap();
    let (alice_token, _) = ctx.register_and_login("alice", "secret1").await;
    let (bob_token, _) = ctx.register_and_login("bob", "secret2").await;

    // Missing date is a validation error
    let (status, _) = ctx
        .request_json(
            "POST",
            "/events",
            Some(&alice_token),
            Some(json!({ "title": "Dentist" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = ctx
        .request_json(
            "POST",
            "/events",
            Some(&alice_token),
            Some(json!({ "title": "Dentist", "date": "2026-09-01" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = ctx.request_json("GET", "/events", Some(&alice_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["date"], "2026-09-01");

    // Events are owner-scoped like tasks
    let (status, body) = ctx.request_json("GET", "/events", Some(&bob_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());

    let (status, _) = ctx.request_json("GET", "/events", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

/// Percent-encodes a query value (just enough for the test inputs)
fn urlencode(value: &str) -> String {
    value
        .bytes()
        .map(|b| match b {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                (b as char).to_string()
            }
            _ => format!("%{:02X}", b),
        })
        .collect()
}
