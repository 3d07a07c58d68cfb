//! Signup integration tests.
//!
//! Verify the two-phase pipeline end to end: validation short-circuits,
//! provider error mapping, the partial-failure path, and the exactly-one
//! profile write contract.

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use account_gateway::error::{IdentityError, StoreError};

use super::test_utils::{
    body_json, post_json, MockIdentityProvider, MockObjectStore, MockProfileStore, TestGateway,
};

fn valid_body() -> serde_json::Value {
    json!({
        "email": "test@example.com",
        "password": "Password123!",
        "username": "testuser"
    })
}

// =============================================================================
// Success Path
// =============================================================================

#[tokio::test]
async fn test_successful_signup() {
    let gateway = TestGateway::build(
        MockIdentityProvider::new().with_account_id("new-user-uuid-12345"),
        MockProfileStore::new(),
        MockObjectStore::new(),
        Some("test-media"),
    );

    let response = gateway
        .router
        .clone()
        .oneshot(post_json("/signup", valid_body()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["accountId"], "new-user-uuid-12345");
    assert!(body["message"].as_str().unwrap().contains("created"));

    // The provider saw the email as the sign-in identity, plus the username
    assert_eq!(gateway.identity.create_calls(), 1);
    let identities = gateway.identity.created_identities();
    assert_eq!(
        identities[0],
        (
            "test@example.com".to_string(),
            Some("testuser".to_string())
        )
    );

    // Exactly one profile write, keyed by the provider-issued id
    assert_eq!(gateway.profiles.calls(), 1);
    let records = gateway.profiles.records();
    assert_eq!(records[0].account_id, "new-user-uuid-12345");
    assert_eq!(records[0].email, "test@example.com");
    assert_eq!(records[0].username.as_deref(), Some("testuser"));
    assert!(records[0].friends.is_empty());
}

// =============================================================================
// Validation Failures (no external call)
// =============================================================================

#[tokio::test]
async fn test_missing_username_rejected_without_external_call() {
    let gateway = TestGateway::new();

    let body = json!({ "email": "test@example.com", "password": "Password123!" });
    let response = gateway
        .router
        .clone()
        .oneshot(post_json("/signup", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert!(body["message"].as_str().unwrap().contains("username"));

    assert_eq!(gateway.identity.create_calls(), 0);
    assert_eq!(gateway.profiles.calls(), 0);
}

#[tokio::test]
async fn test_missing_email_rejected_without_external_call() {
    let gateway = TestGateway::new();

    let body = json!({ "password": "Password123!", "username": "testuser" });
    let response = gateway
        .router
        .clone()
        .oneshot(post_json("/signup", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(gateway.identity.create_calls(), 0);
    assert_eq!(gateway.profiles.calls(), 0);
}

#[tokio::test]
async fn test_invalid_email_rejected() {
    let gateway = TestGateway::new();

    let body = json!({
        "email": "not-an-email",
        "password": "Password123!",
        "username": "testuser"
    });
    let response = gateway
        .router
        .clone()
        .oneshot(post_json("/signup", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"], "bad_input");
    assert!(body["message"].as_str().unwrap().contains("email"));
    assert_eq!(gateway.identity.create_calls(), 0);
}

#[tokio::test]
async fn test_short_password_rejected_with_policy_minimum_in_message() {
    let gateway = TestGateway::new();

    let body = json!({
        "email": "a@b.com",
        "password": "short",
        "username": "testuser"
    });
    let response = gateway
        .router
        .clone()
        .oneshot(post_json("/signup", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert!(body["message"].as_str().unwrap().contains("8 characters"));
    assert_eq!(gateway.identity.create_calls(), 0);
    assert_eq!(gateway.profiles.calls(), 0);
}

#[tokio::test]
async fn test_malformed_json_rejected_without_external_call() {
    let gateway = TestGateway::new();

    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/signup")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();

    let response = gateway.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert!(body["message"].as_str().unwrap().contains("JSON"));
    assert_eq!(gateway.identity.create_calls(), 0);
    assert_eq!(gateway.profiles.calls(), 0);
}

// =============================================================================
// Provider Outcomes
// =============================================================================

#[tokio::test]
async fn test_existing_identity_is_conflict_and_profile_untouched() {
    let gateway = TestGateway::build(
        MockIdentityProvider::new().with_create_error(IdentityError::AlreadyExists),
        MockProfileStore::new(),
        MockObjectStore::new(),
        Some("test-media"),
    );

    let response = gateway
        .router
        .clone()
        .oneshot(post_json("/signup", valid_body()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body = body_json(response).await;
    assert_eq!(body["error"], "conflict");

    assert_eq!(gateway.identity.create_calls(), 1);
    assert_eq!(gateway.profiles.calls(), 0);
}

#[tokio::test]
async fn test_provider_parameter_rejection_is_bad_input() {
    let gateway = TestGateway::build(
        MockIdentityProvider::new()
            .with_create_error(IdentityError::InvalidParameter("password too weak".to_string())),
        MockProfileStore::new(),
        MockObjectStore::new(),
        Some("test-media"),
    );

    let response = gateway
        .router
        .clone()
        .oneshot(post_json("/signup", valid_body()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(gateway.profiles.calls(), 0);
}

#[tokio::test]
async fn test_generic_provider_error_is_internal_and_profile_untouched() {
    let gateway = TestGateway::build(
        MockIdentityProvider::new()
            .with_create_error(IdentityError::Provider("throttled".to_string())),
        MockProfileStore::new(),
        MockObjectStore::new(),
        Some("test-media"),
    );

    let response = gateway
        .router
        .clone()
        .oneshot(post_json("/signup", valid_body()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(response).await;
    assert_eq!(body["error"], "internal_error");
    // Provider detail stays server-side
    assert!(!body["message"].as_str().unwrap().contains("throttled"));

    assert_eq!(gateway.profiles.calls(), 0);
}

// =============================================================================
// Partial Failure
// =============================================================================

#[tokio::test]
async fn test_profile_write_failure_is_partial_failure() {
    let gateway = TestGateway::build(
        MockIdentityProvider::new().with_account_id("u1"),
        MockProfileStore::new().with_error(StoreError::Provider("table unavailable".to_string())),
        MockObjectStore::new(),
        Some("test-media"),
    );

    let response = gateway
        .router
        .clone()
        .oneshot(post_json("/signup", valid_body()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(response).await;
    assert_eq!(body["error"], "partial_failure");
    // The message is the reconciliation hint: the account exists
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("profile"));
    assert!(message.contains("u1"));

    // Exactly one call on each side, no retry
    assert_eq!(gateway.identity.create_calls(), 1);
    assert_eq!(gateway.profiles.calls(), 1);
}

#[tokio::test]
async fn test_duplicate_profile_key_is_partial_failure() {
    // A conditional-write refusal on a freshly minted id is unexpected but
    // still leaves the account orphaned, so it surfaces the same way.
    let gateway = TestGateway::build(
        MockIdentityProvider::new().with_account_id("u1"),
        MockProfileStore::new().with_error(StoreError::AlreadyExists("u1".to_string())),
        MockObjectStore::new(),
        Some("test-media"),
    );

    let response = gateway
        .router
        .clone()
        .oneshot(post_json("/signup", valid_body()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], "partial_failure");
}
