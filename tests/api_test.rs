//! End-to-end API tests.
//!
//! Drive the full router (auth layer, handlers, services, stores) against an
//! in-memory SQLite database.

mod common;

use axum::http::{Method, StatusCode};
use chrono::Utc;
use serde_json::json;
use tokio::sync::broadcast::error::TryRecvError;
use uuid::Uuid;

use banking_api::config::Config;
use banking_api::services::issue_token;

use common::{test_config, TestApp, PASSWORD};

// =============================================================================
// Public routes
// =============================================================================

#[tokio::test]
async fn test_welcome_is_public() {
    let app = TestApp::new().await;

    let (status, body) = app.send(Method::GET, "/api", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], true);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_health_reports_database() {
    let app = TestApp::new().await;

    let (status, body) = app.send(Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["services"]["database"], "healthy");
}

#[tokio::test]
async fn test_openapi_document_is_public() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(Method::GET, "/api-docs/openapi.json", None, None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/bank-accounts"].is_object());
}

// =============================================================================
// Full scenario
// =============================================================================

#[tokio::test]
async fn test_account_lifecycle() {
    let app = TestApp::new().await;
    let token = app.user_token("a@x.com").await;

    // Create
    let (status, body) = app
        .send(
            Method::POST,
            "/api/bank-accounts",
            Some(&token),
            Some(json!({ "name": "checking" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_str().unwrap().to_string();

    // List
    let (status, body) = app
        .send(Method::GET, "/api/bank-accounts", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let accounts = body.as_array().unwrap();
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0]["name"], "checking");
    assert_eq!(accounts[0]["balance"], 0);
    assert_eq!(accounts[0]["state"], "active");

    // Duplicate name
    let (status, body) = app
        .send(
            Method::POST,
            "/api/bank-accounts",
            Some(&token),
            Some(json!({ "name": "checking" })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "DUPLICATE_ACCOUNT_NAME");

    // Close
    let uri = format!("/api/bank-accounts/{}", id);
    let (status, body) = app
        .send(
            Method::PUT,
            &uri,
            Some(&token),
            Some(json!({ "name": "checking", "state": "closed" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"], "closed");

    let (status, body) = app.send(Method::GET, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"], "closed");
    assert_eq!(body["id"], id.as_str());

    // Delete
    let (status, _) = app.send(Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = app.send(Method::GET, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_current_user_profile() {
    let app = TestApp::new().await;
    let id = app.sign_up("a@x.com").await;
    let token = app.sign_in("a@x.com").await;

    let (status, body) = app
        .send(Method::GET, "/api/users/me", Some(&token), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id.as_str());
    assert_eq!(body["email"], "a@x.com");
    assert!(body.get("password_hash").is_none());
}

// =============================================================================
// Identity errors
// =============================================================================

#[tokio::test]
async fn test_duplicate_sign_up_conflicts() {
    let app = TestApp::new().await;
    app.sign_up("a@x.com").await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/users/sign-up",
            None,
            Some(json!({ "email": "a@x.com", "full_name": "Again", "password": PASSWORD })),
        )
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "DUPLICATE_IDENTITY");
}

#[tokio::test]
async fn test_sign_in_failures_look_identical() {
    let app = TestApp::new().await;
    app.sign_up("a@x.com").await;

    let (wrong_status, wrong_body) = app
        .send(
            Method::POST,
            "/api/users/sign-in",
            None,
            Some(json!({ "email": "a@x.com", "password": "not-the-password" })),
        )
        .await;
    let (unknown_status, unknown_body) = app
        .send(
            Method::POST,
            "/api/users/sign-in",
            None,
            Some(json!({ "email": "nobody@x.com", "password": PASSWORD })),
        )
        .await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_body, unknown_body);
    assert_eq!(wrong_body["error"]["code"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_sign_up_validation() {
    let app = TestApp::new().await;

    for payload in [
        json!({ "email": "not-an-email", "full_name": "Ada", "password": PASSWORD }),
        json!({ "email": "a@x.com", "full_name": "", "password": PASSWORD }),
        json!({ "email": "a@x.com", "full_name": "Ada", "password": "short" }),
        json!({ "email": "a@x.com" }),
    ] {
        let (status, body) = app
            .send(Method::POST, "/api/users/sign-up", None, Some(payload))
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }
}

// =============================================================================
// Authentication gate
// =============================================================================

#[tokio::test]
async fn test_protected_routes_require_token() {
    let app = TestApp::new().await;

    for uri in ["/api/users/me", "/api/bank-accounts", "/api/ws"] {
        let (status, body) = app.send(Method::GET, uri, None, None).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED, "{} should be protected", uri);
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");
    }
}

#[tokio::test]
async fn test_non_bearer_scheme_rejected() {
    let app = TestApp::new().await;
    let token = app.user_token("a@x.com").await;

    let request = axum::http::Request::builder()
        .uri("/api/bank-accounts")
        .header("authorization", format!("Token {}", token))
        .body(axum::body::Body::empty())
        .unwrap();
    let (status, _) = app.send_request(request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_garbage_token_rejected() {
    let app = TestApp::new().await;

    let (status, _) = app
        .send(Method::GET, "/api/bank-accounts", Some("garbage"), None)
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_with_bad_signature_rejected() {
    let app = TestApp::new().await;
    let user_id: Uuid = app.sign_up("a@x.com").await.parse().unwrap();

    let forger = Config::new("sqlite::memory:", "a-completely-different-secret-value!!", 1, 1).unwrap();
    let forged = issue_token(user_id, &forger, Utc::now()).unwrap();

    let (status, _) = app
        .send(Method::GET, "/api/users/me", Some(&forged.access_token), None)
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_for_unknown_user_is_unauthorized() {
    let app = TestApp::new().await;
    let token = issue_token(Uuid::new_v4(), &test_config(), Utc::now()).unwrap();

    let (status, body) = app
        .send(Method::GET, "/api/bank-accounts", Some(&token.access_token), None)
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_expired_token_rejected() {
    let app = TestApp::new().await;
    let user_id: Uuid = app.sign_up("a@x.com").await.parse().unwrap();

    let issued_long_ago = Utc::now() - chrono::Duration::days(2);
    let token = issue_token(user_id, &test_config(), issued_long_ago).unwrap();

    let (status, _) = app
        .send(Method::GET, "/api/users/me", Some(&token.access_token), None)
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Ownership and validation
// =============================================================================

#[tokio::test]
async fn test_other_users_account_is_not_found() {
    let app = TestApp::new().await;
    let alice = app.user_token("alice@x.com").await;
    let bob = app.user_token("bob@x.com").await;

    let (_, body) = app
        .send(
            Method::POST,
            "/api/bank-accounts",
            Some(&alice),
            Some(json!({ "name": "checking" })),
        )
        .await;
    let uri = format!("/api/bank-accounts/{}", body["id"].as_str().unwrap());

    let (get_status, _) = app.send(Method::GET, &uri, Some(&bob), None).await;
    let (put_status, _) = app
        .send(
            Method::PUT,
            &uri,
            Some(&bob),
            Some(json!({ "name": "mine", "state": "closed" })),
        )
        .await;
    let (delete_status, _) = app.send(Method::DELETE, &uri, Some(&bob), None).await;
    let (_, bob_list) = app
        .send(Method::GET, "/api/bank-accounts", Some(&bob), None)
        .await;

    assert_eq!(get_status, StatusCode::NOT_FOUND);
    assert_eq!(put_status, StatusCode::NOT_FOUND);
    assert_eq!(delete_status, StatusCode::NOT_FOUND);
    assert!(bob_list.as_array().unwrap().is_empty());

    let (status, body) = app.send(Method::GET, &uri, Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "checking");
}

#[tokio::test]
async fn test_unknown_state_rejected() {
    let app = TestApp::new().await;
    let token = app.user_token("a@x.com").await;

    let (_, body) = app
        .send(
            Method::POST,
            "/api/bank-accounts",
            Some(&token),
            Some(json!({ "name": "checking" })),
        )
        .await;
    let uri = format!("/api/bank-accounts/{}", body["id"].as_str().unwrap());

    let (status, body) = app
        .send(
            Method::PUT,
            &uri,
            Some(&token),
            Some(json!({ "name": "checking", "state": "frozen" })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let (_, body) = app.send(Method::GET, &uri, Some(&token), None).await;
    assert_eq!(body["state"], "active");
}

#[tokio::test]
async fn test_malformed_account_id_is_validation_error() {
    let app = TestApp::new().await;
    let token = app.user_token("a@x.com").await;
    let uri = "/api/bank-accounts/not-a-uuid";

    for method in [Method::GET, Method::DELETE] {
        let (status, body) = app.send(method, uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["error"]["message"].is_string());
    }

    let (status, body) = app
        .send(
            Method::PUT,
            uri,
            Some(&token),
            Some(json!({ "name": "checking", "state": "closed" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_account_name_length_limits() {
    let app = TestApp::new().await;
    let token = app.user_token("a@x.com").await;

    for name in [String::new(), "x".repeat(65)] {
        let (status, _) = app
            .send(
                Method::POST,
                "/api/bank-accounts",
                Some(&token),
                Some(json!({ "name": name })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    let (status, _) = app
        .send(
            Method::POST,
            "/api/bank-accounts",
            Some(&token),
            Some(json!({ "name": "x".repeat(64) })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
}

// =============================================================================
// Notifications
// =============================================================================

#[tokio::test]
async fn test_account_creation_is_broadcast_once() {
    let app = TestApp::new().await;
    let token = app.user_token("a@x.com").await;
    let mut events = app.state.hub.subscribe();

    let (_, body) = app
        .send(
            Method::POST,
            "/api/bank-accounts",
            Some(&token),
            Some(json!({ "name": "checking" })),
        )
        .await;

    let event = events.try_recv().unwrap();
    assert_eq!(event.event_type, "bank_account_created");
    assert_eq!(event.payload, body["id"].as_str().unwrap());

    // A rejected duplicate raises nothing
    let (status, _) = app
        .send(
            Method::POST,
            "/api/bank-accounts",
            Some(&token),
            Some(json!({ "name": "checking" })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
}

#[tokio::test]
async fn test_creation_without_listeners_succeeds() {
    let app = TestApp::new().await;
    let token = app.user_token("a@x.com").await;
    assert_eq!(app.state.hub.listener_count(), 0);

    let (status, _) = app
        .send(
            Method::POST,
            "/api/bank-accounts",
            Some(&token),
            Some(json!({ "name": "savings" })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
}
