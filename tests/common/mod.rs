//! Shared helpers for integration tests.
//!
//! Each test gets its own in-memory SQLite database. The pool is capped at a
//! single connection because every SQLite in-memory connection is a separate
//! database.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use banking_api::api::{create_router, AppState};
use banking_api::config::Config;
use banking_api::infra::{AccountStore, Database, UserStore};

pub const TEST_SECRET: &str = "integration-test-secret-at-least-32-bytes";
pub const PASSWORD: &str = "password123";

pub fn test_config() -> Config {
    let mut config = Config::new("sqlite::memory:", TEST_SECRET, 1, 1).unwrap();
    config.database_max_connections = 1;
    config
}

/// Connected, migrated database
pub async fn test_database() -> Database {
    Database::connect(&test_config()).await.unwrap()
}

/// Both stores over one fresh database
pub async fn test_stores() -> (UserStore, AccountStore) {
    let db = test_database().await;
    (
        UserStore::new(db.get_connection()),
        AccountStore::new(db.get_connection()),
    )
}

/// Full application over one fresh database
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

impl TestApp {
    pub async fn new() -> Self {
        let db = Arc::new(test_database().await);
        let state = AppState::from_config(db, test_config()).unwrap();
        let router = create_router(state.clone());
        Self { router, state }
    }

    /// Send one request and decode the JSON body (`Null` when empty).
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.send_request(request).await
    }

    pub async fn send_request(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, json)
    }

    /// Register a user and return its id
    pub async fn sign_up(&self, email: &str) -> String {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/users/sign-up",
                None,
                Some(serde_json::json!({
                    "email": email,
                    "full_name": "Test User",
                    "password": PASSWORD,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "sign-up failed: {}", body);
        body["id"].as_str().unwrap().to_string()
    }

    /// Sign in and return the access token
    pub async fn sign_in(&self, email: &str) -> String {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/users/sign-in",
                None,
                Some(serde_json::json!({ "email": email, "password": PASSWORD })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "sign-in failed: {}", body);
        body["access_token"].as_str().unwrap().to_string()
    }

    /// Register, sign in and return the token
    pub async fn user_token(&self, email: &str) -> String {
        self.sign_up(email).await;
        self.sign_in(email).await
    }
}
