//! Shared harness for integration tests.
//!
//! Every test gets its own in-memory SQLite database with migrations
//! applied, wired through the same state and router as the server.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, Response, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use gym_membership::api::{create_router, AppState};
use gym_membership::config::Config;
use gym_membership::domain::ExternalIdentity;
use gym_membership::infra::Database;

pub const ADMIN_USERNAME: &str = "frontdesk";
pub const ADMIN_PASSWORD: &str = "correct-horse";

pub fn test_config() -> Config {
    let vars: HashMap<&str, &str> = HashMap::from([
        ("JWT_SECRET", "integration-test-secret-0123456789abcdef"),
        ("DATABASE_URL", "sqlite::memory:"),
        // One pooled connection so every query sees the same in-memory database
        ("DB_MAX_CONNECTIONS", "1"),
        ("DB_MIN_CONNECTIONS", "1"),
        ("ADMIN_USERNAME", ADMIN_USERNAME),
        ("ADMIN_PASSWORD", ADMIN_PASSWORD),
    ]);
    Config::from_vars(|name| vars.get(name).map(|v| v.to_string())).unwrap()
}

pub async fn test_database() -> Arc<Database> {
    let config = test_config();
    Arc::new(Database::connect(&config.database).await.unwrap())
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

impl TestApp {
    pub async fn new() -> Self {
        let state = AppState::from_config(test_database().await, test_config()).unwrap();
        Self::with_state(state)
    }

    pub fn with_state(state: AppState) -> Self {
        Self {
            router: create_router(state.clone()),
            state,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Send and decode a JSON body.
    pub async fn json(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.send(request).await;
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    /// Admin token obtained through the JSON login endpoint.
    pub async fn admin_token(&self) -> String {
        let (status, body) = self
            .json(json_request(
                Method::POST,
                "/auth/login",
                None,
                serde_json::json!({ "username": ADMIN_USERNAME, "password": ADMIN_PASSWORD }),
            ))
            .await;
        assert_eq!(status, StatusCode::OK, "admin login failed: {}", body);
        body["access_token"].as_str().unwrap().to_string()
    }

    /// Token of a plain signed-in user.
    pub fn user_token(&self) -> String {
        self.state
            .auth_service
            .sign_in_external(ExternalIdentity {
                provider: "google".to_string(),
                subject: "112233".to_string(),
                name: "Casey Member".to_string(),
                email: Some("casey@example.com".to_string()),
            })
            .unwrap()
            .token
    }
}

pub fn request(method: Method, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn json_request(method: Method, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn jane_doe() -> Value {
    serde_json::json!({
        "fullName": "Jane Doe",
        "membershipType": "Premium",
        "status": "ACTIVE",
        "startDate": "2024-01-01"
    })
}

pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

/// Value of a cookie set by `response`, if any.
pub fn set_cookie(response: &Response<Body>, name: &str) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| value.to_string())
}
