//! Router harness shared by the handler tests.

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use shared::Role;
use std::sync::Arc;
use tower::ServiceExt;

use crate::config::{AppConfig, UserCredential};
use crate::storage::{Connection, DbConnection};
use crate::{create_router, AppState};

fn user(username: &str, password: &str, role: Role) -> UserCredential {
    UserCredential {
        username: username.to_string(),
        password: password.to_string(),
        role,
    }
}

/// Router over a fresh in-memory database with cashiers alice/bob and manager boss
pub async fn test_app() -> Router {
    let config = AppConfig {
        users: vec![
            user("alice", "pw1", Role::Cashier),
            user("boss", "pw2", Role::Manager),
            user("bob", "pw3", Role::Cashier),
        ],
        ..AppConfig::default()
    };

    let db = DbConnection::init_test().await.expect("Failed to create test database");
    let state = AppState::new(Arc::new(db.create_entry_repository()), config.auth_config());
    create_router(state, &config).expect("Failed to build router")
}

/// Send one request and decode the JSON body (`Null` when empty)
pub async fn send(
    app: &Router,
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
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, value)
}

/// Log in and return the bearer token
pub async fn login_token(app: &Router, username: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(serde_json::json!({"username": username, "password": password})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed for {}", username);
    body["token"].as_str().unwrap().to_string()
}
