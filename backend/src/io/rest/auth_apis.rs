//! # REST API for Authentication
//!
//! Endpoints for logging in and out and inspecting the current session.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use shared::LoginRequest;
use tracing::info;

use super::mappers::auth_mapper::AuthMapper;
use super::{authenticate, error_response};
use crate::AppState;

/// Open a session for valid credentials
pub async fn login(State(state): State<AppState>, Json(request): Json<LoginRequest>) -> Response {
    info!("POST /api/auth/login - user: {}", request.username);

    match state
        .auth_service
        .login(&request.username, &request.password)
        .await
    {
        Ok(session) => (StatusCode::OK, Json(AuthMapper::to_login_response(&session))).into_response(),
        Err(e) => error_response(StatusCode::UNAUTHORIZED, e.to_string()),
    }
}

/// Invalidate the caller's session
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    info!("POST /api/auth/logout");

    let session = match authenticate(&state, &headers).await {
        Ok(session) => session,
        Err(response) => return response,
    };

    match state.auth_service.logout(&session).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(StatusCode::UNAUTHORIZED, e.to_string()),
    }
}

/// Describe the caller's session
pub async fn current_session(State(state): State<AppState>, headers: HeaderMap) -> Response {
    info!("GET /api/auth/session");

    match authenticate(&state, &headers).await {
        Ok(session) => (StatusCode::OK, Json(AuthMapper::to_session_info(&session))).into_response(),
        Err(response) => response,
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{login_token, send, test_app};
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn test_login_returns_token_and_role() {
        let app = test_app().await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({"username": "boss", "password": "pw2"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["username"], "boss");
        assert_eq!(body["role"], "manager");
        assert!(body["token"].as_str().map(|t| !t.is_empty()).unwrap_or(false));
    }

    #[tokio::test]
    async fn test_login_with_bad_password_is_unauthorized() {
        let app = test_app().await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({"username": "alice", "password": "wrong"})),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "invalid username or password");
    }

    #[tokio::test]
    async fn test_session_then_logout() {
        let app = test_app().await;
        let token = login_token(&app, "alice", "pw1").await;

        let (status, body) = send(&app, Method::GET, "/api/auth/session", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["username"], "alice");
        assert_eq!(body["role"], "cashier");

        let (status, _) = send(&app, Method::POST, "/api/auth/logout", Some(&token), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&app, Method::GET, "/api/auth/session", Some(&token), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_session_without_token_is_unauthorized() {
        let app = test_app().await;

        let (status, body) = send(&app, Method::GET, "/api/auth/session", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Missing bearer token");
    }
}
