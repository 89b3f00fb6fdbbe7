//! # REST API Interface Layer
//!
//! JSON endpoints under `/api`:
//!
//! - `POST /auth/login`, `POST /auth/logout`, `GET /auth/session`
//! - `GET /entries/:date`, `PUT /entries/:date` (cashiers)
//! - `GET /reports/cash?from=&to=` (managers)
//!
//! Authenticated endpoints expect `Authorization: Bearer <token>` with the
//! token returned by login. Handlers only translate: parse, resolve the
//! session, call one service, map the result.

pub mod auth_apis;
pub mod entry_apis;
pub mod mappers;
pub mod report_apis;

#[cfg(test)]
mod test_support;

pub use auth_apis::*;
pub use entry_apis::*;
pub use report_apis::*;

use axum::{
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use shared::ErrorResponse;
use tracing::warn;

use crate::domain::models::Session;
use crate::AppState;

/// JSON error body with the given status
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Resolve the caller's session from the bearer token, or a 401 response
pub async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<Session, Response> {
    let Some(token) = bearer_token(headers) else {
        return Err(error_response(StatusCode::UNAUTHORIZED, "Missing bearer token"));
    };

    state.auth_service.resolve(token).await.map_err(|e| {
        warn!("Rejected request: {}", e);
        error_response(StatusCode::UNAUTHORIZED, e.to_string())
    })
}
