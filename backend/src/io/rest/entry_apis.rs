//! # REST API for Daily Cash Entries
//!
//! The cashier's form: load and save the counts for one date.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use chrono::NaiveDate;
use shared::SaveDailyEntryRequest;
use tracing::{error, info, warn};

use super::mappers::entry_mapper::EntryMapper;
use super::{authenticate, error_response};
use crate::domain::EntryError;
use crate::AppState;

fn entry_error_response(e: EntryError) -> Response {
    match e {
        EntryError::UnknownDenomination(_)
        | EntryError::NegativeCount { .. }
        | EntryError::CountTooLarge { .. } => {
            warn!("Rejected cash entry: {}", e);
            error_response(StatusCode::BAD_REQUEST, e.to_string())
        }
        EntryError::Forbidden => error_response(StatusCode::FORBIDDEN, e.to_string()),
        EntryError::Storage(_) => {
            error!("Cash entry storage failure: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Error accessing cash entries")
        }
    }
}

/// Load the caller's form for a date
pub async fn get_daily_entry(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
    headers: HeaderMap,
) -> Response {
    info!("GET /api/entries/{}", date);

    let session = match authenticate(&state, &headers).await {
        Ok(session) => session,
        Err(response) => return response,
    };

    match state.entry_service.load_form(&session, date).await {
        Ok(form) => (StatusCode::OK, Json(EntryMapper::to_dto(&form))).into_response(),
        Err(e) => entry_error_response(e),
    }
}

/// Save the caller's form for a date, replacing any earlier submission
pub async fn save_daily_entry(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
    headers: HeaderMap,
    Json(request): Json<SaveDailyEntryRequest>,
) -> Response {
    info!("PUT /api/entries/{} - request: {:?}", date, request);

    let session = match authenticate(&state, &headers).await {
        Ok(session) => session,
        Err(response) => return response,
    };

    let command = EntryMapper::to_command(date, request);
    match state.entry_service.save_form(&session, command).await {
        Ok(form) => (StatusCode::OK, Json(EntryMapper::to_dto(&form))).into_response(),
        Err(e) => entry_error_response(e),
    }
}
