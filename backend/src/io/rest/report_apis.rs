//! # REST API for Reports

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use shared::CashReportQuery;
use tracing::{error, info};

use super::mappers::report_mapper::ReportMapper;
use super::{authenticate, error_response};
use crate::domain::ReportError;
use crate::AppState;

/// Cash breakdown across all cashiers for an inclusive date range
pub async fn get_cash_report(
    State(state): State<AppState>,
    Query(query): Query<CashReportQuery>,
    headers: HeaderMap,
) -> Response {
    info!("GET /api/reports/cash - query: {:?}", query);

    let session = match authenticate(&state, &headers).await {
        Ok(session) => session,
        Err(response) => return response,
    };

    match state
        .report_service
        .cash_report(&session, query.from, query.to)
        .await
    {
        Ok(outcome) => (
            StatusCode::OK,
            Json(ReportMapper::to_dto(query.from, query.to, outcome)),
        )
            .into_response(),
        Err(e @ ReportError::Forbidden) => error_response(StatusCode::FORBIDDEN, e.to_string()),
        Err(e @ ReportError::Storage(_)) => {
            error!("Failed to build cash report: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Error building cash report")
        }
    }
}
