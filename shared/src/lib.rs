use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Role of an authenticated user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Records the daily cash count for their own till
    Cashier,
    /// Views the aggregated report across all cashiers
    Manager,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Cashier => write!(f, "cashier"),
            Role::Manager => write!(f, "manager"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer token to send in the `Authorization` header
    pub token: String,
    pub username: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionInfo {
    pub username: String,
    pub role: Role,
    /// RFC 3339 timestamp of the login
    pub created_at: String,
}

/// Body of `PUT /api/entries/:date`
///
/// Denominations missing from `counts` are stored as zero. The three
/// adjustments are required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SaveDailyEntryRequest {
    /// Face value -> number of notes/coins
    #[serde(default)]
    pub counts: BTreeMap<i64, i64>,
    pub parking: i64,
    pub saving: i64,
    pub debt_credit: i64,
}

/// One line of the daily cash form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenominationLine {
    pub denomination: i64,
    /// Display label, e.g. "Rp 1,000"
    pub label: String,
    pub count: u32,
    /// denomination * count
    pub subtotal: i64,
}

/// The daily cash form as shown to a cashier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyEntryResponse {
    pub date: NaiveDate,
    pub cashier: String,
    pub lines: Vec<DenominationLine>,
    pub parking: i64,
    pub saving: i64,
    pub debt_credit: i64,
    pub total_cash: i64,
    /// Total cash with thousands separators, e.g. "2,500"
    pub formatted_total_cash: String,
    /// False when nothing was stored yet for this date and the form holds defaults
    pub submitted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashReportQuery {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

/// Outcome of a report request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    /// Nothing has ever been recorded
    NoData,
    /// Entries exist, but none fall inside the requested range
    NoRecords,
    Ready,
}

/// One date of the cash breakdown report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashReportRow {
    pub date: NaiveDate,
    /// Currency value per denomination, in the same order as `CashReportResponse::columns`
    pub values: Vec<i64>,
    pub formatted_values: Vec<String>,
    pub total: i64,
    pub formatted_total: String,
}

/// Cash breakdown across all cashiers, one row per date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashReportResponse {
    pub status: ReportStatus,
    pub from: NaiveDate,
    pub to: NaiveDate,
    /// Column labels, one per denomination, e.g. "Rp 1,000"
    pub columns: Vec<String>,
    pub rows: Vec<CashReportRow>,
}

/// Error body returned by every failing endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Manager).unwrap(), "\"manager\"");
        let role: Role = serde_json::from_str("\"cashier\"").unwrap();
        assert_eq!(role, Role::Cashier);
    }

    #[test]
    fn test_save_request_accepts_numeric_keys() {
        let request: SaveDailyEntryRequest = serde_json::from_str(
            r#"{"counts": {"100": 5, "1000": 2}, "parking": 5000, "saving": 0, "debt_credit": -250}"#,
        )
        .unwrap();
        assert_eq!(request.counts.get(&100), Some(&5));
        assert_eq!(request.counts.get(&1000), Some(&2));
        assert_eq!(request.parking, 5000);
        assert_eq!(request.debt_credit, -250);
    }

    #[test]
    fn test_save_request_counts_default_but_adjustments_are_required() {
        let request: SaveDailyEntryRequest =
            serde_json::from_str(r#"{"parking": 0, "saving": 0, "debt_credit": 0}"#).unwrap();
        assert!(request.counts.is_empty());

        let missing_saving: Result<SaveDailyEntryRequest, _> =
            serde_json::from_str(r#"{"counts": {}, "parking": 5000, "debt_credit": 0}"#);
        assert!(missing_saving.is_err());
    }

    #[test]
    fn test_report_status_snake_case() {
        assert_eq!(serde_json::to_string(&ReportStatus::NoRecords).unwrap(), "\"no_records\"");
    }
}
