use chrono::NaiveDate;
use shared::{CashReportResponse, CashReportRow, ReportStatus};

use crate::domain::formatting::format_amount;
use crate::domain::models::Denomination;
use crate::domain::{DailySummary, ReportOutcome};

pub struct ReportMapper;

impl ReportMapper {
    pub fn to_dto(from: NaiveDate, to: NaiveDate, outcome: ReportOutcome) -> CashReportResponse {
        let (status, rows) = match outcome {
            ReportOutcome::NoData => (ReportStatus::NoData, Vec::new()),
            ReportOutcome::NoRecords => (ReportStatus::NoRecords, Vec::new()),
            ReportOutcome::Summaries(summaries) => (
                ReportStatus::Ready,
                summaries.iter().map(Self::row_to_dto).collect(),
            ),
        };

        CashReportResponse {
            status,
            from,
            to,
            columns: Denomination::ALL.iter().map(|d| d.label()).collect(),
            rows,
        }
    }

    fn row_to_dto(summary: &DailySummary) -> CashReportRow {
        let values: Vec<i64> = Denomination::ALL
            .iter()
            .map(|d| summary.value(*d))
            .collect();

        CashReportRow {
            date: summary.date,
            formatted_values: values.iter().map(|v| format_amount(*v)).collect(),
            values,
            total: summary.total(),
            formatted_total: format_amount(summary.total()),
        }
    }
}
