//! Cash breakdown report across all cashiers.
//!
//! Sums denomination counts per date over an inclusive date range and
//! converts them to currency values. Adjustments (parking, saving,
//! debt/credit) are not part of the breakdown.
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

use crate::domain::models::{DailyCashEntry, Denomination, Session};
use crate::storage::{EntryStorage, StorageError};

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("only managers can view the cash report")]
    Forbidden,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Aggregated currency value per denomination for one date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailySummary {
    pub date: NaiveDate,
    /// Always holds every denomination; absent ones are zero
    pub values: BTreeMap<Denomination, i64>,
}

impl DailySummary {
    fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            values: Denomination::ALL.into_iter().map(|d| (d, 0)).collect(),
        }
    }

    pub fn value(&self, denomination: Denomination) -> i64 {
        self.values.get(&denomination).copied().unwrap_or(0)
    }

    pub fn total(&self) -> i64 {
        self.values.values().sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    /// The store holds no entries at all
    NoData,
    /// Entries exist but none fall inside the range
    NoRecords,
    /// One summary per date, ascending
    Summaries(Vec<DailySummary>),
}

/// Aggregate `entries` over `date_from..=date_to`
pub fn summarize(date_from: NaiveDate, date_to: NaiveDate, entries: &[DailyCashEntry]) -> ReportOutcome {
    if entries.is_empty() {
        return ReportOutcome::NoData;
    }

    let mut by_date: BTreeMap<NaiveDate, DailySummary> = BTreeMap::new();
    for entry in entries
        .iter()
        .filter(|e| date_from <= e.date && e.date <= date_to)
    {
        let summary = by_date
            .entry(entry.date)
            .or_insert_with(|| DailySummary::empty(entry.date));
        for (denomination, count) in entry.counts.iter() {
            *summary.values.entry(denomination).or_insert(0) += denomination.amount_for(count);
        }
    }

    if by_date.is_empty() {
        ReportOutcome::NoRecords
    } else {
        ReportOutcome::Summaries(by_date.into_values().collect())
    }
}

#[derive(Clone)]
pub struct ReportService {
    storage: Arc<dyn EntryStorage>,
}

impl ReportService {
    pub fn new(storage: Arc<dyn EntryStorage>) -> Self {
        Self { storage }
    }

    /// Build the cash breakdown for a manager
    pub async fn cash_report(
        &self,
        session: &Session,
        date_from: NaiveDate,
        date_to: NaiveDate,
    ) -> Result<ReportOutcome, ReportError> {
        if !session.is_manager() {
            return Err(ReportError::Forbidden);
        }

        let entries = self.storage.load_all().await?;
        let outcome = summarize(date_from, date_to, &entries);

        match &outcome {
            ReportOutcome::NoData => info!("Cash report requested but no data recorded yet"),
            ReportOutcome::NoRecords => info!("No records between {} and {}", date_from, date_to),
            ReportOutcome::Summaries(rows) => {
                info!("Cash report {}..{}: {} days", date_from, date_to, rows.len())
            }
        }

        Ok(outcome)
    }
}
