//! Domain model for one cashier's daily cash count.
use chrono::NaiveDate;

use super::denomination::DenominationCounts;

/// Signed adjustment amounts recorded next to the cash count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Adjustments {
    pub parking: i64,
    pub saving: i64,
    pub debt_credit: i64,
}

/// Everything a cashier submits for one date.
///
/// Identity is `(date, cashier)`. Storage replaces the whole value on
/// every upsert; counts for individual denominations are never merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyCashEntry {
    pub date: NaiveDate,
    pub cashier: String,
    pub counts: DenominationCounts,
    pub adjustments: Adjustments,
}

impl DailyCashEntry {
    /// An empty form for `(date, cashier)`, used when nothing was stored yet
    pub fn blank(date: NaiveDate, cashier: impl Into<String>) -> Self {
        Self {
            date,
            cashier: cashier.into(),
            counts: DenominationCounts::zero(),
            adjustments: Adjustments::default(),
        }
    }

    pub fn total_cash(&self) -> i64 {
        self.counts.total_cash()
    }
}
