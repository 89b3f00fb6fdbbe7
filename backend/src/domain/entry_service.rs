//! Daily cash form logic.
//!
//! Loads a cashier's form for a date (zero defaults when nothing was stored
//! yet) and saves a submitted form as a complete replacement of that day.
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::info;

use crate::domain::commands::entries::SaveDailyEntryCommand;
use crate::domain::models::{
    Adjustments, DailyCashEntry, Denomination, DenominationCounts, Session, UnknownDenomination,
};
use crate::storage::{EntryStorage, StorageError};

#[derive(Debug, thiserror::Error)]
pub enum EntryError {
    #[error(transparent)]
    UnknownDenomination(#[from] UnknownDenomination),
    #[error("count for denomination {denomination} cannot be negative (got {count})")]
    NegativeCount { denomination: i64, count: i64 },
    #[error("count for denomination {denomination} is too large (got {count})")]
    CountTooLarge { denomination: i64, count: i64 },
    #[error("only cashiers can record daily cash entries")]
    Forbidden,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// A cashier's form for one date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyForm {
    pub entry: DailyCashEntry,
    /// False when the form holds defaults because nothing was stored yet
    pub submitted: bool,
}

impl DailyForm {
    pub fn total_cash(&self) -> i64 {
        self.entry.total_cash()
    }
}

#[derive(Clone)]
pub struct EntryService {
    storage: Arc<dyn EntryStorage>,
}

impl EntryService {
    pub fn new(storage: Arc<dyn EntryStorage>) -> Self {
        Self { storage }
    }

    /// Load the session's own form for `date`
    pub async fn load_form(&self, session: &Session, date: NaiveDate) -> Result<DailyForm, EntryError> {
        if !session.is_cashier() {
            return Err(EntryError::Forbidden);
        }

        let form = match self.storage.load_entry(date, &session.username).await? {
            Some(entry) => DailyForm { entry, submitted: true },
            None => DailyForm {
                entry: DailyCashEntry::blank(date, session.username.clone()),
                submitted: false,
            },
        };

        Ok(form)
    }

    /// Validate and store a submitted form, replacing whatever was stored for that day
    pub async fn save_form(
        &self,
        session: &Session,
        command: SaveDailyEntryCommand,
    ) -> Result<DailyForm, EntryError> {
        if !session.is_cashier() {
            return Err(EntryError::Forbidden);
        }

        let counts = Self::validate_counts(&command.counts)?;
        let entry = DailyCashEntry {
            date: command.date,
            cashier: session.username.clone(),
            counts,
            adjustments: Adjustments {
                parking: command.parking,
                saving: command.saving,
                debt_credit: command.debt_credit,
            },
        };

        self.storage.upsert_daily_entry(&entry).await?;
        info!(
            "Saved cash entry for {} / {}: total {}",
            entry.date,
            entry.cashier,
            entry.total_cash()
        );

        Ok(DailyForm { entry, submitted: true })
    }

    /// Reject unlisted denominations and out-of-range counts; zero-fill the rest
    fn validate_counts(raw_counts: &[(i64, i64)]) -> Result<DenominationCounts, EntryError> {
        let mut counts = Vec::with_capacity(raw_counts.len());

        for &(raw_denomination, raw_count) in raw_counts {
            let denomination = Denomination::try_from(raw_denomination)?;
            if raw_count < 0 {
                return Err(EntryError::NegativeCount {
                    denomination: raw_denomination,
                    count: raw_count,
                });
            }
            let count = u32::try_from(raw_count).map_err(|_| EntryError::CountTooLarge {
                denomination: raw_denomination,
                count: raw_count,
            })?;
            counts.push((denomination, count));
        }

        Ok(DenominationCounts::from_partial(counts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{Connection, DbConnection, StorageResult};
    use async_trait::async_trait;
    use chrono::Utc;
    use shared::Role;

    async fn setup_service() -> EntryService {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        EntryService::new(Arc::new(db.create_entry_repository()))
    }

    fn session(username: &str, role: Role) -> Session {
        Session {
            token: format!("token-{}", username),
            username: username.to_string(),
            role,
            created_at: Utc::now(),
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
    }

    fn command(counts: Vec<(i64, i64)>) -> SaveDailyEntryCommand {
        SaveDailyEntryCommand {
            date: date(),
            counts,
            parking: 5000,
            saving: 2000,
            debt_credit: 0,
        }
    }

    struct FailingStorage;

    #[async_trait]
    impl EntryStorage for FailingStorage {
        async fn upsert_daily_entry(&self, _entry: &DailyCashEntry) -> StorageResult<()> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full").into())
        }

        async fn load_entry(&self, _date: NaiveDate, _cashier: &str) -> StorageResult<Option<DailyCashEntry>> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk gone").into())
        }

        async fn load_all(&self) -> StorageResult<Vec<DailyCashEntry>> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_load_form_defaults_to_zero() {
        let service = setup_service().await;
        let alice = session("alice", Role::Cashier);

        let form = service.load_form(&alice, date()).await.unwrap();

        assert!(!form.submitted);
        assert_eq!(form.entry.cashier, "alice");
        assert_eq!(form.entry.counts, DenominationCounts::zero());
        assert_eq!(form.entry.adjustments, Adjustments::default());
        assert_eq!(form.total_cash(), 0);
    }

    #[tokio::test]
    async fn test_save_then_load_returns_submitted_values() {
        let service = setup_service().await;
        let alice = session("alice", Role::Cashier);

        let saved = service
            .save_form(&alice, command(vec![(100, 5), (1000, 2)]))
            .await
            .unwrap();
        assert_eq!(saved.total_cash(), 2500);

        let loaded = service.load_form(&alice, date()).await.unwrap();
        assert!(loaded.submitted);
        assert_eq!(loaded.entry, saved.entry);
        assert_eq!(loaded.entry.counts.get(Denomination::Rp100), 5);
        assert_eq!(loaded.entry.adjustments.parking, 5000);
        assert_eq!(loaded.entry.adjustments.saving, 2000);
    }

    #[tokio::test]
    async fn test_forms_are_scoped_to_the_session_user() {
        let service = setup_service().await;
        let alice = session("alice", Role::Cashier);
        let bob = session("bob", Role::Cashier);

        service.save_form(&alice, command(vec![(1000, 10)])).await.unwrap();

        let bobs_form = service.load_form(&bob, date()).await.unwrap();
        assert!(!bobs_form.submitted);
        assert_eq!(bobs_form.total_cash(), 0);
    }

    #[tokio::test]
    async fn test_unknown_denomination_is_rejected_and_nothing_stored() {
        let service = setup_service().await;
        let alice = session("alice", Role::Cashier);

        let result = service.save_form(&alice, command(vec![(1000, 1), (300, 2)])).await;
        assert!(matches!(
            result,
            Err(EntryError::UnknownDenomination(UnknownDenomination(300)))
        ));

        let form = service.load_form(&alice, date()).await.unwrap();
        assert!(!form.submitted);
    }

    #[tokio::test]
    async fn test_negative_count_is_rejected() {
        let service = setup_service().await;
        let alice = session("alice", Role::Cashier);

        let result = service.save_form(&alice, command(vec![(500, -1)])).await;
        assert!(matches!(
            result,
            Err(EntryError::NegativeCount { denomination: 500, count: -1 })
        ));
    }

    #[tokio::test]
    async fn test_oversized_count_is_rejected() {
        let service = setup_service().await;
        let alice = session("alice", Role::Cashier);

        let result = service
            .save_form(&alice, command(vec![(500, i64::from(u32::MAX) + 1)]))
            .await;
        assert!(matches!(result, Err(EntryError::CountTooLarge { .. })));
    }

    #[tokio::test]
    async fn test_managers_cannot_use_the_form() {
        let service = setup_service().await;
        let boss = session("boss", Role::Manager);

        assert!(matches!(service.load_form(&boss, date()).await, Err(EntryError::Forbidden)));
        assert!(matches!(
            service.save_form(&boss, command(vec![])).await,
            Err(EntryError::Forbidden)
        ));
    }

    #[tokio::test]
    async fn test_storage_failures_propagate() {
        let service = EntryService::new(Arc::new(FailingStorage));
        let alice = session("alice", Role::Cashier);

        assert!(matches!(
            service.save_form(&alice, command(vec![(100, 1)])).await,
            Err(EntryError::Storage(StorageError::Io(_)))
        ));
        assert!(matches!(
            service.load_form(&alice, date()).await,
            Err(EntryError::Storage(StorageError::Io(_)))
        ));
    }
}
