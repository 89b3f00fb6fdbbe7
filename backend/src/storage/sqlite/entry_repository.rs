use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{sqlite::SqliteRow, Row};
use std::collections::HashMap;
use tracing::{debug, info};

use super::connection::DbConnection;
use crate::domain::models::{Adjustments, DailyCashEntry, Denomination, DenominationCounts};
use crate::storage::traits::{EntryStorage, StorageError, StorageResult};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Repository for daily cash entries backed by SQLite
#[derive(Clone)]
pub struct SqliteEntryRepository {
    db: DbConnection,
}

impl SqliteEntryRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn parse_date(raw: &str) -> StorageResult<NaiveDate> {
        NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .map_err(|e| StorageError::corrupt("cash_days.date", format!("'{}': {}", raw, e)))
    }

    fn decode_count(row: &SqliteRow) -> StorageResult<(Denomination, u32)> {
        let raw_denomination: i64 = row.try_get("denomination")?;
        let raw_count: i64 = row.try_get("count")?;

        let denomination = Denomination::try_from(raw_denomination)
            .map_err(|e| StorageError::corrupt("cash_counts.denomination", e.to_string()))?;
        let count = u32::try_from(raw_count).map_err(|_| {
            StorageError::corrupt("cash_counts.count", format!("invalid count {}", raw_count))
        })?;

        Ok((denomination, count))
    }

    fn decode_header(row: &SqliteRow) -> StorageResult<DailyCashEntry> {
        let date: String = row.try_get("date")?;
        Ok(DailyCashEntry {
            date: Self::parse_date(&date)?,
            cashier: row.try_get("cashier")?,
            counts: DenominationCounts::zero(),
            adjustments: Adjustments {
                parking: row.try_get("parking")?,
                saving: row.try_get("saving")?,
                debt_credit: row.try_get("debt_credit")?,
            },
        })
    }
}

#[async_trait]
impl EntryStorage for SqliteEntryRepository {
    async fn upsert_daily_entry(&self, entry: &DailyCashEntry) -> StorageResult<()> {
        let date = entry.date.format(DATE_FORMAT).to_string();
        info!("Storing cash entry for {} / {}", date, entry.cashier);

        let mut tx = self.db.pool().begin().await?;

        sqlx::query(
            r#"
            INSERT INTO cash_days (date, cashier, parking, saving, debt_credit)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT (date, cashier) DO UPDATE SET
                parking = excluded.parking,
                saving = excluded.saving,
                debt_credit = excluded.debt_credit,
                updated_at = CURRENT_TIMESTAMP
            "#,
        )
        .bind(&date)
        .bind(&entry.cashier)
        .bind(entry.adjustments.parking)
        .bind(entry.adjustments.saving)
        .bind(entry.adjustments.debt_credit)
        .execute(&mut *tx)
        .await?;

        for (denomination, count) in entry.counts.iter() {
            sqlx::query(
                r#"
                INSERT INTO cash_counts (date, cashier, denomination, count)
                VALUES (?, ?, ?, ?)
                ON CONFLICT (date, cashier, denomination) DO UPDATE SET
                    count = excluded.count
                "#,
            )
            .bind(&date)
            .bind(&entry.cashier)
            .bind(denomination.value())
            .bind(i64::from(count))
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn load_entry(&self, date: NaiveDate, cashier: &str) -> StorageResult<Option<DailyCashEntry>> {
        let date_key = date.format(DATE_FORMAT).to_string();

        let header = sqlx::query(
            r#"
            SELECT date, cashier, parking, saving, debt_credit
            FROM cash_days
            WHERE date = ? AND cashier = ?
            "#,
        )
        .bind(&date_key)
        .bind(cashier)
        .fetch_optional(self.db.pool())
        .await?;

        let mut entry = match header {
            Some(row) => Self::decode_header(&row)?,
            None => return Ok(None),
        };

        let rows = sqlx::query(
            r#"
            SELECT denomination, count
            FROM cash_counts
            WHERE date = ? AND cashier = ?
            "#,
        )
        .bind(&date_key)
        .bind(cashier)
        .fetch_all(self.db.pool())
        .await?;

        for row in &rows {
            let (denomination, count) = Self::decode_count(row)?;
            entry.counts.set(denomination, count);
        }

        Ok(Some(entry))
    }

    async fn load_all(&self) -> StorageResult<Vec<DailyCashEntry>> {
        let headers = sqlx::query(
            r#"
            SELECT date, cashier, parking, saving, debt_credit
            FROM cash_days
            ORDER BY date ASC, cashier ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        let count_rows = sqlx::query(
            r#"
            SELECT date, cashier, denomination, count
            FROM cash_counts
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        let mut counts_by_day: HashMap<(String, String), Vec<(Denomination, u32)>> = HashMap::new();
        for row in &count_rows {
            let key: (String, String) = (row.try_get("date")?, row.try_get("cashier")?);
            counts_by_day
                .entry(key)
                .or_default()
                .push(Self::decode_count(row)?);
        }

        let mut entries = Vec::with_capacity(headers.len());
        for row in &headers {
            let mut entry = Self::decode_header(row)?;
            let key = (entry.date.format(DATE_FORMAT).to_string(), entry.cashier.clone());
            if let Some(counts) = counts_by_day.remove(&key) {
                entry.counts = DenominationCounts::from_partial(counts);
            }
            entries.push(entry);
        }

        debug!("Loaded {} cash entries from SQLite", entries.len());
        Ok(entries)
    }
}
