//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably in the domain layer.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::path::Path;

use crate::domain::models::DailyCashEntry;

/// Failure reading or writing the backing table or file.
///
/// Never retried; the caller sees the operation fail.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("corrupt data in {location}: {reason}")]
    Corrupt { location: String, reason: String },
}

impl StorageError {
    pub fn corrupt(location: impl Into<String>, reason: impl Into<String>) -> Self {
        StorageError::Corrupt {
            location: location.into(),
            reason: reason.into(),
        }
    }

    pub fn corrupt_file(path: &Path, reason: impl Into<String>) -> Self {
        Self::corrupt(path.display().to_string(), reason)
    }
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Trait defining the interface for daily cash entry storage
///
/// Implementations must make `upsert_daily_entry` all-or-nothing: a reader
/// never observes a mix of the previous and the new counts for one
/// `(date, cashier)`.
#[async_trait]
pub trait EntryStorage: Send + Sync {
    /// Replace every stored count and the adjustments for `(entry.date, entry.cashier)`
    async fn upsert_daily_entry(&self, entry: &DailyCashEntry) -> StorageResult<()>;

    /// Most recently stored entry for `(date, cashier)`, or `None` if never submitted
    async fn load_entry(&self, date: NaiveDate, cashier: &str) -> StorageResult<Option<DailyCashEntry>>;

    /// Every stored entry, ordered by date then cashier
    async fn load_all(&self) -> StorageResult<Vec<DailyCashEntry>>;
}

/// Trait defining the interface for storage connections
///
/// This trait abstracts away the specific connection type (database, CSV, etc.)
/// and provides factory methods for creating repositories.
pub trait Connection: Send + Sync + Clone {
    /// The type of EntryStorage this connection creates
    type EntryRepository: EntryStorage + 'static;

    /// Create a new entry repository for this connection
    fn create_entry_repository(&self) -> Self::EntryRepository;
}
