//! Copy entries between storage backends.
//!
//! Used to move data kept in monthly CSV files into the SQLite database.
//! Entries are upserted one at a time, so running a copy twice leaves the
//! target unchanged.

use tracing::info;

use super::traits::{EntryStorage, StorageResult};

/// Copy every entry of `source` into `target`, returning how many were copied
pub async fn copy_entries(source: &dyn EntryStorage, target: &dyn EntryStorage) -> StorageResult<usize> {
    let entries = source.load_all().await?;
    info!("Copying {} cash entries", entries.len());

    for entry in &entries {
        target.upsert_daily_entry(entry).await?;
    }

    Ok(entries.len())
}
