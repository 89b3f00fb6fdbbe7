//! Test utilities for the CSV backend.
//!
//! `TestEnvironment` owns a temporary directory that is removed when the
//! environment is dropped, even if the test panics.

use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::connection::CsvConnection;
use super::entry_repository::CsvEntryRepository;
use crate::storage::traits::{Connection, StorageResult};

/// RAII test environment backed by a temporary data directory
pub struct TestEnvironment {
    /// Kept alive so the directory survives until drop
    _temp_dir: TempDir,
    pub connection: CsvConnection,
    pub base_path: PathBuf,
}

impl TestEnvironment {
    pub fn new() -> StorageResult<Self> {
        let temp_dir = TempDir::new()?;
        let base_path = temp_dir.path().to_path_buf();
        let connection = CsvConnection::new(&base_path)?;

        Ok(TestEnvironment {
            _temp_dir: temp_dir,
            connection,
            base_path,
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_path
    }

    pub fn entry_repository(&self) -> CsvEntryRepository {
        self.connection.create_entry_repository()
    }
}
