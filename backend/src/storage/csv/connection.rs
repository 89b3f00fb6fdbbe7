use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use super::entry_repository::CsvEntryRepository;
use crate::storage::traits::{Connection, StorageResult};

const FILE_PREFIX: &str = "cash_";
const FILE_EXTENSION: &str = "csv";

/// CsvConnection manages the data directory holding the monthly CSV files
#[derive(Clone)]
pub struct CsvConnection {
    base_directory: Arc<PathBuf>,
}

impl CsvConnection {
    /// Create a new CSV connection with a base directory, creating it if needed
    pub fn new<P: AsRef<Path>>(base_directory: P) -> StorageResult<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            info!("Creating data directory {}", base_path.display());
            fs::create_dir_all(&base_path)?;
        }

        Ok(Self {
            base_directory: Arc::new(base_path),
        })
    }

    /// Get the base directory path
    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Path of the file holding every entry of `date`'s month, e.g. `cash_2024-01.csv`
    pub fn month_file_path(&self, date: NaiveDate) -> PathBuf {
        self.base_directory
            .join(format!("{}{}.{}", FILE_PREFIX, date.format("%Y-%m"), FILE_EXTENSION))
    }

    /// Every month file in the data directory, sorted by name (and so by month)
    pub fn list_month_files(&self) -> StorageResult<Vec<PathBuf>> {
        let mut files = Vec::new();

        for dir_entry in fs::read_dir(self.base_directory.as_path())? {
            let path = dir_entry?.path();
            if path.is_file() && Self::is_month_file(&path) {
                files.push(path);
            }
        }

        files.sort();
        Ok(files)
    }

    fn is_month_file(path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };

        name.strip_prefix(FILE_PREFIX)
            .and_then(|rest| rest.strip_suffix(&format!(".{}", FILE_EXTENSION)))
            .map(|month| NaiveDate::parse_from_str(&format!("{}-01", month), "%Y-%m-%d").is_ok())
            .unwrap_or(false)
    }
}

impl Connection for CsvConnection {
    type EntryRepository = CsvEntryRepository;

    fn create_entry_repository(&self) -> Self::EntryRepository {
        CsvEntryRepository::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::csv::test_utils::TestEnvironment;

    #[test]
    fn test_month_file_path() {
        let env = TestEnvironment::new().unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();

        let path = env.connection.month_file_path(date);
        assert_eq!(path, env.base_directory().join("cash_2024-01.csv"));
    }

    #[test]
    fn test_list_month_files_ignores_other_files() {
        let env = TestEnvironment::new().unwrap();
        for name in ["cash_2024-02.csv", "cash_2024-01.csv", "cash_2024-01.csv.tmp", "notes.csv", "cash_latest.csv"] {
            fs::write(env.base_directory().join(name), "").unwrap();
        }

        let files = env.connection.list_month_files().unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();

        assert_eq!(names, vec!["cash_2024-01.csv", "cash_2024-02.csv"]);
    }

    #[test]
    fn test_new_creates_missing_directory() {
        let env = TestEnvironment::new().unwrap();
        let nested = env.base_directory().join("nested").join("data");

        let connection = CsvConnection::new(&nested).unwrap();
        assert!(nested.is_dir());
        assert_eq!(connection.base_directory(), nested.as_path());
    }
}
