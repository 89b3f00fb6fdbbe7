use async_trait::async_trait;
use chrono::NaiveDate;
use csv::{Reader, StringRecord, Writer};
use std::fs::{self, OpenOptions};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::connection::CsvConnection;
use crate::domain::models::{Adjustments, DailyCashEntry, Denomination, DenominationCounts};
use crate::storage::traits::{EntryStorage, StorageError, StorageResult};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_COLUMN: &str = "date";
const CASHIER_COLUMN: &str = "cashier";
const PARKING_COLUMN: &str = "parking";
const SAVING_COLUMN: &str = "saving";
const DEBT_CREDIT_COLUMN: &str = "debt_credit";

/// Column positions resolved from a month file's header row
struct ColumnLayout {
    date: usize,
    cashier: usize,
    denominations: Vec<(Denomination, usize)>,
    parking: usize,
    saving: usize,
    debt_credit: usize,
}

impl ColumnLayout {
    fn from_headers(path: &Path, headers: &StringRecord) -> StorageResult<Self> {
        let position = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| StorageError::corrupt_file(path, format!("missing column '{}'", name)))
        };

        for header in headers.iter() {
            let header = header.trim();
            let known = [DATE_COLUMN, CASHIER_COLUMN, PARKING_COLUMN, SAVING_COLUMN, DEBT_CREDIT_COLUMN]
                .contains(&header)
                || Denomination::ALL.iter().any(|d| d.value().to_string() == header);
            if !known {
                return Err(StorageError::corrupt_file(path, format!("unknown column '{}'", header)));
            }
        }

        let mut denominations = Vec::with_capacity(Denomination::ALL.len());
        for denomination in Denomination::ALL {
            denominations.push((denomination, position(denomination.value().to_string().as_str())?));
        }

        Ok(Self {
            date: position(DATE_COLUMN)?,
            cashier: position(CASHIER_COLUMN)?,
            denominations,
            parking: position(PARKING_COLUMN)?,
            saving: position(SAVING_COLUMN)?,
            debt_credit: position(DEBT_CREDIT_COLUMN)?,
        })
    }
}

/// CSV-based daily cash entry repository
///
/// Each month file is rewritten in full on every upsert. Two writers
/// updating the same month at the same time can lose one of the updates.
#[derive(Clone)]
pub struct CsvEntryRepository {
    connection: CsvConnection,
}

impl CsvEntryRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    /// Header row: date, cashier, one column per denomination, then the adjustments
    fn header_row() -> Vec<String> {
        let mut header = vec![DATE_COLUMN.to_string(), CASHIER_COLUMN.to_string()];
        header.extend(Denomination::ALL.iter().map(|d| d.value().to_string()));
        header.extend([PARKING_COLUMN, SAVING_COLUMN, DEBT_CREDIT_COLUMN].map(String::from));
        header
    }

    fn raw_field<'r>(path: &Path, record: &'r StringRecord, index: usize) -> StorageResult<&'r str> {
        record
            .get(index)
            .ok_or_else(|| StorageError::corrupt_file(path, format!("row is missing field {}", index)))
    }

    /// Date and number fields tolerate surrounding whitespace
    fn field<'r>(path: &Path, record: &'r StringRecord, index: usize) -> StorageResult<&'r str> {
        Self::raw_field(path, record, index).map(str::trim)
    }

    fn parse_number<T: std::str::FromStr>(path: &Path, raw: &str, column: &str) -> StorageResult<T> {
        raw.parse::<T>().map_err(|_| {
            StorageError::corrupt_file(path, format!("invalid {} value '{}'", column, raw))
        })
    }

    fn parse_record(path: &Path, layout: &ColumnLayout, record: &StringRecord) -> StorageResult<DailyCashEntry> {
        let raw_date = Self::field(path, record, layout.date)?;
        let date = NaiveDate::parse_from_str(raw_date, DATE_FORMAT)
            .map_err(|_| StorageError::corrupt_file(path, format!("invalid date '{}'", raw_date)))?;

        let mut counts = DenominationCounts::zero();
        for (denomination, index) in &layout.denominations {
            let raw = Self::field(path, record, *index)?;
            let count = Self::parse_number::<u32>(path, raw, &denomination.value().to_string())?;
            counts.set(*denomination, count);
        }

        Ok(DailyCashEntry {
            date,
            cashier: Self::raw_field(path, record, layout.cashier)?.to_string(),
            counts,
            adjustments: Adjustments {
                parking: Self::parse_number(path, Self::field(path, record, layout.parking)?, PARKING_COLUMN)?,
                saving: Self::parse_number(path, Self::field(path, record, layout.saving)?, SAVING_COLUMN)?,
                debt_credit: Self::parse_number(
                    path,
                    Self::field(path, record, layout.debt_credit)?,
                    DEBT_CREDIT_COLUMN,
                )?,
            },
        })
    }

    /// Read every entry stored in one month file; a missing file holds no entries
    fn read_month_file(&self, path: &Path) -> StorageResult<Vec<DailyCashEntry>> {
        if !path.exists() {
            return Ok(Vec::new());
        }

        let mut csv_reader = Reader::from_path(path)?;
        let headers = csv_reader.headers()?.clone();
        let layout = ColumnLayout::from_headers(path, &headers)?;

        let mut entries = Vec::new();
        for result in csv_reader.records() {
            let record = result?;
            entries.push(Self::parse_record(path, &layout, &record)?);
        }

        Ok(entries)
    }

    fn write_records(temp_path: &Path, entries: &[DailyCashEntry]) -> StorageResult<()> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(temp_path)?;

        let mut csv_writer = Writer::from_writer(BufWriter::new(file));
        csv_writer.write_record(Self::header_row())?;

        for entry in entries {
            let mut record = vec![entry.date.format(DATE_FORMAT).to_string(), entry.cashier.clone()];
            record.extend(entry.counts.iter().map(|(_, count)| count.to_string()));
            record.push(entry.adjustments.parking.to_string());
            record.push(entry.adjustments.saving.to_string());
            record.push(entry.adjustments.debt_credit.to_string());
            csv_writer.write_record(&record)?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Write a month file through a temporary file renamed over the target.
    ///
    /// On failure the month file is untouched and the temporary file removed.
    fn write_month_file(&self, path: &Path, entries: &[DailyCashEntry]) -> StorageResult<()> {
        let temp_path = temp_path_for(path);

        let result = Self::write_records(&temp_path, entries)
            .and_then(|()| fs::rename(&temp_path, path).map_err(StorageError::from));

        if let Err(e) = &result {
            warn!("Failed to write {}: {}", path.display(), e);
            if temp_path.is_file() {
                let _ = fs::remove_file(&temp_path);
            }
        }

        result
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

fn sort_entries(entries: &mut [DailyCashEntry]) {
    entries.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.cashier.cmp(&b.cashier)));
}

#[async_trait]
impl EntryStorage for CsvEntryRepository {
    async fn upsert_daily_entry(&self, entry: &DailyCashEntry) -> StorageResult<()> {
        let path = self.connection.month_file_path(entry.date);
        info!("Storing cash entry for {} / {} in {}", entry.date, entry.cashier, path.display());

        let mut entries = self.read_month_file(&path)?;
        entries.retain(|e| !(e.date == entry.date && e.cashier == entry.cashier));
        entries.push(entry.clone());
        sort_entries(&mut entries);

        self.write_month_file(&path, &entries)
    }

    async fn load_entry(&self, date: NaiveDate, cashier: &str) -> StorageResult<Option<DailyCashEntry>> {
        let path = self.connection.month_file_path(date);
        let entries = self.read_month_file(&path)?;

        Ok(entries
            .into_iter()
            .find(|e| e.date == date && e.cashier == cashier))
    }

    async fn load_all(&self) -> StorageResult<Vec<DailyCashEntry>> {
        let mut entries = Vec::new();
        for path in self.connection.list_month_files()? {
            entries.extend(self.read_month_file(&path)?);
        }
        sort_entries(&mut entries);

        debug!("Loaded {} cash entries from CSV", entries.len());
        Ok(entries)
    }
}
