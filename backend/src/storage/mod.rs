//! # Storage Module
//!
//! Handles persistence of daily cash entries.
//!
//! Two interchangeable backends implement [`EntryStorage`]:
//!
//! - **SQLite** (default): a header table keyed by `(date, cashier)` holding
//!   the adjustments and a detail table keyed by `(date, cashier, denomination)`
//!   holding the counts. Upserts run in a single transaction.
//! - **CSV**: one `cash_<YYYY-MM>.csv` file per month, one wide row per
//!   `(date, cashier)`. Upserts rewrite the whole month file through a
//!   temporary file. Not safe for concurrent writers to the same month.
//!
//! [`migrate`] copies entries from one backend into another.

pub mod csv;
pub mod migrate;
pub mod sqlite;
pub mod traits;

pub use csv::{CsvConnection, CsvEntryRepository};
pub use sqlite::{DbConnection, SqliteEntryRepository};
pub use traits::*;
