//! Flat-file storage backend: one wide CSV file per calendar month.

pub mod connection;
pub mod entry_repository;

#[cfg(test)]
pub mod test_utils;

pub use connection::CsvConnection;
pub use entry_repository::CsvEntryRepository;
