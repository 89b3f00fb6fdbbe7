//! SQLite storage backend built on sqlx.

pub mod connection;
pub mod entry_repository;

pub use connection::DbConnection;
pub use entry_repository::SqliteEntryRepository;
