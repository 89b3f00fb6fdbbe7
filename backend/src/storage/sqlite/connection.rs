use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool};
use std::sync::Arc;
use tracing::info;

use super::entry_repository::SqliteEntryRepository;
use crate::storage::traits::{Connection, StorageResult};

/// The database URL used when the configuration does not name one
pub const DEFAULT_DATABASE_URL: &str = "sqlite:cash.db";

/// DbConnection manages the SQLite pool and schema
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Create a new database connection, creating the database file and schema if needed
    pub async fn new(url: &str) -> StorageResult<Self> {
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            info!("Creating database {}", url);
            Sqlite::create_database(url).await?
        }

        let pool = SqlitePool::connect(url).await?;

        Self::setup_schema(&pool).await?;

        Ok(Self { pool: Arc::new(pool) })
    }

    /// Initialize a test database with a unique name
    #[cfg(test)]
    pub async fn init_test() -> StorageResult<Self> {
        let test_id = uuid::Uuid::new_v4().to_string();
        let db_url = format!("file:memdb_{}?mode=memory&cache=shared", test_id);

        Self::new(&db_url).await
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Set up the required database schema
    ///
    /// `cash_days` holds one row per `(date, cashier)` with the adjustments;
    /// `cash_counts` holds one row per denomination and references its day.
    async fn setup_schema(pool: &SqlitePool) -> StorageResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS cash_days (
                date TEXT NOT NULL,
                cashier TEXT NOT NULL,
                parking INTEGER NOT NULL,
                saving INTEGER NOT NULL,
                debt_credit INTEGER NOT NULL,
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                PRIMARY KEY (date, cashier)
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS cash_counts (
                date TEXT NOT NULL,
                cashier TEXT NOT NULL,
                denomination INTEGER NOT NULL,
                count INTEGER NOT NULL CHECK (count >= 0),
                PRIMARY KEY (date, cashier, denomination),
                FOREIGN KEY (date, cashier) REFERENCES cash_days (date, cashier) ON DELETE CASCADE
            );
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}

impl Connection for DbConnection {
    type EntryRepository = SqliteEntryRepository;

    fn create_entry_repository(&self) -> Self::EntryRepository {
        SqliteEntryRepository::new(self.clone())
    }
}
