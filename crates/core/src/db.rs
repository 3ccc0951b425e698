//! Database connection management.
//!
//! [`Store`] owns the SQLite connection pool shared by every service. Connections are checked
//! out per call and go back to the pool when the call's future completes or is dropped, whatever
//! the outcome. Schema changes ship as embedded migrations under `crates/core/migrations/`.

use crate::config::CoreConfig;
use crate::error::CoreResult;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use sqlx::{Sqlite, Transaction};
use std::str::FromStr;
use std::time::Duration;

/// How long a connection waits for another connection's write lock before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Shared handle to the record store.
///
/// Cheap to clone; all clones share one pool.
#[derive(Clone, Debug)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Open the pool described by `cfg` and bring the schema up to date.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Database` if the URL is malformed or the database cannot be opened,
    /// and `CoreError::Migration` if a migration fails.
    pub async fn connect(cfg: &CoreConfig) -> CoreResult<Self> {
        let mut options = SqliteConnectOptions::from_str(cfg.database_url())?
            .create_if_missing(true)
            .busy_timeout(BUSY_TIMEOUT);

        let mut pool_options = SqlitePoolOptions::new().max_connections(cfg.max_connections());
        if cfg.is_in_memory() {
            // Dropping the last connection would drop the database with it.
            pool_options = pool_options
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        } else {
            // Readers keep going while a writer holds the lock.
            options = options.journal_mode(SqliteJournalMode::Wal);
        }

        let pool = pool_options.connect_with(options).await?;
        let store = Self { pool };
        store.migrate().await?;

        tracing::info!(
            max_connections = cfg.max_connections(),
            "connected to record store"
        );
        Ok(store)
    }

    /// Apply any pending migrations.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Migration` if a migration cannot be applied.
    pub async fn migrate(&self) -> CoreResult<()> {
        MIGRATOR.run(&self.pool).await?;
        Ok(())
    }

    /// Start a read transaction. Dropping it without calling `commit` rolls it back.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Database` if no connection can be acquired.
    pub async fn begin(&self) -> CoreResult<Transaction<'static, Sqlite>> {
        Ok(self.pool.begin().await?)
    }

    /// Start a transaction that will write.
    ///
    /// Opens with `BEGIN IMMEDIATE` so the write lock is held before the first read. Concurrent
    /// writers queue on the busy timeout; a deferred transaction that reads first would get
    /// `SQLITE_BUSY` at its first write.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Database` if no connection can be acquired or the lock is not
    /// granted within the busy timeout.
    pub async fn begin_write(&self) -> CoreResult<Transaction<'static, Sqlite>> {
        Ok(self.pool.begin_with("BEGIN IMMEDIATE").await?)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the pool. Later calls fail with `PoolClosed`.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
