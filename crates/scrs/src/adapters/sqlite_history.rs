// Rust guideline compliant 2026-02-27

//! SQLite adapter for the `HistoryStore` port.
//!
//! Persists history records to a SQLite file via `sqlx`. Selected with a
//! `sqlite:` history location; the CSV adapter stays the default. Insertion
//! order is the autoincrement `id`, so `read_all` returns records oldest first.
//!
//! The database is created by the first `append` only. Reading or clearing an
//! absent database succeeds without creating it, and `clear` removes the file.

use std::ffi::OsString;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use domain::{HistoryRecord, HistoryStore, StoreError};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tokio::sync::Mutex;

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS history (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    timestamp  TEXT    NOT NULL,
    prediction TEXT    NOT NULL
)";

/// `HistoryStore` adapter backed by a SQLite database via `sqlx`.
///
/// Holds at most one open pool; it is opened on demand and closed by `clear`.
#[derive(Debug)]
pub struct SqliteHistoryStore {
    options: SqliteConnectOptions,
    /// Database file on disk; `None` for in-memory databases.
    file: Option<PathBuf>,
    pool: Mutex<Option<SqlitePool>>,
    location: String,
}

impl SqliteHistoryStore {
    /// Parse `db_url` without touching the database.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` when the URL is not a valid SQLite location.
    pub fn new(db_url: &str) -> Result<Self, sqlx::Error> {
        let options = db_url.parse::<SqliteConnectOptions>()?;
        let in_memory = db_url.contains(":memory:") || db_url.contains("mode=memory");
        let file = (!in_memory).then(|| options.get_filename().to_path_buf());
        Ok(Self { options, file, pool: Mutex::new(None), location: db_url.to_owned() })
    }

    fn unavailable(&self, op: &str, e: &impl fmt::Display) -> StoreError {
        tracing::error!(location = %self.location, error = %e, "sqlite_history.{op}.failed");
        StoreError::Unavailable { location: self.location.clone(), reason: e.to_string() }
    }

    /// The open pool, connecting first when needed.
    ///
    /// With `create == false` an absent database yields `Ok(None)` and is not created.
    async fn pool(&self, create: bool) -> Result<Option<SqlitePool>, StoreError> {
        let mut guard = self.pool.lock().await;
        if let Some(pool) = guard.as_ref() {
            return Ok(Some(pool.clone()));
        }
        if !create && !self.exists().await? {
            return Ok(None);
        }
        let pool = self.connect().await.map_err(|e| self.unavailable("connect", &e))?;
        *guard = Some(pool.clone());
        Ok(Some(pool))
    }

    async fn exists(&self) -> Result<bool, StoreError> {
        match &self.file {
            Some(path) => {
                tokio::fs::try_exists(path).await.map_err(|e| self.unavailable("exists", &e))
            }
            None => Ok(false),
        }
    }

    async fn connect(&self) -> Result<SqlitePool, sqlx::Error> {
        // Single connection without idle expiry: an in-memory database lives
        // exactly as long as its connection.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(self.options.clone().create_if_missing(true))
            .await?;
        sqlx::query(CREATE_TABLE).execute(&pool).await?;
        tracing::info!(location = %self.location, "sqlite_history.opened");
        Ok(pool)
    }
}

/// `path` with `suffix` appended to its file name (`history.db-wal`).
fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

impl HistoryStore for SqliteHistoryStore {
    /// Insert one row after all existing ones, creating the database if absent.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` on any `sqlx` error.
    async fn append(&self, record: HistoryRecord) -> Result<(), StoreError> {
        let Some(pool) = self.pool(true).await? else {
            return Err(self.unavailable("append", &"database was not created"));
        };
        sqlx::query("INSERT INTO history (timestamp, prediction) VALUES (?, ?)")
            .bind(record.formatted_timestamp())
            .bind(&record.prediction)
            .execute(&pool)
            .await
            .map_err(|e| self.unavailable("append", &e))?;
        Ok(())
    }

    /// Every row ordered by insertion; empty when the database does not exist.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` on any `sqlx` error, or
    /// `StoreError::Corrupt` when a stored timestamp cannot be parsed.
    async fn read_all(&self) -> Result<Vec<HistoryRecord>, StoreError> {
        let Some(pool) = self.pool(false).await? else {
            return Ok(vec![]);
        };
        let rows: Vec<(String, String)> =
            sqlx::query_as("SELECT timestamp, prediction FROM history ORDER BY id")
                .fetch_all(&pool)
                .await
                .map_err(|e| self.unavailable("read_all", &e))?;
        rows.into_iter()
            .zip(1_u64..)
            .map(|((ts, prediction), row)| -> Result<HistoryRecord, StoreError> {
                let timestamp =
                    HistoryRecord::parse_timestamp(&ts).map_err(|e| StoreError::Corrupt {
                        location: self.location.clone(),
                        line: row,
                        reason: format!("bad timestamp `{ts}`: {e}"),
                    })?;
                Ok(HistoryRecord { timestamp, prediction })
            })
            .collect()
    }

    /// Close the database and delete its file. Succeeds when already absent.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` when the rows or files cannot be removed.
    async fn clear(&self) -> Result<(), StoreError> {
        let mut guard = self.pool.lock().await;
        if let Some(pool) = guard.take() {
            sqlx::query("DELETE FROM history")
                .execute(&pool)
                .await
                .map_err(|e| self.unavailable("clear", &e))?;
            pool.close().await;
        }
        if let Some(path) = &self.file {
            for file in [path.clone(), with_suffix(path, "-wal"), with_suffix(path, "-shm")] {
                match tokio::fs::remove_file(&file).await {
                    Ok(()) => {}
                    Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                    Err(e) => return Err(self.unavailable("clear", &e)),
                }
            }
        }
        tracing::info!(location = %self.location, "sqlite_history.cleared");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
