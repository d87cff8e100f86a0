// Rust guideline compliant 2026-02-23

//! Runtime selection between the CSV and SQLite `HistoryStore` adapters.

use domain::{HistoryRecord, HistoryStore, StoreError};
use history::CsvHistoryStore;

use super::sqlite_history::SqliteHistoryStore;
use crate::config::HistoryLocation;

/// The configured history backend.
///
/// The port uses `async fn` and static dispatch, so backends are chosen
/// through this enum rather than a trait object.
#[derive(Debug)]
pub enum HistoryBackend {
    Csv(CsvHistoryStore),
    Sqlite(SqliteHistoryStore),
}

impl HistoryBackend {
    /// Open the backend named by `location`.
    ///
    /// Nothing is touched on disk here; both backends create their storage
    /// on the first append.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` when the SQLite URL cannot be parsed.
    pub fn open(location: &HistoryLocation) -> Result<Self, StoreError> {
        match location {
            HistoryLocation::Csv(path) => Ok(Self::Csv(CsvHistoryStore::new(path.clone()))),
            HistoryLocation::Sqlite(url) => SqliteHistoryStore::new(url)
                .map(Self::Sqlite)
                .map_err(|e| StoreError::Unavailable {
                    location: url.clone(),
                    reason: e.to_string(),
                }),
        }
    }
}

impl HistoryStore for HistoryBackend {
    async fn append(&self, record: HistoryRecord) -> Result<(), StoreError> {
        match self {
            Self::Csv(store) => store.append(record).await,
            Self::Sqlite(store) => store.append(record).await,
        }
    }

    async fn read_all(&self) -> Result<Vec<HistoryRecord>, StoreError> {
        match self {
            Self::Csv(store) => store.read_all().await,
            Self::Sqlite(store) => store.read_all().await,
        }
    }

    async fn clear(&self) -> Result<(), StoreError> {
        match self {
            Self::Csv(store) => store.clear().await,
            Self::Sqlite(store) => store.clear().await,
        }
    }
}
