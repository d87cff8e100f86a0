// Rust guideline compliant 2026-02-23

//! CSV file adapter for the `HistoryStore` port.
//!
//! The file holds a `Timestamp,Prediction` header followed by one record per
//! line, so any spreadsheet or diff tool can read it.
//!
//! # Read-modify-write semantics
//!
//! Every append reads the whole file, validates it, and rewrites it with the
//! new record at the end. There is no locking: two processes appending at the
//! same time can lose one update. Single-writer usage is assumed.

use std::io;
use std::path::{Path, PathBuf};

use domain::{HistoryRecord, HistoryStore, StoreError};

/// Header line of every history file.
pub const HISTORY_HEADER: [&str; 2] = ["Timestamp", "Prediction"];

/// Default history file name, relative to the working directory.
pub const DEFAULT_HISTORY_FILE: &str = "history.csv";

/// `HistoryStore` adapter backed by a single CSV file.
///
/// The file is created on the first append and removed by `clear`.
#[derive(Debug, Clone)]
pub struct CsvHistoryStore {
    path: PathBuf,
}

impl CsvHistoryStore {
    /// Create a store for `path`. Nothing is touched on disk until first use.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn unavailable(&self, reason: impl ToString) -> StoreError {
        StoreError::Unavailable { location: self.location(), reason: reason.to_string() }
    }

    /// Read and parse the file. `Ok(None)` only when the file does not exist.
    async fn load(&self) -> Result<Option<Vec<HistoryRecord>>, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => parse(&self.location(), &bytes).map(Some),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => {
                tracing::error!(path = %self.path.display(), error = %e, "csv_history.read.failed");
                Err(self.unavailable(e))
            }
        }
    }
}

impl HistoryStore for CsvHistoryStore {
    /// Rewrite the file with `record` appended.
    ///
    /// A missing file is initialized with the header first.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Corrupt` if the existing file cannot be parsed
    /// (the file is left untouched), or `StoreError::Unavailable` on I/O failure.
    async fn append(&self, record: HistoryRecord) -> Result<(), StoreError> {
        let mut records = match self.load().await? {
            Some(records) => records,
            None => {
                tracing::info!(path = %self.path.display(), "csv_history.init");
                vec![]
            }
        };
        records.push(record);
        let bytes = render(&records).map_err(|e| self.unavailable(e))?;
        tokio::fs::write(&self.path, bytes).await.map_err(|e| {
            tracing::error!(path = %self.path.display(), error = %e, "csv_history.write.failed");
            self.unavailable(e)
        })?;
        tracing::debug!(records = records.len(), "csv_history.appended");
        Ok(())
    }

    /// Parse every record in file order.
    ///
    /// A missing, zero-byte, or header-only file is an empty history.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Corrupt` for a malformed file, or
    /// `StoreError::Unavailable` for any I/O error other than `NotFound`.
    async fn read_all(&self) -> Result<Vec<HistoryRecord>, StoreError> {
        Ok(self.load().await?.unwrap_or_default())
    }

    /// Remove the file.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` when removal fails for any reason
    /// other than the file already being absent.
    async fn clear(&self) -> Result<(), StoreError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                tracing::info!(path = %self.path.display(), "csv_history.cleared");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.unavailable(e)),
        }
    }
}

fn corrupt(location: &str, line: u64, reason: impl ToString) -> StoreError {
    StoreError::Corrupt { location: location.to_owned(), line, reason: reason.to_string() }
}

/// Decode history file contents.
fn parse(location: &str, bytes: &[u8]) -> Result<Vec<HistoryRecord>, StoreError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(vec![]);
    }

    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(bytes);
    let header = reader.headers().map_err(|e| corrupt(location, 1, e))?;
    if header.iter().ne(HISTORY_HEADER) {
        return Err(corrupt(
            location,
            1,
            format!("expected header `Timestamp,Prediction`, found `{}`", header.iter().collect::<Vec<_>>().join(",")),
        ));
    }

    let mut records = vec![];
    for row in reader.records() {
        let row = row.map_err(|e| {
            let line = e.position().map_or(0, csv::Position::line);
            corrupt(location, line, e)
        })?;
        let line = row.position().map_or(0, csv::Position::line);
        let (Some(ts), Some(prediction)) = (row.get(0), row.get(1)) else {
            return Err(corrupt(location, line, "expected 2 fields"));
        };
        let timestamp = HistoryRecord::parse_timestamp(ts)
            .map_err(|e| corrupt(location, line, format!("bad timestamp `{ts}`: {e}")))?;
        records.push(HistoryRecord { timestamp, prediction: prediction.to_owned() });
    }
    Ok(records)
}

/// Encode the full history file, header included.
fn render(records: &[HistoryRecord]) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(vec![]);
    writer.write_record(HISTORY_HEADER)?;
    for record in records {
        writer.write_record([record.formatted_timestamp().as_str(), record.prediction.as_str()])?;
    }
    writer.into_inner().map_err(|e| csv::Error::from(e.into_error()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
