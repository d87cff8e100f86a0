// Rust guideline compliant 2026-02-23

//! Single-row CSV export of the feature row behind one prediction.

use std::io;
use std::path::Path;

use domain::FeatureRow;

/// File name offered for a prediction export.
pub const EXPORT_FILE_NAME: &str = "prediction_result.csv";

/// Errors from writing an export file.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The row could not be encoded as CSV.
    #[error("export encoding failed: {0}")]
    Encode(#[from] csv::Error),
    /// The file could not be written.
    #[error("export write to {path} failed: {source}")]
    Write {
        /// Destination path.
        path: String,
        /// The underlying I/O error.
        source: io::Error,
    },
}

/// Encode `row` as a header line of column names plus one value line.
///
/// # Errors
///
/// Returns [`ExportError::Encode`] if CSV encoding fails.
pub fn render_feature_row(row: &FeatureRow) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(vec![]);
    writer.write_record(FeatureRow::COLUMNS)?;
    writer.write_record(row.values().iter().map(ToString::to_string))?;
    writer.into_inner().map_err(|e| ExportError::Encode(csv::Error::from(e.into_error())))
}

/// Write the export for `row` to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns [`ExportError::Encode`] on encoding failure, or
/// [`ExportError::Write`] when the file cannot be written.
pub async fn write_feature_row(path: &Path, row: &FeatureRow) -> Result<(), ExportError> {
    let bytes = render_feature_row(row)?;
    tokio::fs::write(path, bytes).await.map_err(|source| ExportError::Write {
        path: path.display().to_string(),
        source,
    })?;
    tracing::info!(path = %path.display(), "export.written");
    Ok(())
}
