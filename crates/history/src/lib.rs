// Rust guideline compliant 2026-02-23

//! History crate: durable prediction log, label analytics, and the per-result export.
//!
//! [`CsvHistoryStore`] implements the `domain::HistoryStore` port on a plain
//! CSV file. [`label_distribution`] aggregates a history for charting.
//! [`write_feature_row`] produces the single-row `prediction_result.csv` export.

mod analytics;
mod csv_store;
mod export;

pub use analytics::{LabelCount, label_distribution};
pub use csv_store::{CsvHistoryStore, DEFAULT_HISTORY_FILE, HISTORY_HEADER};
pub use export::{EXPORT_FILE_NAME, ExportError, render_feature_row, write_feature_row};
