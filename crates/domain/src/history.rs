// Rust guideline compliant 2026-02-23

//! One logged past prediction.

use chrono::{Local, NaiveDateTime, SubsecRound as _};

/// Timestamp layout used by every history backend.
///
/// Microsecond precision; parsing also accepts a missing fraction.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Layout accepted when reading timestamps back.
pub const TIMESTAMP_PARSE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// A single history entry: when a prediction was made and the label it got.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRecord {
    /// Local wall-clock time of the prediction.
    pub timestamp: NaiveDateTime,
    /// Display label of the verdict (e.g. `"🔴 High Risk"` or `"Unknown"`).
    pub prediction: String,
}

impl HistoryRecord {
    /// Create a record stamped with the current local time.
    ///
    /// Truncated to microseconds so it survives a round trip through
    /// [`TIMESTAMP_FORMAT`] unchanged.
    #[must_use]
    pub fn now(prediction: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now().naive_local().trunc_subsecs(6),
            prediction: prediction.into(),
        }
    }

    /// Timestamp rendered with [`TIMESTAMP_FORMAT`].
    #[must_use]
    pub fn formatted_timestamp(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }

    /// Parse a timestamp written by any history backend.
    ///
    /// # Errors
    ///
    /// Returns `chrono::ParseError` when `s` does not match the layout.
    pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime, chrono::ParseError> {
        NaiveDateTime::parse_from_str(s, TIMESTAMP_PARSE_FORMAT)
    }
}
