// Rust guideline compliant 2026-02-23

//! Runtime configuration for the `scrs` binary.
//!
//! Values come from command-line flags with environment fallbacks and are
//! validated through [`AppConfig::builder`].

use std::convert::Infallible;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Prefix that selects the SQLite history backend.
const SQLITE_PREFIX: &str = "sqlite:";

/// Errors from configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The supplied configuration is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Human-readable description of the problem.
        reason: String,
    },
}

/// Where prediction history is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryLocation {
    /// A CSV file path.
    Csv(PathBuf),
    /// A `sqlite:` connection URL.
    Sqlite(String),
}

impl FromStr for HistoryLocation {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s.starts_with(SQLITE_PREFIX) {
            Self::Sqlite(s.to_owned())
        } else {
            Self::Csv(PathBuf::from(s))
        })
    }
}

impl fmt::Display for HistoryLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv(path) => write!(f, "{}", path.display()),
            Self::Sqlite(url) => f.write_str(url),
        }
    }
}

/// Validated configuration shared by every subcommand.
#[derive(Debug)]
pub struct AppConfig {
    /// Path of the model artifact.
    pub model_path: PathBuf,
    /// History backend and its location.
    pub history: HistoryLocation,
}

/// Builder for [`AppConfig`].
///
/// Obtain via [`AppConfig::builder`]; finalize with [`build`](Self::build).
#[derive(Debug)]
pub struct AppConfigBuilder {
    model_path: PathBuf,
    history: HistoryLocation,
}

impl AppConfig {
    /// Create a builder. `model_path` is the only required parameter.
    ///
    /// Default value: `history = history.csv`.
    #[must_use]
    pub fn builder(model_path: impl Into<PathBuf>) -> AppConfigBuilder {
        AppConfigBuilder {
            model_path: model_path.into(),
            history: HistoryLocation::Csv(PathBuf::from(history::DEFAULT_HISTORY_FILE)),
        }
    }
}

impl AppConfigBuilder {
    /// Override the history location.
    #[must_use]
    pub fn history(mut self, history: HistoryLocation) -> Self {
        self.history = history;
        self
    }

    /// Validate and build the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidConfig`] when a path or URL is empty.
    #[must_use = "the Result must be checked; use ? or unwrap"]
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        if self.model_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidConfig {
                reason: "model path must not be empty".to_owned(),
            });
        }
        match &self.history {
            HistoryLocation::Csv(path) if path.as_os_str().is_empty() => {
                return Err(ConfigError::InvalidConfig {
                    reason: "history path must not be empty".to_owned(),
                });
            }
            HistoryLocation::Sqlite(url) if url.len() == SQLITE_PREFIX.len() => {
                return Err(ConfigError::InvalidConfig {
                    reason: "sqlite history URL needs a database after `sqlite:`".to_owned(),
                });
            }
            _ => {}
        }
        Ok(AppConfig { model_path: self.model_path, history: self.history })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_csv_history() {
        let config = AppConfig::builder("final_pipeline.json").build().unwrap();
        assert_eq!(config.model_path, PathBuf::from("final_pipeline.json"));
        assert_eq!(config.history, HistoryLocation::Csv(PathBuf::from("history.csv")));
    }

    #[test]
    fn sqlite_prefix_selects_sqlite() {
        let loc: HistoryLocation = "sqlite:history.db".parse().unwrap();
        assert_eq!(loc, HistoryLocation::Sqlite("sqlite:history.db".to_owned()));
        assert_eq!(loc.to_string(), "sqlite:history.db");
        let csv: HistoryLocation = "data/history.csv".parse().unwrap();
        assert_eq!(csv, HistoryLocation::Csv(PathBuf::from("data/history.csv")));
    }

    #[test]
    fn empty_paths_are_rejected() {
        assert!(AppConfig::builder("").build().is_err());
        assert!(
            AppConfig::builder("m.json")
                .history(HistoryLocation::Csv(PathBuf::new()))
                .build()
                .is_err()
        );
        let err = AppConfig::builder("m.json")
            .history(HistoryLocation::Sqlite("sqlite:".to_owned()))
            .build()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid configuration: sqlite history URL needs a database after `sqlite:`"
        );
    }
}
