// Rust guideline compliant 2026-02-23

//! Shared domain types for the supply-chain risk pipeline.
//!
//! Defines the order/feature schema and the Feature Assembler ([`assemble`]),
//! the risk levels and their canned rationales, history records, and the
//! hexagonal port traits: [`Model`], [`RiskEvaluator`], and [`HistoryStore`].
//! All pipeline components depend on this crate.

mod features;
mod history;
mod risk;

pub use features::{
    CustomerSegment, FeatureRow, FeatureValue, Market, OrderInput, ParseFieldError, ShippingMode,
    TransactionType, assemble,
};
pub use history::{HistoryRecord, TIMESTAMP_FORMAT, TIMESTAMP_PARSE_FORMAT};
pub use risk::{RiskAssessment, RiskClass, UNKNOWN_LABEL, Verdict};

/// Errors from the model hexagonal port.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// The model artifact is missing, unreadable, or malformed. Fatal: no
    /// prediction is possible until the artifact is fixed.
    #[error("model unavailable: {reason}")]
    Unavailable {
        /// Human-readable description.
        reason: String,
    },
    /// A single inference failed. The request fails; the process keeps serving.
    #[error("inference failed: {reason}")]
    InferenceFailed {
        /// Human-readable description.
        reason: String,
    },
}

impl ModelError {
    /// `true` when no further prediction can succeed in this process.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}

/// Errors from the history-store hexagonal port.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing storage exists but could not be read or written.
    #[error("history store unavailable at {location}: {reason}")]
    Unavailable {
        /// Path or URL of the store.
        location: String,
        /// Human-readable description.
        reason: String,
    },
    /// The backing storage exists but is not well-formed.
    #[error("history store corrupt at {location} (line {line}): {reason}")]
    Corrupt {
        /// Path or URL of the store.
        location: String,
        /// 1-based line (or row) where the problem was found.
        line: u64,
        /// Human-readable description.
        reason: String,
    },
}

/// Hexagonal port: an opaque pre-trained classifier.
///
/// Implemented by concrete model adapters (e.g. `ScorecardModel`). Returns the
/// raw class index; mapping to a risk level is the caller's job.
#[expect(
    async_fn_in_trait,
    reason = "no dyn dispatch needed; internal workspace only"
)]
pub trait Model {
    /// Classify one feature row.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::Unavailable` if the model cannot be loaded, or
    /// `ModelError::InferenceFailed` if this row cannot be scored.
    async fn classify(&self, row: &FeatureRow) -> Result<i64, ModelError>;

    /// Name of this model (e.g. `"SCORECARD"`).
    fn name(&self) -> &str;

    /// Version string of this model.
    fn version(&self) -> &str;
}

/// Hexagonal port: feature row in, risk verdict with rationale out.
#[expect(
    async_fn_in_trait,
    reason = "no dyn dispatch needed; internal workspace only"
)]
pub trait RiskEvaluator {
    /// Evaluate one feature row.
    ///
    /// Class indices outside the known levels yield `Verdict::Unknown`, not an error.
    ///
    /// # Errors
    ///
    /// Propagates [`ModelError`] from the underlying model.
    async fn evaluate(&self, row: &FeatureRow) -> Result<RiskAssessment, ModelError>;
}

/// Hexagonal port: append-only log of past predictions.
///
/// Pipeline code depends exclusively on this trait -- never on a concrete
/// adapter. Implementations own their location and existence checks.
#[expect(
    async_fn_in_trait,
    reason = "no dyn dispatch needed; internal workspace only"
)]
pub trait HistoryStore {
    /// Append `record` after every existing record, creating the store if absent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when existing history cannot be read back intact
    /// or the write fails. Prior records are never dropped silently.
    async fn append(&self, record: HistoryRecord) -> Result<(), StoreError>;

    /// Every record in insertion order; empty when the store does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] for any failure other than confirmed absence.
    async fn read_all(&self) -> Result<Vec<HistoryRecord>, StoreError>;

    /// Delete the whole store. Succeeds when it is already absent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] when deletion fails.
    async fn clear(&self) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn make_row() -> FeatureRow {
        assemble(OrderInput {
            transaction_type: TransactionType::Debit,
            customer_segment: CustomerSegment::Consumer,
            market: Market::Us,
            order_region: "East".to_owned(),
            shipping_mode: ShippingMode::Standard,
            discount_rate: 0.1,
            product_price: 100.0,
            quantity: 1,
            profit_per_order: 10.0,
            shipping_delay_days: 0.0,
        })
    }

    #[test]
    fn model_error_variants() {
        let e1 = ModelError::Unavailable { reason: "missing".to_owned() };
        let e2 = ModelError::InferenceFailed { reason: "nan".to_owned() };
        assert_eq!(e1.to_string(), "model unavailable: missing");
        assert_eq!(e2.to_string(), "inference failed: nan");
        assert!(e1.is_fatal());
        assert!(!e2.is_fatal());
    }

    #[test]
    fn store_error_variants() {
        let e1 = StoreError::Unavailable {
            location: "history.csv".to_owned(),
            reason: "permission denied".to_owned(),
        };
        let e2 = StoreError::Corrupt {
            location: "history.csv".to_owned(),
            line: 3,
            reason: "bad timestamp".to_owned(),
        };
        assert_eq!(
            e1.to_string(),
            "history store unavailable at history.csv: permission denied"
        );
        assert_eq!(
            e2.to_string(),
            "history store corrupt at history.csv (line 3): bad timestamp"
        );
    }

    /// Verify that minimal implementations of every port compile and behave.
    #[tokio::test]
    async fn port_trait_struct_impl() {
        struct AllPorts {
            records: RefCell<Vec<HistoryRecord>>,
        }

        impl Model for AllPorts {
            async fn classify(&self, _row: &FeatureRow) -> Result<i64, ModelError> {
                Ok(1)
            }

            fn name(&self) -> &str {
                "minimal"
            }

            fn version(&self) -> &str {
                "0"
            }
        }

        impl RiskEvaluator for AllPorts {
            async fn evaluate(&self, row: &FeatureRow) -> Result<RiskAssessment, ModelError> {
                let index = self.classify(row).await?;
                Ok(RiskAssessment::from_class_index(index, self.name(), self.version()))
            }
        }

        impl HistoryStore for AllPorts {
            async fn append(&self, record: HistoryRecord) -> Result<(), StoreError> {
                self.records.borrow_mut().push(record);
                Ok(())
            }

            async fn read_all(&self) -> Result<Vec<HistoryRecord>, StoreError> {
                Ok(self.records.borrow().clone())
            }

            async fn clear(&self) -> Result<(), StoreError> {
                self.records.borrow_mut().clear();
                Ok(())
            }
        }

        let ports = AllPorts { records: RefCell::new(vec![]) };
        let assessment = ports.evaluate(&make_row()).await.unwrap();
        assert_eq!(assessment.verdict.risk_class(), Some(RiskClass::Medium));

        ports.append(HistoryRecord::now(assessment.label)).await.unwrap();
        assert_eq!(ports.read_all().await.unwrap().len(), 1);
        ports.clear().await.unwrap();
        assert!(ports.read_all().await.unwrap().is_empty());
    }
}
