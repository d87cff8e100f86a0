// Rust guideline compliant 2026-02-23

//! Risk Classifier component for the supply-chain risk pipeline.
//!
//! [`RiskClassifier`] implements the `domain::RiskEvaluator` port by asking an
//! injected `domain::Model` adapter for a class index and mapping it to a
//! verdict with its canned rationale. [`ModelGateway`] wraps a model loader so
//! the artifact is read once per process.

mod gateway;

pub use gateway::ModelGateway;

use domain::{FeatureRow, Model, ModelError, RiskAssessment, Verdict};

// ---------------------------------------------------------------------------
// RiskClassifier
// ---------------------------------------------------------------------------

/// Pipeline component that implements the `domain::RiskEvaluator` port.
///
/// Generic over any `Model` adapter; carries no model-specific logic.
#[derive(Debug)]
pub struct RiskClassifier<M: Model> {
    model: M,
}

impl<M: Model> RiskClassifier<M> {
    /// Create a classifier wrapping `model`.
    #[must_use]
    pub fn new(model: M) -> Self {
        Self { model }
    }

    /// Borrow the wrapped model.
    #[must_use]
    pub fn model(&self) -> &M {
        &self.model
    }
}

impl<M: Model> domain::RiskEvaluator for RiskClassifier<M> {
    /// Classify `row` and attach label and explanation.
    ///
    /// An index outside the known levels becomes `Verdict::Unknown` and is
    /// logged at `warn`; it is not an error.
    ///
    /// # Errors
    ///
    /// Propagates `ModelError` from the model unchanged.
    async fn evaluate(&self, row: &FeatureRow) -> Result<RiskAssessment, ModelError> {
        let class_index = self.model.classify(row).await?;
        let assessment =
            RiskAssessment::from_class_index(class_index, self.model.name(), self.model.version());
        if let Verdict::Unknown { class_index } = assessment.verdict {
            tracing::warn!(class_index, "risk_classifier.unknown_class");
        }
        tracing::debug!(
            class_index,
            label = assessment.label,
            model_name = %assessment.model_name,
            "risk_classifier.evaluated"
        );
        Ok(assessment)
    }
}

#[cfg(test)]
mod tests {
    use domain::{
        CustomerSegment, FeatureRow, Market, Model, ModelError, OrderInput, RiskClass,
        RiskEvaluator as _, ShippingMode, TransactionType, Verdict, assemble,
    };
    use std::cell::Cell;

    // ------------------------------------------------------------------
    // MockModel helper
    // ------------------------------------------------------------------

    struct MockModel {
        class_index: Result<i64, &'static str>,
        calls: Cell<u32>,
    }

    impl MockModel {
        fn returning(class_index: i64) -> Self {
            Self { class_index: Ok(class_index), calls: Cell::new(0) }
        }

        fn failing(reason: &'static str) -> Self {
            Self { class_index: Err(reason), calls: Cell::new(0) }
        }
    }

    impl Model for MockModel {
        async fn classify(&self, _row: &FeatureRow) -> Result<i64, ModelError> {
            self.calls.set(self.calls.get() + 1);
            self.class_index
                .map_err(|reason| ModelError::InferenceFailed { reason: reason.to_owned() })
        }

        fn name(&self) -> &str {
            "MOCK"
        }

        fn version(&self) -> &str {
            "v0"
        }
    }

    fn scenario_row() -> FeatureRow {
        assemble(OrderInput {
            transaction_type: TransactionType::Transfer,
            customer_segment: CustomerSegment::Consumer,
            market: Market::Us,
            order_region: "East".to_owned(),
            shipping_mode: ShippingMode::SameDay,
            discount_rate: 0.5,
            product_price: 200.0,
            quantity: 3,
            profit_per_order: -50.0,
            shipping_delay_days: 12.0,
        })
    }

    #[tokio::test]
    async fn each_known_index_maps_to_its_level() {
        for class in RiskClass::ALL {
            let classifier = super::RiskClassifier::new(MockModel::returning(class.index()));
            let a = classifier.evaluate(&scenario_row()).await.unwrap();
            assert_eq!(a.verdict, Verdict::Risk { class });
            assert_eq!(a.label, class.label());
            assert_eq!(a.explanation, class.explanation());
        }
    }

    #[tokio::test]
    async fn high_index_yields_high_risk_rationale() {
        let classifier = super::RiskClassifier::new(MockModel::returning(2));
        let a = classifier.evaluate(&scenario_row()).await.unwrap();
        assert_eq!(a.label, "🔴 High Risk");
        assert!(a.explanation.starts_with("The model predicts **High Risk** because:"));
        assert_eq!(a.model_name, "MOCK");
        assert_eq!(a.model_version, "v0");
    }

    #[tokio::test]
    async fn unexpected_index_is_unknown_not_error() {
        for index in [-1, 3, 99] {
            let classifier = super::RiskClassifier::new(MockModel::returning(index));
            let a = classifier.evaluate(&scenario_row()).await.unwrap();
            assert_eq!(a.verdict, Verdict::Unknown { class_index: index });
            assert_eq!(a.label, "Unknown");
        }
    }

    #[tokio::test]
    async fn inference_error_propagates() {
        let classifier = super::RiskClassifier::new(MockModel::failing("malformed row"));
        let err = classifier.evaluate(&scenario_row()).await.unwrap_err();
        assert!(matches!(err, ModelError::InferenceFailed { .. }));
        assert!(!err.is_fatal());
        assert_eq!(classifier.model().calls.get(), 1, "no retry on failure");
    }
}
