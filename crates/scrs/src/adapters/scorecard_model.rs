// Rust guideline compliant 2026-02-23

//! Scorecard adapter for the `Model` port.
//!
//! Loads a fitted multinomial linear pipeline exported as JSON: per-column
//! standardization for numeric features, one weight per `Column=Value` pair
//! for categorical ones, and one intercept per class. The predicted class is
//! the `index` of the highest-scoring class; the first one wins on ties.
//!
//! Categorical values never seen in training contribute nothing, so free-text
//! fields such as `Order Region` accept any value.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use domain::{FeatureRow, FeatureValue, Model, ModelError};

/// Artifact file name looked up in the working directory by default.
pub const DEFAULT_MODEL_FILE: &str = "final_pipeline.json";

// ---------------------------------------------------------------------------
// Artifact schema
// ---------------------------------------------------------------------------

#[derive(Debug, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct Artifact {
    name: String,
    version: String,
    #[serde(default)]
    scaler: BTreeMap<String, Scaling>,
    classes: Vec<ClassSpec>,
}

#[derive(Debug, Clone, Copy, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct Scaling {
    mean: f64,
    scale: f64,
}

impl Scaling {
    const IDENTITY: Self = Self { mean: 0.0, scale: 1.0 };
}

#[derive(Debug, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct ClassSpec {
    index: i64,
    intercept: f64,
    #[serde(default)]
    weights: BTreeMap<String, f64>,
}

// ---------------------------------------------------------------------------
// Compiled model
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct NumericTerm {
    /// Position in `FeatureRow::COLUMNS`.
    column: usize,
    weight: f64,
    scaling: Scaling,
}

#[derive(Debug)]
struct CategoricalTerm {
    /// Position in `FeatureRow::COLUMNS`.
    column: usize,
    value: String,
    weight: f64,
}

#[derive(Debug)]
struct ClassScore {
    index: i64,
    intercept: f64,
    numeric: Vec<NumericTerm>,
    categorical: Vec<CategoricalTerm>,
}

/// `Model` adapter evaluating a validated scorecard artifact.
///
/// Immutable after loading; every check on the artifact happens up front so
/// that `classify` can only fail on non-finite arithmetic.
#[derive(Debug)]
pub struct ScorecardModel {
    name: String,
    version: String,
    classes: Vec<ClassScore>,
}

fn unavailable(reason: impl Into<String>) -> ModelError {
    ModelError::Unavailable { reason: reason.into() }
}

fn column_position(column: &str) -> Option<usize> {
    FeatureRow::COLUMNS.iter().position(|c| *c == column)
}

fn is_categorical(column: &str) -> bool {
    FeatureRow::CATEGORICAL_COLUMNS.contains(&column)
}

impl ScorecardModel {
    /// Read and validate the artifact at `path`.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::Unavailable` if the file is missing, unreadable,
    /// not valid JSON, or fails validation.
    pub fn from_path(path: &Path) -> Result<Self, ModelError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| unavailable(format!("cannot read {}: {e}", path.display())))?;
        Self::from_json(&text).map_err(|e| match e {
            ModelError::Unavailable { reason } => {
                unavailable(format!("{}: {reason}", path.display()))
            }
            other => other,
        })
    }

    /// Parse and validate an artifact held in memory.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::Unavailable` describing the first problem found.
    pub fn from_json(text: &str) -> Result<Self, ModelError> {
        let artifact: Artifact =
            serde_json::from_str(text).map_err(|e| unavailable(format!("invalid artifact: {e}")))?;
        Self::compile(artifact)
    }

    fn compile(artifact: Artifact) -> Result<Self, ModelError> {
        if artifact.classes.is_empty() {
            return Err(unavailable("artifact declares no classes"));
        }

        let mut scaling: BTreeMap<usize, Scaling> = BTreeMap::new();
        for (column, s) in &artifact.scaler {
            let position = column_position(column)
                .filter(|_| !is_categorical(column))
                .ok_or_else(|| unavailable(format!("scaler refers to unknown numeric column `{column}`")))?;
            if !s.mean.is_finite() || !s.scale.is_finite() || s.scale <= 0.0 {
                return Err(unavailable(format!(
                    "scaler for `{column}` needs a finite mean and a positive finite scale"
                )));
            }
            scaling.insert(position, *s);
        }

        let mut seen = HashSet::new();
        let mut classes = Vec::with_capacity(artifact.classes.len());
        for spec in artifact.classes {
            if !seen.insert(spec.index) {
                return Err(unavailable(format!("class index {} declared twice", spec.index)));
            }
            if !spec.intercept.is_finite() {
                return Err(unavailable(format!("class {} has a non-finite intercept", spec.index)));
            }
            let mut class = ClassScore {
                index: spec.index,
                intercept: spec.intercept,
                numeric: vec![],
                categorical: vec![],
            };
            for (key, weight) in spec.weights {
                if !weight.is_finite() {
                    return Err(unavailable(format!("weight `{key}` is not finite")));
                }
                if let Some((column, value)) = key.split_once('=')
                    && is_categorical(column)
                    && let Some(position) = column_position(column)
                {
                    class.categorical.push(CategoricalTerm {
                        column: position,
                        value: value.to_owned(),
                        weight,
                    });
                } else if let Some(position) = column_position(&key)
                    && !is_categorical(&key)
                {
                    class.numeric.push(NumericTerm {
                        column: position,
                        weight,
                        scaling: scaling.get(&position).copied().unwrap_or(Scaling::IDENTITY),
                    });
                } else {
                    return Err(unavailable(format!(
                        "class {} weight `{key}` matches no feature",
                        spec.index
                    )));
                }
            }
            classes.push(class);
        }

        Ok(Self { name: artifact.name, version: artifact.version, classes })
    }

    /// Class indices this model can emit, in artifact order.
    #[must_use]
    pub fn class_indices(&self) -> Vec<i64> {
        self.classes.iter().map(|c| c.index).collect()
    }

    fn score(class: &ClassScore, values: &[FeatureValue<'_>]) -> Result<f64, ModelError> {
        let mut score = class.intercept;
        for term in &class.numeric {
            let x = values[term.column].as_f64().ok_or_else(|| ModelError::InferenceFailed {
                reason: format!("column `{}` is not numeric", FeatureRow::COLUMNS[term.column]),
            })?;
            score += term.weight * (x - term.scaling.mean) / term.scaling.scale;
        }
        for term in &class.categorical {
            if let FeatureValue::Text(v) = values[term.column]
                && v == term.value
            {
                score += term.weight;
            }
        }
        Ok(score)
    }
}

impl Model for ScorecardModel {
    /// Score every class and return the index of the best one.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::InferenceFailed` when a score is not finite (for
    /// example a NaN in the row) or a numeric column holds text.
    async fn classify(&self, row: &FeatureRow) -> Result<i64, ModelError> {
        let values = row.values();
        let mut best: Option<(i64, f64)> = None;
        for class in &self.classes {
            let score = Self::score(class, &values)?;
            if !score.is_finite() {
                return Err(ModelError::InferenceFailed {
                    reason: format!("class {} scored {score}", class.index),
                });
            }
            if best.is_none_or(|(_, top)| score > top) {
                best = Some((class.index, score));
            }
        }
        let (index, score) = best.ok_or_else(|| ModelError::InferenceFailed {
            reason: "model has no classes".to_owned(),
        })?;
        tracing::debug!(class_index = index, score, "scorecard.classify");
        Ok(index)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn version(&self) -> &str {
        &self.version
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{CustomerSegment, Market, OrderInput, ShippingMode, TransactionType, assemble};

    const SAMPLE: &str = include_str!("../../assets/final_pipeline.json");

    fn default_order() -> OrderInput {
        OrderInput {
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
        }
    }

    fn sample() -> ScorecardModel {
        ScorecardModel::from_json(SAMPLE).unwrap()
    }

    #[test]
    fn sample_artifact_loads() {
        let m = sample();
        assert_eq!(m.name(), "SCORECARD");
        assert_eq!(m.version(), "3");
        assert_eq!(m.class_indices(), vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn default_order_is_low_risk() {
        assert_eq!(sample().classify(&assemble(default_order())).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn moderate_delay_is_medium_risk() {
        let order = OrderInput { shipping_delay_days: 2.0, ..default_order() };
        assert_eq!(sample().classify(&assemble(order)).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn late_same_day_loss_making_order_is_high_risk() {
        let order = OrderInput {
            transaction_type: TransactionType::Transfer,
            shipping_mode: ShippingMode::SameDay,
            discount_rate: 0.5,
            product_price: 200.0,
            quantity: 3,
            profit_per_order: -50.0,
            shipping_delay_days: 12.0,
            ..default_order()
        };
        assert_eq!(sample().classify(&assemble(order)).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn unseen_region_contributes_nothing() {
        let order = OrderInput { order_region: "Atlantis".to_owned(), ..default_order() };
        assert_eq!(sample().classify(&assemble(order)).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn nan_input_is_inference_error() {
        let order = OrderInput { shipping_delay_days: f64::NAN, ..default_order() };
        let err = sample().classify(&assemble(order)).await.unwrap_err();
        assert!(matches!(err, ModelError::InferenceFailed { .. }), "got {err:?}");
    }

    #[tokio::test]
    async fn ties_pick_first_class() {
        let m = ScorecardModel::from_json(
            r#"{"name":"T","version":"1","classes":[
                {"index":1,"intercept":0.0},
                {"index":0,"intercept":0.0}
            ]}"#,
        )
        .unwrap();
        assert_eq!(m.classify(&assemble(default_order())).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn out_of_table_class_index_passes_through() {
        let m = ScorecardModel::from_json(
            r#"{"name":"T","version":"1","classes":[{"index":9,"intercept":1.0}]}"#,
        )
        .unwrap();
        assert_eq!(m.classify(&assemble(default_order())).await.unwrap(), 9);
    }

    #[test]
    fn missing_file_is_unavailable() {
        let err = ScorecardModel::from_path(Path::new("/nonexistent/final_pipeline.json")).unwrap_err();
        assert!(err.is_fatal());
        assert!(err.to_string().contains("/nonexistent/final_pipeline.json"));
    }

    #[test]
    fn malformed_artifacts_are_unavailable() {
        let cases = [
            "not json",
            r#"{"name":"T","version":"1","classes":[]}"#,
            r#"{"name":"T","version":"1","classes":[{"index":0,"intercept":0.0},{"index":0,"intercept":1.0}]}"#,
            r#"{"name":"T","version":"1","classes":[{"index":0,"intercept":0.0,"weights":{"Colour":1.0}}]}"#,
            r#"{"name":"T","version":"1","classes":[{"index":0,"intercept":0.0,"weights":{"Sales=High":1.0}}]}"#,
            r#"{"name":"T","version":"1","classes":[{"index":0,"intercept":0.0,"weights":{"Market":1.0}}]}"#,
            r#"{"name":"T","version":"1","scaler":{"Sales":{"mean":0.0,"scale":0.0}},"classes":[{"index":0,"intercept":0.0}]}"#,
            r#"{"name":"T","version":"1","scaler":{"Market":{"mean":0.0,"scale":1.0}},"classes":[{"index":0,"intercept":0.0}]}"#,
            r#"{"name":"T","version":"1","classes":[{"index":0,"intercept":0.0}],"extra":true}"#,
        ];
        for case in cases {
            let err = ScorecardModel::from_json(case).unwrap_err();
            assert!(err.is_fatal(), "case {case} gave {err:?}");
        }
    }
}
