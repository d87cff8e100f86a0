// Rust guideline compliant 2026-02-23

//! Pipeline component -- assembles features from an order, evaluates risk,
//! and logs the verdict to history.
//!
//! Entry points: [`Pipeline::predict`], [`Pipeline::report`],
//! [`Pipeline::clear_history`]. Ports are injected per call.

use chrono::NaiveDateTime;
use domain::{
    FeatureRow, HistoryRecord, HistoryStore, ModelError, OrderInput, RiskAssessment,
    RiskEvaluator, StoreError, assemble,
};
use history::{LabelCount, label_distribution};

// ---------------------------------------------------------------------------
// PipelineError
// ---------------------------------------------------------------------------

/// Errors that can occur while serving a user action.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The model could not produce a class index.
    #[error("risk evaluation failed: {0}")]
    Inference(ModelError),
    /// A verdict was produced but could not be logged.
    ///
    /// The verdict is carried along so it can still be shown.
    #[error("prediction not recorded: {source}")]
    Record {
        /// The prediction that was not persisted.
        prediction: Box<Prediction>,
        /// The underlying store error.
        source: StoreError,
    },
    /// History could not be read or cleared.
    #[error("history error: {0}")]
    History(StoreError),
}

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

/// Everything produced by one successful prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// The exact row submitted to the model; also the export payload.
    pub features: FeatureRow,
    pub assessment: RiskAssessment,
    /// The record appended to history.
    pub record: HistoryRecord,
}

/// Contents of the analytics view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryReport {
    /// All records, oldest first.
    pub records: Vec<HistoryRecord>,
    /// Label frequency, most frequent first.
    pub distribution: Vec<LabelCount>,
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Orchestrates the prediction-to-history flow.
///
/// Holds no port references; evaluator and store are passed to each call.
#[derive(Debug)]
pub struct Pipeline {
    /// Source of record timestamps; `None` uses local wall-clock time.
    clock: Option<fn() -> NaiveDateTime>,
}

impl Pipeline {
    /// Create a pipeline stamping records with the local time.
    #[must_use]
    pub fn new() -> Self {
        Self { clock: None }
    }

    /// Create a pipeline with a fixed timestamp source (useful in tests).
    #[must_use]
    pub fn with_clock(clock: fn() -> NaiveDateTime) -> Self {
        Self { clock: Some(clock) }
    }

    fn record(&self, label: &str) -> HistoryRecord {
        match self.clock {
            Some(clock) => HistoryRecord { timestamp: clock(), prediction: label.to_owned() },
            None => HistoryRecord::now(label),
        }
    }

    /// Assemble, evaluate, and log one order.
    ///
    /// `Unknown` verdicts are logged like any other label.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Inference`] when evaluation fails (nothing is
    /// logged), or [`PipelineError::Record`] when the verdict could not be appended.
    pub async fn predict<E, S>(
        &self,
        input: OrderInput,
        evaluator: &E,
        store: &S,
    ) -> Result<Prediction, PipelineError>
    where
        E: RiskEvaluator,
        S: HistoryStore,
    {
        let features = assemble(input);
        tracing::debug!(sales = features.sales(), "pipeline.features.assembled");

        let assessment = evaluator.evaluate(&features).await.map_err(|e| {
            tracing::error!(error = %e, fatal = e.is_fatal(), "pipeline.evaluate.failed");
            PipelineError::Inference(e)
        })?;

        let record = self.record(assessment.label);
        let prediction = Prediction { features, assessment, record };

        if let Err(source) = store.append(prediction.record.clone()).await {
            tracing::error!(error = %source, "pipeline.record.failed");
            return Err(PipelineError::Record { prediction: Box::new(prediction), source });
        }

        tracing::info!(label = prediction.assessment.label, "pipeline.prediction.recorded");
        Ok(prediction)
    }

    /// Build the analytics view. `Ok(None)` when there is no history yet.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::History`] when the store cannot be read; a
    /// broken store is never reported as empty.
    pub async fn report<S: HistoryStore>(
        &self,
        store: &S,
    ) -> Result<Option<HistoryReport>, PipelineError> {
        let records = store.read_all().await.map_err(PipelineError::History)?;
        if records.is_empty() {
            tracing::debug!("pipeline.report.empty");
            return Ok(None);
        }
        let distribution = label_distribution(&records);
        Ok(Some(HistoryReport { records, distribution }))
    }

    /// Delete all history.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::History`] when deletion fails.
    pub async fn clear_history<S: HistoryStore>(&self, store: &S) -> Result<(), PipelineError> {
        store.clear().await.map_err(PipelineError::History)?;
        tracing::info!("pipeline.history.cleared");
        Ok(())
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
