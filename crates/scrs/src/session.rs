// Rust guideline compliant 2026-02-23

//! Line-oriented JSON session: one `OrderForm` per input line, one reply per
//! output line.
//!
//! The evaluator is shared across lines, so the model loads at most once.
//! Bad input and per-row inference failures are answered and skipped; an
//! unavailable model ends the session.

use domain::{ModelError, RiskAssessment, Verdict};
use form::OrderForm;
use pipeline::{Pipeline, PipelineError};
use tokio::io::{AsyncBufRead, AsyncBufReadExt as _, AsyncWrite, AsyncWriteExt as _};
use tracing::Instrument as _;

/// Errors that end a session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Reading requests or writing replies failed.
    #[error("session I/O failed: {0}")]
    Io(#[from] std::io::Error),
    /// A reply could not be encoded.
    #[error("failed to encode reply: {0}")]
    Encode(#[from] serde_json::Error),
    /// The model cannot be loaded; no later line could succeed.
    #[error("model unavailable, session ended: {0}")]
    ModelUnavailable(ModelError),
}

/// Per-session counters, logged when the input ends.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub answered: u64,
    pub failed: u64,
}

/// One output line.
#[derive(Debug, serde::Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum Reply<'a> {
    Ok {
        label: &'a str,
        explanation: &'a str,
        verdict: Verdict,
        model_name: &'a str,
        model_version: &'a str,
        timestamp: String,
    },
    Error {
        kind: ErrorKind,
        message: String,
        /// Present when a verdict was produced but not recorded.
        #[serde(skip_serializing_if = "Option::is_none")]
        assessment: Option<&'a RiskAssessment>,
    },
}

#[derive(Debug, Clone, Copy, serde::Serialize)]
#[serde(rename_all = "snake_case")]
enum ErrorKind {
    InvalidInput,
    Inference,
    History,
    ModelUnavailable,
}

/// Serve requests from `reader` until end of input.
///
/// Blank lines are ignored.
///
/// # Errors
///
/// Returns [`SessionError::ModelUnavailable`] after replying to the line that
/// hit it, or [`SessionError::Io`] / [`SessionError::Encode`] when a line
/// cannot be read or answered.
pub async fn run<E, S, R, W>(
    pipeline: &Pipeline,
    evaluator: &E,
    store: &S,
    reader: R,
    mut writer: W,
) -> Result<SessionSummary, SessionError>
where
    E: domain::RiskEvaluator,
    S: domain::HistoryStore,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut summary = SessionSummary::default();
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let span = tracing::info_span!("request", request_id = %uuid::Uuid::new_v4());
        let outcome = answer(pipeline, evaluator, store, &line).instrument(span).await;

        let fatal = match outcome {
            Ok(reply) => {
                summary.answered += 1;
                write_line(&mut writer, &reply).await?;
                None
            }
            Err((reply, fatal)) => {
                summary.failed += 1;
                write_line(&mut writer, &reply).await?;
                fatal
            }
        };
        if let Some(e) = fatal {
            tracing::error!(error = %e, "session.aborted");
            return Err(SessionError::ModelUnavailable(e));
        }
    }

    tracing::info!(answered = summary.answered, failed = summary.failed, "session.ended");
    Ok(summary)
}

/// Reply body for one line, or an error reply plus the fatal error, if any.
async fn answer<E, S>(
    pipeline: &Pipeline,
    evaluator: &E,
    store: &S,
    line: &str,
) -> Result<serde_json::Value, (serde_json::Value, Option<ModelError>)>
where
    E: domain::RiskEvaluator,
    S: domain::HistoryStore,
{
    let input = serde_json::from_str::<OrderForm>(line)
        .map_err(|e| e.to_string())
        .and_then(|form| form.validate().map_err(|e| e.to_string()));
    let input = match input {
        Ok(input) => input,
        Err(message) => {
            tracing::warn!(error = %message, "session.input.rejected");
            return Err((error_reply(ErrorKind::InvalidInput, message, None), None));
        }
    };

    match pipeline.predict(input, evaluator, store).await {
        Ok(prediction) => {
            let a = &prediction.assessment;
            Ok(to_value(&Reply::Ok {
                label: a.label,
                explanation: a.explanation,
                verdict: a.verdict,
                model_name: &a.model_name,
                model_version: &a.model_version,
                timestamp: prediction.record.formatted_timestamp(),
            }))
        }
        Err(PipelineError::Inference(e)) if e.is_fatal() => {
            let reply = error_reply(ErrorKind::ModelUnavailable, e.to_string(), None);
            Err((reply, Some(e)))
        }
        Err(PipelineError::Inference(e)) => {
            Err((error_reply(ErrorKind::Inference, e.to_string(), None), None))
        }
        Err(PipelineError::Record { prediction, source }) => Err((
            error_reply(ErrorKind::History, source.to_string(), Some(&prediction.assessment)),
            None,
        )),
        Err(PipelineError::History(source)) => {
            Err((error_reply(ErrorKind::History, source.to_string(), None), None))
        }
    }
}

fn error_reply(
    kind: ErrorKind,
    message: String,
    assessment: Option<&RiskAssessment>,
) -> serde_json::Value {
    to_value(&Reply::Error { kind, message, assessment })
}

fn to_value(reply: &Reply<'_>) -> serde_json::Value {
    // Infallible for these field types.
    serde_json::to_value(reply).unwrap_or_else(|e| {
        serde_json::json!({ "status": "error", "kind": "encode", "message": e.to_string() })
    })
}

async fn write_line<W: AsyncWrite + Unpin>(
    writer: &mut W,
    reply: &serde_json::Value,
) -> Result<(), SessionError> {
    let mut bytes = serde_json::to_vec(reply)?;
    bytes.push(b'\n');
    writer.write_all(&bytes).await?;
    writer.flush().await?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
