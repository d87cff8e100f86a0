// Rust guideline compliant 2026-02-23

//! Supply Chain Risk System entry point.
//!
//! Wires the scorecard model, the risk classifier, and the configured history
//! backend into the prediction pipeline, then runs one subcommand.
//!
//! # Usage
//!
//! ```text
//! # Score one order with a 3-day shipping delay and export its features
//! scrs predict --shipping-delay-days 3 --shipping-mode "Same Day" --export
//!
//! # Show past predictions and how often each label occurred
//! scrs analytics
//!
//! # Keep history in SQLite instead of history.csv
//! SCRS_HISTORY=sqlite:history.db scrs predict
//!
//! # Serve JSON orders line by line, with debug logs on stderr
//! RUST_LOG=debug scrs session < orders.jsonl
//! ```

mod adapters;
mod config;
mod render;
mod session;

use std::path::{Path, PathBuf};

use adapters::history_backend::HistoryBackend;
use adapters::scorecard_model::{DEFAULT_MODEL_FILE, ScorecardModel};
use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use classifier::{ModelGateway, RiskClassifier};
use config::{AppConfig, HistoryLocation};
use domain::{CustomerSegment, Market, ModelError, ShippingMode, TransactionType};
use form::OrderForm;
use history::{DEFAULT_HISTORY_FILE, EXPORT_FILE_NAME};
use pipeline::{Pipeline, PipelineError};
use tracing::Instrument as _;

#[derive(Debug, Parser)]
#[command(name = "scrs", about = "Supply chain disruption-risk prediction", version)]
struct Cli {
    /// Model artifact to load.
    #[arg(long, global = true, env = "SCRS_MODEL", default_value = DEFAULT_MODEL_FILE)]
    model: PathBuf,

    /// History CSV path, or a `sqlite:` URL.
    #[arg(long, global = true, env = "SCRS_HISTORY", default_value = DEFAULT_HISTORY_FILE)]
    history: HistoryLocation,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Predict the disruption risk of one order and log it.
    Predict(PredictArgs),
    /// Show the prediction history and label frequency.
    Analytics,
    /// Delete the prediction history.
    ClearHistory,
    /// Read one JSON order per stdin line; write one JSON result per line.
    Session,
}

/// Order fields; any left out keep the form default.
#[derive(Debug, Args)]
struct PredictArgs {
    #[arg(long)]
    transaction_type: Option<TransactionType>,
    #[arg(long)]
    customer_segment: Option<CustomerSegment>,
    #[arg(long)]
    market: Option<Market>,
    #[arg(long)]
    order_region: Option<String>,
    #[arg(long)]
    shipping_mode: Option<ShippingMode>,
    #[arg(long)]
    discount_rate: Option<f64>,
    #[arg(long)]
    product_price: Option<f64>,
    #[arg(long)]
    quantity: Option<u32>,
    #[arg(long, allow_negative_numbers = true)]
    profit_per_order: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    shipping_delay_days: Option<f64>,

    /// Also write the submitted feature row as CSV.
    #[arg(long, num_args = 0..=1, default_missing_value = EXPORT_FILE_NAME, value_name = "PATH")]
    export: Option<PathBuf>,
}

impl PredictArgs {
    fn form(&self) -> OrderForm {
        let defaults = OrderForm::default();
        OrderForm {
            transaction_type: self.transaction_type.unwrap_or(defaults.transaction_type),
            customer_segment: self.customer_segment.unwrap_or(defaults.customer_segment),
            market: self.market.unwrap_or(defaults.market),
            order_region: self.order_region.clone().unwrap_or(defaults.order_region),
            shipping_mode: self.shipping_mode.unwrap_or(defaults.shipping_mode),
            discount_rate: self.discount_rate.unwrap_or(defaults.discount_rate),
            product_price: self.product_price.unwrap_or(defaults.product_price),
            quantity: self.quantity.unwrap_or(defaults.quantity),
            profit_per_order: self.profit_per_order.unwrap_or(defaults.profit_per_order),
            shipping_delay_days: self.shipping_delay_days.unwrap_or(defaults.shipping_delay_days),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize the tracing subscriber before any async work.
    // Logs go to stderr; stdout carries results only.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::builder(cli.model)
        .history(cli.history)
        .build()
        .context("failed to build configuration")?;
    tracing::debug!(model = %config.model_path.display(), history = %config.history, "main.config");

    let store = HistoryBackend::open(&config.history)
        .with_context(|| format!("failed to open history at {}", config.history))?;
    let pipeline = Pipeline::new();

    match cli.command {
        Command::Predict(args) => predict(&pipeline, &config, &store, &args).await,
        Command::Analytics => analytics(&pipeline, &store).await,
        Command::ClearHistory => {
            pipeline.clear_history(&store).await.context("failed to delete history")?;
            println!("Prediction history deleted successfully!");
            Ok(())
        }
        Command::Session => {
            let classifier = build_classifier(&config.model_path);
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let summary =
                session::run(&pipeline, &classifier, &store, stdin, tokio::io::stdout())
                    .await
                    .context("session failed")?;
            tracing::info!(answered = summary.answered, failed = summary.failed, "main.session.done");
            Ok(())
        }
    }
}

/// Classifier over a lazily-loaded scorecard; the artifact is read on first use.
fn build_classifier(
    model_path: &Path,
) -> RiskClassifier<ModelGateway<ScorecardModel, impl Fn() -> Result<ScorecardModel, ModelError>>>
{
    let path = model_path.to_path_buf();
    RiskClassifier::new(ModelGateway::new(move || ScorecardModel::from_path(&path)))
}

async fn predict(
    pipeline: &Pipeline,
    config: &AppConfig,
    store: &HistoryBackend,
    args: &PredictArgs,
) -> anyhow::Result<()> {
    let input = args.form().validate().context("invalid order")?;
    let classifier = build_classifier(&config.model_path);

    let span = tracing::info_span!("predict", request_id = %uuid::Uuid::new_v4());
    let prediction = match pipeline.predict(input, &classifier, store).instrument(span).await {
        Ok(prediction) => prediction,
        Err(PipelineError::Record { prediction, source }) => {
            // The verdict stands even though it was not logged.
            print!("{}", render::verdict(&prediction.assessment));
            return Err(source).context("prediction was not recorded in history");
        }
        Err(e) => return Err(e).context("prediction failed"),
    };

    print!("{}", render::verdict(&prediction.assessment));
    if let Some(path) = &args.export {
        history::write_feature_row(path, &prediction.features)
            .await
            .context("failed to export prediction")?;
        println!("\nExported features to {}", path.display());
    }
    Ok(())
}

async fn analytics(pipeline: &Pipeline, store: &HistoryBackend) -> anyhow::Result<()> {
    match pipeline.report(store).await.context("failed to read history")? {
        Some(report) => print!("{}", render::report(&report)),
        None => println!("No prediction history available."),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[expect(clippy::float_cmp, reason = "parsed literal compared exactly")]
    fn predict_args_fall_back_to_form_defaults() {
        let cli = Cli::try_parse_from([
            "scrs",
            "predict",
            "--shipping-mode",
            "Same Day",
            "--profit-per-order",
            "-50",
        ])
        .unwrap();
        let Command::Predict(args) = cli.command else { panic!("expected predict") };
        let form = args.form();
        assert_eq!(form.shipping_mode, ShippingMode::SameDay);
        assert_eq!(form.profit_per_order, -50.0_f64);
        assert_eq!(form.market, OrderForm::default().market);
        assert_eq!(form.order_region, "East");
        assert!(args.export.is_none());
    }

    #[test]
    fn bare_export_flag_uses_default_file_name() {
        let cli = Cli::try_parse_from(["scrs", "predict", "--export"]).unwrap();
        let Command::Predict(args) = cli.command else { panic!("expected predict") };
        assert_eq!(args.export, Some(PathBuf::from(EXPORT_FILE_NAME)));
    }

    #[test]
    fn history_flag_selects_backend() {
        let cli =
            Cli::try_parse_from(["scrs", "--history", "sqlite:h.db", "analytics"]).unwrap();
        assert_eq!(cli.history, HistoryLocation::Sqlite("sqlite:h.db".to_owned()));
        assert_eq!(cli.model, PathBuf::from(DEFAULT_MODEL_FILE));
    }

    #[test]
    fn unknown_category_is_rejected() {
        assert!(Cli::try_parse_from(["scrs", "predict", "--market", "Mars"]).is_err());
    }

    #[tokio::test]
    async fn bundled_artifact_scores_a_high_risk_order() {
        let dir = tempfile::tempdir().unwrap();
        let model_path = dir.path().join("model.json");
        std::fs::write(&model_path, include_str!("../assets/final_pipeline.json")).unwrap();
        let config = AppConfig::builder(&model_path)
            .history(HistoryLocation::Csv(dir.path().join("history.csv")))
            .build()
            .unwrap();
        let store = HistoryBackend::open(&config.history).unwrap();
        let form = OrderForm {
            transaction_type: TransactionType::Transfer,
            shipping_mode: ShippingMode::SameDay,
            discount_rate: 0.5,
            product_price: 200.0,
            quantity: 3,
            profit_per_order: -50.0,
            shipping_delay_days: 12.0,
            ..OrderForm::default()
        };
        let classifier = build_classifier(&config.model_path);

        let prediction =
            Pipeline::new().predict(form.validate().unwrap(), &classifier, &store).await.unwrap();

        assert_eq!(prediction.assessment.label, "🔴 High Risk");
        let report = Pipeline::new().report(&store).await.unwrap().unwrap();
        assert_eq!(report.records.len(), 1);
        assert!(render::report(&report).contains("🔴 High Risk"));
    }
}
