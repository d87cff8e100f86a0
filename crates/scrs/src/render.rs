// Rust guideline compliant 2026-02-23

//! Plain-text views printed by the `scrs` subcommands.

use domain::{HistoryRecord, RiskAssessment};
use history::LabelCount;
use pipeline::HistoryReport;

/// Widest bar in the frequency chart.
const BAR_WIDTH: usize = 40;

/// Heading line, rationale heading, and both texts of one verdict.
#[must_use]
pub fn verdict(assessment: &RiskAssessment) -> String {
    format!(
        "Prediction Result\n{}\n\nPrediction Rationale\n{}\n",
        assessment.label, assessment.explanation
    )
}

/// The history table followed by the label-frequency chart.
#[must_use]
pub fn report(report: &HistoryReport) -> String {
    let mut out = String::from("Prediction History\n");
    out.push_str(&history_table(&report.records));
    out.push_str("\nPrediction Distribution\n");
    out.push_str(&distribution_chart(&report.distribution));
    out
}

fn history_table(records: &[HistoryRecord]) -> String {
    let rows: Vec<(String, &str)> = records
        .iter()
        .map(|r| (r.formatted_timestamp(), r.prediction.as_str()))
        .collect();
    let ts_width = rows.iter().map(|(ts, _)| ts.len()).max().unwrap_or(0).max("Timestamp".len());

    let mut out = format!("{:<ts_width$}  Prediction\n", "Timestamp");
    for (ts, prediction) in &rows {
        out.push_str(&format!("{ts:<ts_width$}  {prediction}\n"));
    }
    out
}

/// One line per label: count, bar, then label.
///
/// Labels go last so their varying terminal width (emoji) cannot shift the bars.
fn distribution_chart(distribution: &[LabelCount]) -> String {
    let max = distribution.iter().map(|c| c.count).max().unwrap_or(0);
    let count_width = max.to_string().len();

    let mut out = String::new();
    for entry in distribution {
        // Every present label gets at least one mark.
        let bar = "#".repeat((entry.count * BAR_WIDTH).div_ceil(max.max(1)));
        out.push_str(&format!("{:>count_width$}  {bar:<BAR_WIDTH$}  {}\n", entry.count, entry.label));
    }
    out
}
