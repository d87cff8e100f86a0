// Rust guideline compliant 2026-02-23

//! Label frequency over a history.

use std::collections::HashMap;

use domain::HistoryRecord;

/// How often one prediction label occurs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelCount {
    pub label: String,
    pub count: usize,
}

/// Count records per label, most frequent first.
///
/// Ties keep the order in which labels first appear in `records`.
#[must_use]
pub fn label_distribution(records: &[HistoryRecord]) -> Vec<LabelCount> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<LabelCount> = vec![];
    for record in records {
        let slot = *slots.entry(record.prediction.as_str()).or_insert_with(|| {
            counts.push(LabelCount { label: record.prediction.clone(), count: 0 });
            counts.len() - 1
        });
        counts[slot].count += 1;
    }
    // Stable sort: equal counts stay in first-appearance order.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(labels: &[&str]) -> Vec<HistoryRecord> {
        labels.iter().map(|l| HistoryRecord::now(*l)).collect()
    }

    #[test]
    fn empty_history_has_no_counts() {
        assert!(label_distribution(&[]).is_empty());
    }

    #[test]
    fn most_frequent_first() {
        let dist = label_distribution(&records(&[
            "🟢 Low Risk",
            "🔴 High Risk",
            "🔴 High Risk",
            "🟡 Medium Risk",
            "🔴 High Risk",
            "🟢 Low Risk",
        ]));
        let pairs: Vec<(&str, usize)> = dist.iter().map(|c| (c.label.as_str(), c.count)).collect();
        assert_eq!(pairs, vec![("🔴 High Risk", 3), ("🟢 Low Risk", 2), ("🟡 Medium Risk", 1)]);
    }

    #[test]
    fn ties_keep_first_appearance_order() {
        let dist = label_distribution(&records(&["Unknown", "🟢 Low Risk", "🟢 Low Risk", "Unknown"]));
        assert_eq!(dist[0].label, "Unknown");
        assert_eq!(dist[1].label, "🟢 Low Risk");
        assert!(dist.iter().all(|c| c.count == 2));
    }
}
