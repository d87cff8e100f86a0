// Rust guideline compliant 2026-02-23

//! Risk levels, their display labels, and the canned rationales.

use std::fmt;

/// Label recorded for a class index the lookup table does not cover.
pub const UNKNOWN_LABEL: &str = "Unknown";

const LOW_EXPLANATION: &str = "\
The model predicts **Low Risk** because:
- Minimal shipping delay.
- Stable profit margin.
- Balanced discount strategy.
- Low historical disruption for selected region and shipping mode.";

const MEDIUM_EXPLANATION: &str = "\
The model predicts **Medium Risk** due to:
- Moderate shipping delay.
- Balanced profit and discount levels.
- Regional risk exposure.";

const HIGH_EXPLANATION: &str = "\
The model predicts **High Risk** because:
- Higher shipping delay increases disruption probability.
- Low profit margins reduce supply chain flexibility.
- High discount rate may indicate unstable demand.
- Certain shipping modes and regions historically show higher disruption.";

const UNKNOWN_EXPLANATION: &str = "\
The model returned a class outside the known risk levels.
No rationale is available for this result.";

/// The three disruption-risk severities the classifier was trained on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum RiskClass {
    Low,
    Medium,
    High,
}

impl RiskClass {
    /// All levels in class-index order.
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    /// Map a classifier output to a level; `None` outside `{0, 1, 2}`.
    #[must_use]
    pub fn from_index(index: i64) -> Option<Self> {
        match index {
            0 => Some(Self::Low),
            1 => Some(Self::Medium),
            2 => Some(Self::High),
            _ => None,
        }
    }

    /// Class index the model emits for this level.
    #[must_use]
    pub fn index(self) -> i64 {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
        }
    }

    /// Display label, icon included. Also the value written to history.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "🟢 Low Risk",
            Self::Medium => "🟡 Medium Risk",
            Self::High => "🔴 High Risk",
        }
    }

    /// Static rationale for this level. Not derived from feature values.
    #[must_use]
    pub fn explanation(self) -> &'static str {
        match self {
            Self::Low => LOW_EXPLANATION,
            Self::Medium => MEDIUM_EXPLANATION,
            Self::High => HIGH_EXPLANATION,
        }
    }
}

/// Outcome of mapping a class index: a known level or the `Unknown` fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Verdict {
    /// The index matched a trained level.
    Risk { class: RiskClass },
    /// The index fell outside the lookup table.
    Unknown { class_index: i64 },
}

impl Verdict {
    /// Total mapping from any class index.
    #[must_use]
    pub fn from_index(index: i64) -> Self {
        RiskClass::from_index(index)
            .map_or(Self::Unknown { class_index: index }, |class| Self::Risk { class })
    }

    /// The matched level, if any.
    #[must_use]
    pub fn risk_class(self) -> Option<RiskClass> {
        match self {
            Self::Risk { class } => Some(class),
            Self::Unknown { .. } => None,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Risk { class } => class.label(),
            Self::Unknown { .. } => UNKNOWN_LABEL,
        }
    }

    #[must_use]
    pub fn explanation(self) -> &'static str {
        match self {
            Self::Risk { class } => class.explanation(),
            Self::Unknown { .. } => UNKNOWN_EXPLANATION,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of evaluating one feature row.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct RiskAssessment {
    pub verdict: Verdict,
    /// Display label; equals `verdict.label()`.
    pub label: &'static str,
    /// Canned rationale; equals `verdict.explanation()`.
    pub explanation: &'static str,
    /// Name of the model that produced the class index.
    pub model_name: String,
    /// Version string of that model.
    pub model_version: String,
}

impl RiskAssessment {
    /// Build an assessment from a raw class index.
    #[must_use]
    pub fn from_class_index(index: i64, model_name: &str, model_version: &str) -> Self {
        let verdict = Verdict::from_index(index);
        Self {
            verdict,
            label: verdict.label(),
            explanation: verdict.explanation(),
            model_name: model_name.to_owned(),
            model_version: model_version.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_indices_map_to_fixed_levels() {
        assert_eq!(RiskClass::from_index(0), Some(RiskClass::Low));
        assert_eq!(RiskClass::from_index(1), Some(RiskClass::Medium));
        assert_eq!(RiskClass::from_index(2), Some(RiskClass::High));
        for class in RiskClass::ALL {
            assert_eq!(RiskClass::from_index(class.index()), Some(class));
        }
    }

    #[test]
    fn out_of_table_indices_are_unknown() {
        for index in [-1, 3, 42, i64::MIN, i64::MAX] {
            let verdict = Verdict::from_index(index);
            assert_eq!(verdict, Verdict::Unknown { class_index: index });
            assert_eq!(verdict.label(), UNKNOWN_LABEL);
            assert_eq!(verdict.risk_class(), None);
        }
    }

    #[test]
    fn labels_carry_icons() {
        assert_eq!(RiskClass::Low.label(), "🟢 Low Risk");
        assert_eq!(RiskClass::Medium.label(), "🟡 Medium Risk");
        assert_eq!(RiskClass::High.label(), "🔴 High Risk");
    }

    #[test]
    fn every_level_has_its_own_explanation() {
        assert!(RiskClass::Low.explanation().contains("**Low Risk**"));
        assert!(RiskClass::Medium.explanation().contains("**Medium Risk**"));
        assert!(RiskClass::High.explanation().contains("**High Risk**"));
        assert!(RiskClass::High.explanation().contains("shipping delay"));
        assert_ne!(Verdict::from_index(7).explanation(), RiskClass::Low.explanation());
    }

    #[test]
    fn assessment_label_matches_verdict() {
        let a = RiskAssessment::from_class_index(2, "SCORECARD", "3");
        assert_eq!(a.verdict, Verdict::Risk { class: RiskClass::High });
        assert_eq!(a.label, "🔴 High Risk");
        assert_eq!(a.explanation, RiskClass::High.explanation());
        assert_eq!(a.model_name, "SCORECARD");
        assert_eq!(a.model_version, "3");

        let u = RiskAssessment::from_class_index(5, "SCORECARD", "3");
        assert_eq!(u.label, "Unknown");
    }
}
