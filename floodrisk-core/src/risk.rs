//! Risk classification
//!
//! Global invariants enforced:
//! - Deterministic classification
//! - Bands partition [0, 1] with no gap or overlap

use serde::{Deserialize, Serialize};

/// Classification label for a bounded risk value
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLabel {
    Low,    // <= medium
    Medium, // (medium, high]
    High,   // > high
}

impl RiskLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLabel::Low => "Low",
            RiskLabel::Medium => "Medium",
            RiskLabel::High => "High",
        }
    }
}

impl std::fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configurable classification cut points
///
/// Risk at or below `medium` is Low, at or below `high` is Medium, and
/// anything above `high` is High.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationThresholds {
    pub medium: f64,
    pub high: f64,
}

impl ClassificationThresholds {
    pub const DEFAULT_MEDIUM: f64 = 0.45;
    pub const DEFAULT_HIGH: f64 = 0.75;
}

impl Default for ClassificationThresholds {
    fn default() -> Self {
        ClassificationThresholds {
            medium: Self::DEFAULT_MEDIUM,
            high: Self::DEFAULT_HIGH,
        }
    }
}

/// Classify a bounded risk value with default thresholds
pub fn classify_risk(risk: f64) -> RiskLabel {
    classify_risk_with_thresholds(risk, &ClassificationThresholds::default())
}

/// Classify a bounded risk value with custom thresholds
pub fn classify_risk_with_thresholds(risk: f64, thresholds: &ClassificationThresholds) -> RiskLabel {
    if risk <= thresholds.medium {
        RiskLabel::Low
    } else if risk <= thresholds.high {
        RiskLabel::Medium
    } else {
        RiskLabel::High
    }
}
