//! Reporting and output generation
//!
//! Global invariants enforced:
//! - Deterministic output ordering (results keyed by location name)
//! - Byte-for-byte identical output across runs

use crate::catalogue::LocationCatalogue;
use crate::risk::RiskLabel;
use crate::scenario::ScenarioTier;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Externally visible result for one location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RiskRecord {
    /// Bounded risk, rounded to two decimals
    pub risk: f64,
    pub elevation: f64,
    pub classification: RiskLabel,
}

/// Location name -> risk record, one per request
pub type ResultCollection = BTreeMap<String, RiskRecord>;

/// A location left out of the results because its prediction failed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationFailure {
    pub name: String,
    pub reason: String,
}

/// Everything produced for a single reading
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub tier: ScenarioTier,
    /// True when no predictive model was available
    pub degraded: bool,
    pub results: ResultCollection,
    pub failures: Vec<LocationFailure>,
}

/// Round half away from zero to two decimals
pub fn round_risk(risk: f64) -> f64 {
    (risk * 100.0).round() / 100.0
}

/// Render an assessment as text output
pub fn render_text(assessment: &Assessment) -> String {
    let mut output = String::new();
    output.push_str(&format!("Scenario: {}\n", assessment.tier));

    if assessment.degraded {
        output.push_str("Predictive model unavailable; no locations assessed\n");
        return output;
    }

    output.push_str(&format!(
        "{:<6} {:<8} {:<10} {}\n",
        "RISK", "CLASS", "ELEVATION", "LOCATION"
    ));

    // Highest risk first, then by name
    let mut rows: Vec<(&String, &RiskRecord)> = assessment.results.iter().collect();
    rows.sort_by(|(a_name, a), (b_name, b)| {
        b.risk
            .partial_cmp(&a.risk)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a_name.cmp(b_name))
    });

    for (name, record) in rows {
        let risk_str = format!("{:.2}", record.risk);
        let elevation_str = format!("{:.1}", record.elevation);
        output.push_str(&format!(
            "{:<6} {:<8} {:<10} {}\n",
            risk_str,
            record.classification.as_str(),
            elevation_str,
            name
        ));
    }

    if !assessment.failures.is_empty() {
        output.push_str(&format!(
            "\n{} location(s) skipped:\n",
            assessment.failures.len()
        ));
        for failure in &assessment.failures {
            output.push_str(&format!("  {}: {}\n", failure.name, failure.reason));
        }
    }

    output
}

/// Render the result collection as JSON output
///
/// Only the name -> record mapping is emitted; an empty object is a valid,
/// degraded response.
pub fn render_json(results: &ResultCollection) -> String {
    serde_json::to_string_pretty(results).unwrap_or_else(|_| "{}".to_string())
}

/// Render the location catalogue as text output
pub fn render_catalogue_text(catalogue: &LocationCatalogue) -> String {
    let mut output = String::new();
    output.push_str(&format!("{:<10} {}\n", "ELEVATION", "LOCATION"));
    for location in catalogue.locations() {
        let elevation_str = format!("{:.1}", location.elevation);
        output.push_str(&format!("{:<10} {}\n", elevation_str, location.name));
    }
    output
}

/// Render the location catalogue as JSON output
pub fn render_catalogue_json(catalogue: &LocationCatalogue) -> String {
    serde_json::to_string_pretty(catalogue.locations()).unwrap_or_else(|_| "[]".to_string())
}
