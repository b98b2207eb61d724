//! Live readings and scenario tier classification
//!
//! Global invariants enforced:
//! - Tier checks run in strict severity order (first match wins)
//! - Exactly one tier is derived per reading

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Rainfall above which the scenario is catastrophic regardless of water level
pub const CATASTROPHE_RAINFALL_MM: f64 = 100.0;
/// Water level at or above which the scenario is catastrophic
pub const CATASTROPHE_WATER_LEVEL_M: f64 = 3.8;
/// Water level above which the river is overtopping
pub const CRITICAL_WATER_LEVEL_M: f64 = 3.5;
/// Water level above which a storm surge is underway
pub const ALERT_WATER_LEVEL_M: f64 = 3.0;

/// Live environmental reading supplied once per request
///
/// Unknown fields are ignored when deserializing. The capitalized aliases
/// match the payloads produced by older clients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    #[serde(alias = "Rainfall_mm")]
    pub rainfall_mm: f64,
    #[serde(alias = "WaterLevel_m")]
    pub water_level_m: f64,
}

impl Reading {
    pub fn new(rainfall_mm: f64, water_level_m: f64) -> Self {
        Reading {
            rainfall_mm,
            water_level_m,
        }
    }

    /// Reject readings the engine cannot reason about
    pub fn validate(&self) -> Result<()> {
        if !self.rainfall_mm.is_finite() {
            anyhow::bail!("rainfall_mm must be finite (got {})", self.rainfall_mm);
        }
        if !self.water_level_m.is_finite() {
            anyhow::bail!("water_level_m must be finite (got {})", self.water_level_m);
        }
        Ok(())
    }
}

/// Scenario severity, in ascending order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ScenarioTier {
    Normal,
    Alert,
    Critical,
    Catastrophe,
}

impl ScenarioTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScenarioTier::Normal => "Normal",
            ScenarioTier::Alert => "Alert",
            ScenarioTier::Critical => "Critical",
            ScenarioTier::Catastrophe => "Catastrophe",
        }
    }
}

impl std::fmt::Display for ScenarioTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a reading into a scenario tier
///
/// Checked in descending order of severity:
/// 1. Catastrophe: water level >= 3.8 m or rainfall > 100 mm
/// 2. Critical: water level > 3.5 m
/// 3. Alert: water level > 3.0 m
/// 4. Normal otherwise
pub fn classify_scenario(reading: &Reading) -> ScenarioTier {
    if reading.water_level_m >= CATASTROPHE_WATER_LEVEL_M
        || reading.rainfall_mm > CATASTROPHE_RAINFALL_MM
    {
        ScenarioTier::Catastrophe
    } else if reading.water_level_m > CRITICAL_WATER_LEVEL_M {
        ScenarioTier::Critical
    } else if reading.water_level_m > ALERT_WATER_LEVEL_M {
        ScenarioTier::Alert
    } else {
        ScenarioTier::Normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_tide() {
        assert_eq!(
            classify_scenario(&Reading::new(20.0, 2.0)),
            ScenarioTier::Normal
        );
    }

    #[test]
    fn test_water_level_boundaries() {
        assert_eq!(
            classify_scenario(&Reading::new(0.0, 3.0)),
            ScenarioTier::Normal
        );
        assert_eq!(
            classify_scenario(&Reading::new(0.0, 3.1)),
            ScenarioTier::Alert
        );
        assert_eq!(
            classify_scenario(&Reading::new(0.0, 3.5)),
            ScenarioTier::Alert
        );
        assert_eq!(
            classify_scenario(&Reading::new(0.0, 3.6)),
            ScenarioTier::Critical
        );
        assert_eq!(
            classify_scenario(&Reading::new(0.0, 3.79)),
            ScenarioTier::Critical
        );
        // 3.8 is inclusive
        assert_eq!(
            classify_scenario(&Reading::new(0.0, 3.8)),
            ScenarioTier::Catastrophe
        );
    }

    #[test]
    fn test_rainfall_alone_triggers_catastrophe() {
        assert_eq!(
            classify_scenario(&Reading::new(150.0, 1.0)),
            ScenarioTier::Catastrophe
        );
        // 100 mm is not strictly above the limit
        assert_eq!(
            classify_scenario(&Reading::new(100.0, 1.0)),
            ScenarioTier::Normal
        );
    }

    #[test]
    fn test_monotonic_in_water_level() {
        for rainfall in [0.0, 50.0, 100.0] {
            let mut previous = ScenarioTier::Normal;
            for step in 0..=500 {
                let level = step as f64 * 0.01;
                let tier = classify_scenario(&Reading::new(rainfall, level));
                assert!(
                    tier >= previous,
                    "tier regressed at rainfall={} level={}",
                    rainfall,
                    level
                );
                previous = tier;
            }
            assert_eq!(previous, ScenarioTier::Catastrophe);
        }
    }

    #[test]
    fn test_tier_ordering() {
        assert!(ScenarioTier::Normal < ScenarioTier::Alert);
        assert!(ScenarioTier::Alert < ScenarioTier::Critical);
        assert!(ScenarioTier::Critical < ScenarioTier::Catastrophe);
    }

    #[test]
    fn test_reading_ignores_unknown_fields_and_accepts_aliases() {
        let reading: Reading = serde_json::from_str(
            r#"{"Rainfall_mm": 12.5, "WaterLevel_m": 3.2, "station": "Belem"}"#,
        )
        .unwrap();
        assert_eq!(reading, Reading::new(12.5, 3.2));

        let reading: Reading =
            serde_json::from_str(r#"{"rainfall_mm": 1.0, "water_level_m": 2.0}"#).unwrap();
        assert_eq!(reading, Reading::new(1.0, 2.0));
    }

    #[test]
    fn test_reading_rejects_non_finite_values() {
        assert!(Reading::new(f64::NAN, 1.0).validate().is_err());
        assert!(Reading::new(1.0, f64::INFINITY).validate().is_err());
        assert!(Reading::new(-1.0, 0.0).validate().is_ok());
    }
}
