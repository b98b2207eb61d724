//! Predictive model collaborator
//!
//! The engine treats the hazard model as opaque: it is asked for a raw
//! probability per (reading, elevation) and its output is never assumed to lie
//! in [0, 1].

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Source of raw hazard probabilities
pub trait HazardModel: Send + Sync {
    /// Raw hazard estimate for one reading at one elevation
    fn predict(&self, rainfall_mm: f64, water_level_m: f64, elevation: f64) -> Result<f64>;
}

/// Adapter exposing a closure as a [`HazardModel`]
pub struct FnModel<F>(pub F);

impl<F> HazardModel for FnModel<F>
where
    F: Fn(f64, f64, f64) -> Result<f64> + Send + Sync,
{
    fn predict(&self, rainfall_mm: f64, water_level_m: f64, elevation: f64) -> Result<f64> {
        (self.0)(rainfall_mm, water_level_m, elevation)
    }
}

/// Logistic hazard model loaded from a coefficients file
///
/// `p = 1 / (1 + exp(-(intercept + rainfall*r + water_level*w + elevation*e)))`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogisticModel {
    pub intercept: f64,
    pub rainfall: f64,
    pub water_level: f64,
    pub elevation: f64,
}

impl LogisticModel {
    /// Validate that every coefficient is usable
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("intercept", self.intercept),
            ("rainfall", self.rainfall),
            ("water_level", self.water_level),
            ("elevation", self.elevation),
        ] {
            if !value.is_finite() {
                anyhow::bail!("model coefficient {} must be finite (got {})", name, value);
            }
        }
        Ok(())
    }

    fn linear_term(&self, rainfall_mm: f64, water_level_m: f64, elevation: f64) -> f64 {
        self.intercept
            + self.rainfall * rainfall_mm
            + self.water_level * water_level_m
            + self.elevation * elevation
    }
}

impl HazardModel for LogisticModel {
    fn predict(&self, rainfall_mm: f64, water_level_m: f64, elevation: f64) -> Result<f64> {
        let z = self.linear_term(rainfall_mm, water_level_m, elevation);
        Ok(1.0 / (1.0 + (-z).exp()))
    }
}

/// Load a logistic model from a JSON coefficients file
///
/// Any failure here means the model is unavailable; callers decide whether to
/// run the engine in degraded mode.
pub fn load_model(path: &Path) -> Result<LogisticModel> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read model file: {}", path.display()))?;

    let model: LogisticModel = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse model file: {}", path.display()))?;

    model
        .validate()
        .with_context(|| format!("invalid model in: {}", path.display()))?;

    log::debug!("loaded hazard model from {}", path.display());
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn sample_model() -> LogisticModel {
        LogisticModel {
            intercept: -6.0,
            rainfall: 0.03,
            water_level: 1.5,
            elevation: -0.15,
        }
    }

    #[test]
    fn test_logistic_prediction_at_zero_is_half() {
        let model = LogisticModel {
            intercept: 0.0,
            rainfall: 0.0,
            water_level: 0.0,
            elevation: 0.0,
        };
        assert_eq!(model.predict(10.0, 2.0, 5.0).unwrap(), 0.5);
    }

    #[test]
    fn test_logistic_prediction_is_monotonic() {
        let model = sample_model();
        let dry = model.predict(0.0, 1.0, 5.0).unwrap();
        let wet = model.predict(120.0, 1.0, 5.0).unwrap();
        let higher = model.predict(120.0, 1.0, 14.0).unwrap();
        assert!(wet > dry);
        assert!(higher < wet);
    }

    #[test]
    fn test_fn_model_delegates() {
        let model = FnModel(|rain: f64, level: f64, elevation: f64| -> Result<f64> {
            Ok(rain + level - elevation)
        });
        assert_eq!(model.predict(1.0, 2.0, 0.5).unwrap(), 2.5);
    }

    #[test]
    fn test_load_model_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        fs::write(
            &path,
            r#"{"intercept": -6.0, "rainfall": 0.03, "water_level": 1.5, "elevation": -0.15}"#,
        )
        .unwrap();

        let model = load_model(&path).unwrap();
        assert_eq!(model, sample_model());
    }

    #[test]
    fn test_load_missing_model_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_model(&dir.path().join("absent.json")).is_err());
    }

    #[test]
    fn test_load_malformed_model_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        fs::write(&path, r#"{"intercept": -6.0, "rainfall": 0.03}"#).unwrap();
        assert!(load_model(&path).is_err());

        fs::write(
            &path,
            r#"{"intercept": 1e400, "rainfall": 0.0, "water_level": 0.0, "elevation": 0.0}"#,
        )
        .unwrap();
        assert!(load_model(&path).is_err());
    }
}
