//! Per-request orchestration
//!
//! Global invariants enforced:
//! - One scenario tier per request, shared by every location
//! - Locations are computed independently; parallel and sequential runs
//!   produce identical results
//! - Every reported risk lies in [0, 1]
//! - A failed prediction omits its location instead of inventing a value

use crate::adjust::{adjust_risk, clamp_risk};
use crate::catalogue::{LocationCatalogue, LocationRecord};
use crate::model::HazardModel;
use crate::report::{round_risk, Assessment, LocationFailure, ResultCollection, RiskRecord};
use crate::risk::{classify_risk_with_thresholds, ClassificationThresholds};
use crate::scenario::{classify_scenario, Reading, ScenarioTier};
use anyhow::Result;
use rayon::prelude::*;

/// Risk calibration engine, built once at startup and shared across requests
pub struct RiskEngine {
    catalogue: LocationCatalogue,
    model: Option<Box<dyn HazardModel>>,
    thresholds: ClassificationThresholds,
    parallel: bool,
}

impl RiskEngine {
    /// Create an engine; `model: None` puts it in degraded mode
    pub fn new(
        catalogue: LocationCatalogue,
        model: Option<Box<dyn HazardModel>>,
        thresholds: ClassificationThresholds,
    ) -> Self {
        RiskEngine {
            catalogue,
            model,
            thresholds,
            parallel: true,
        }
    }

    /// Fan per-location work out over the rayon pool (default) or run it in
    /// catalogue order on the calling thread
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn is_degraded(&self) -> bool {
        self.model.is_none()
    }

    /// Assess every catalogued location for one reading
    pub fn assess(&self, reading: &Reading) -> Assessment {
        let tier = classify_scenario(reading);

        let Some(model) = self.model.as_deref() else {
            log::debug!("degraded mode: returning empty result");
            return Assessment {
                tier,
                degraded: true,
                results: ResultCollection::new(),
                failures: Vec::new(),
            };
        };

        log::debug!(
            "assessing {} locations (rainfall={} mm, water_level={} m, tier={})",
            self.catalogue.len(),
            reading.rainfall_mm,
            reading.water_level_m,
            tier
        );

        let outcomes: Vec<(&LocationRecord, Result<RiskRecord>)> = if self.parallel {
            self.catalogue
                .locations()
                .par_iter()
                .map(|location| (location, self.assess_location(model, reading, tier, location)))
                .collect()
        } else {
            self.catalogue
                .locations()
                .iter()
                .map(|location| (location, self.assess_location(model, reading, tier, location)))
                .collect()
        };

        let mut results = ResultCollection::new();
        let mut failures = Vec::new();
        for (location, outcome) in outcomes {
            match outcome {
                Ok(record) => {
                    results.insert(location.name.clone(), record);
                }
                Err(e) => {
                    log::warn!("skipping location {}: {:#}", location.name, e);
                    failures.push(LocationFailure {
                        name: location.name.clone(),
                        reason: format!("{:#}", e),
                    });
                }
            }
        }

        Assessment {
            tier,
            degraded: false,
            results,
            failures,
        }
    }

    fn assess_location(
        &self,
        model: &dyn HazardModel,
        reading: &Reading,
        tier: ScenarioTier,
        location: &LocationRecord,
    ) -> Result<RiskRecord> {
        let raw = model.predict(reading.rainfall_mm, reading.water_level_m, location.elevation)?;
        if !raw.is_finite() {
            anyhow::bail!("model returned a non-finite probability ({})", raw);
        }
        Ok(calibrate(raw, location.elevation, tier, &self.thresholds))
    }
}

/// Adjust, clamp, and classify one raw probability
pub fn calibrate(
    raw_probability: f64,
    elevation: f64,
    tier: ScenarioTier,
    thresholds: &ClassificationThresholds,
) -> RiskRecord {
    let risk = clamp_risk(adjust_risk(raw_probability, elevation, tier));
    RiskRecord {
        risk: round_risk(risk),
        elevation,
        classification: classify_risk_with_thresholds(risk, thresholds),
    }
}
