//! Flood risk core library - calibrates raw hazard probabilities into
//! per-location risk classifications

#![deny(warnings)]

// Global invariants enforced in this crate:
// - The location catalogue is immutable after startup
// - One scenario tier per reading, shared by every location
// - Every reported risk lies in [0, 1]
// - Identical input yields byte-for-byte identical output

pub mod adjust;
pub mod catalogue;
pub mod config;
pub mod engine;
pub mod model;
pub mod report;
pub mod risk;
pub mod scenario;

pub use catalogue::{LocationCatalogue, LocationRecord};
pub use config::ResolvedConfig;
pub use engine::RiskEngine;
pub use model::{load_model, FnModel, HazardModel, LogisticModel};
pub use report::{render_json, render_text, Assessment, ResultCollection, RiskRecord};
pub use risk::{ClassificationThresholds, RiskLabel};
pub use scenario::{classify_scenario, Reading, ScenarioTier};

use anyhow::Result;

/// Build an engine from resolved configuration
///
/// A model that fails to load is not an error: the engine starts in degraded
/// mode and every assessment returns an empty result.
pub fn build_engine(config: &ResolvedConfig) -> RiskEngine {
    let model: Option<Box<dyn HazardModel>> = match &config.model_path {
        Some(path) => match load_model(path) {
            Ok(model) => Some(Box::new(model) as Box<dyn HazardModel>),
            Err(e) => {
                log::warn!("predictive model unavailable: {:#}", e);
                None
            }
        },
        None => {
            log::warn!("no predictive model configured");
            None
        }
    };

    RiskEngine::new(config.catalogue.clone(), model, config.thresholds).with_parallel(config.parallel)
}

/// Assess a reading with the default catalogue and thresholds
pub fn assess(reading: &Reading, model: Box<dyn HazardModel>) -> Result<Assessment> {
    reading.validate()?;
    let engine = RiskEngine::new(
        LocationCatalogue::belem(),
        Some(model),
        ClassificationThresholds::default(),
    );
    Ok(engine.assess(reading))
}
