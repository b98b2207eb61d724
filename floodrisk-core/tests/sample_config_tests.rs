//! Tests against the sample configuration and model shipped at the repo root

use floodrisk_core::config::load_and_resolve;
use floodrisk_core::{build_engine, Reading, RiskLabel, ScenarioTier};
use std::path::PathBuf;

fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .to_path_buf()
}

#[test]
fn test_sample_config_loads_model() {
    let root = repo_root();
    let resolved = load_and_resolve(&root, None).unwrap();
    assert_eq!(
        resolved.config_path,
        Some(root.join("floodrisk.config.json"))
    );
    assert_eq!(
        resolved.model_path,
        Some(root.join("models/belem-logistic.json"))
    );

    let engine = build_engine(&resolved);
    assert!(!engine.is_degraded());
}

#[test]
fn test_sample_model_catastrophe_scenario() {
    let resolved = load_and_resolve(&repo_root(), None).unwrap();
    let engine = build_engine(&resolved);

    let assessment = engine.assess(&Reading::new(150.0, 1.0));
    assert_eq!(assessment.tier, ScenarioTier::Catastrophe);
    assert!(assessment.failures.is_empty());
    assert_eq!(assessment.results.len(), resolved.catalogue.len());

    let jurunas = &assessment.results["Jurunas"];
    assert_eq!(jurunas.risk, 1.0);
    assert_eq!(jurunas.classification, RiskLabel::High);

    // High ground keeps the model's own estimate
    let nazare = &assessment.results["Nazaré"];
    assert_eq!(nazare.risk, 0.12);
    assert_eq!(nazare.classification, RiskLabel::Low);
}

#[test]
fn test_sample_model_dry_day_is_low_everywhere() {
    let resolved = load_and_resolve(&repo_root(), None).unwrap();
    let engine = build_engine(&resolved);

    let assessment = engine.assess(&Reading::new(5.0, 1.5));
    assert_eq!(assessment.tier, ScenarioTier::Normal);
    assert!(assessment
        .results
        .values()
        .all(|r| r.classification == RiskLabel::Low));
}
