//! Configuration file support
//!
//! Loads deployment-specific configuration from JSON files.
//!
//! Search order:
//! 1. Explicit path (--config CLI flag)
//! 2. `.floodriskrc.json` in the working directory
//! 3. `floodrisk.config.json` in the working directory
//!
//! All fields are optional. CLI flags take precedence over config file values.

use crate::catalogue::{LocationCatalogue, LocationRecord};
use crate::risk::ClassificationThresholds;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file names probed during discovery, in priority order
const CONFIG_FILE_NAMES: &[&str] = &[".floodriskrc.json", "floodrisk.config.json"];

/// Configuration loaded from a JSON config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FloodRiskConfig {
    /// Custom classification thresholds
    #[serde(default)]
    pub thresholds: Option<ThresholdConfig>,

    /// Path to the predictive model coefficients file
    #[serde(default)]
    pub model_path: Option<PathBuf>,

    /// Replacement location catalogue (default: built-in Belém table)
    #[serde(default)]
    pub locations: Option<Vec<LocationRecord>>,

    /// Fan out per-location work across threads (default: true)
    #[serde(default)]
    pub parallel: Option<bool>,
}

/// Custom classification thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThresholdConfig {
    /// Upper bound of the Low band (default: 0.45)
    pub medium: Option<f64>,
    /// Upper bound of the Medium band (default: 0.75)
    pub high: Option<f64>,
}

/// Resolved configuration ready for building an engine
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub thresholds: ClassificationThresholds,
    /// Model path, made absolute relative to the config file directory
    pub model_path: Option<PathBuf>,
    pub catalogue: LocationCatalogue,
    pub parallel: bool,
    /// Path the config was loaded from (None if defaults)
    pub config_path: Option<PathBuf>,
}

/// Check classification thresholds are inside (0, 1) and ordered
pub fn validate_thresholds(thresholds: &ClassificationThresholds) -> Result<()> {
    let ClassificationThresholds { medium, high } = *thresholds;

    if medium.is_nan() || medium <= 0.0 || medium >= 1.0 {
        anyhow::bail!("thresholds.medium must be between 0 and 1 (got {})", medium);
    }
    if high.is_nan() || high <= 0.0 || high >= 1.0 {
        anyhow::bail!("thresholds.high must be between 0 and 1 (got {})", high);
    }
    if medium >= high {
        anyhow::bail!(
            "thresholds.medium ({}) must be less than thresholds.high ({})",
            medium,
            high
        );
    }
    Ok(())
}

impl FloodRiskConfig {
    fn thresholds(&self) -> ClassificationThresholds {
        let defaults = ClassificationThresholds::default();
        match &self.thresholds {
            Some(t) => ClassificationThresholds {
                medium: t.medium.unwrap_or(defaults.medium),
                high: t.high.unwrap_or(defaults.high),
            },
            None => defaults,
        }
    }

    /// Validate the configuration for logical errors
    pub fn validate(&self) -> Result<()> {
        validate_thresholds(&self.thresholds())?;

        if let Some(ref path) = self.model_path {
            if path.as_os_str().is_empty() {
                anyhow::bail!("model_path must not be empty");
            }
        }

        if let Some(ref locations) = self.locations {
            LocationCatalogue::new(locations.clone()).context("invalid locations")?;
        }

        Ok(())
    }

    /// Resolve config into the form used to build an engine
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        self.validate()?;

        let catalogue = match &self.locations {
            Some(locations) => LocationCatalogue::new(locations.clone())?,
            None => LocationCatalogue::belem(),
        };

        Ok(ResolvedConfig {
            thresholds: self.thresholds(),
            model_path: self.model_path.clone(),
            catalogue,
            parallel: self.parallel.unwrap_or(true),
            config_path: None,
        })
    }
}

impl ResolvedConfig {
    /// Build a ResolvedConfig with all defaults (no config file)
    pub fn defaults() -> Result<Self> {
        FloodRiskConfig::default().resolve()
    }
}

/// Discover and load a config file from a directory
///
/// Returns `None` if no config file is found (use defaults).
pub fn discover_config(root: &Path) -> Result<Option<(FloodRiskConfig, PathBuf)>> {
    for name in CONFIG_FILE_NAMES {
        let path = root.join(name);
        if path.exists() {
            let config = load_config_file(&path)?;
            return Ok(Some((config, path)));
        }
    }
    Ok(None)
}

/// Load config from an explicit file path
pub fn load_config_file(path: &Path) -> Result<FloodRiskConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;

    let config: FloodRiskConfig = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse config file: {}", path.display()))?;

    config
        .validate()
        .with_context(|| format!("invalid config in: {}", path.display()))?;

    Ok(config)
}

/// Load and resolve config
///
/// If `config_path` is provided, loads from that file.
/// Otherwise, discovers config in `root`.
/// Returns default config if nothing is found.
pub fn load_and_resolve(root: &Path, config_path: Option<&Path>) -> Result<ResolvedConfig> {
    let (config, source_path) = if let Some(path) = config_path {
        let config = load_config_file(path)?;
        (config, Some(path.to_path_buf()))
    } else {
        match discover_config(root)? {
            Some((config, path)) => (config, Some(path)),
            None => (FloodRiskConfig::default(), None),
        }
    };

    let mut resolved = config.resolve()?;

    // Relative model paths are relative to the file that named them
    if let (Some(model_path), Some(source)) = (resolved.model_path.as_mut(), source_path.as_ref())
    {
        if model_path.is_relative() {
            let base = source.parent().unwrap_or_else(|| Path::new(""));
            *model_path = base.join(&*model_path);
        }
    }

    resolved.config_path = source_path;
    Ok(resolved)
}
