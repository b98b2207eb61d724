//! Elevation bias applied to raw hazard probabilities
//!
//! The adjustment is a step function of elevation conditioned on the scenario
//! tier. Each (tier, bracket) cell is a single [`Adjustment`] so the tuned
//! constants live in one table instead of nested conditionals.
//!
//! Global invariants enforced:
//! - Pure and deterministic
//! - Adjusted values may leave [0, 1]; [`clamp_risk`] bounds them afterwards

use crate::scenario::ScenarioTier;

/// Upper bound of the low-lying bracket (metres)
pub const LOW_ELEVATION_MAX: f64 = 6.0;
/// Lower bound of the high-ground bracket (metres)
pub const HIGH_ELEVATION_MIN: f64 = 10.0;

/// Elevation range used to pick an adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElevationBracket {
    Low,
    Mid,
    High,
}

impl ElevationBracket {
    /// Place an elevation in its bracket for the given tier
    ///
    /// The low bracket is `<= 6.0` except under Catastrophe, where the cutoff
    /// is strict (`< 6.0`). The high bracket is always `>= 10.0`.
    pub fn for_elevation(elevation: f64, tier: ScenarioTier) -> Self {
        let low = match tier {
            ScenarioTier::Catastrophe => elevation < LOW_ELEVATION_MAX,
            _ => elevation <= LOW_ELEVATION_MAX,
        };
        if low {
            ElevationBracket::Low
        } else if elevation >= HIGH_ELEVATION_MIN {
            ElevationBracket::High
        } else {
            ElevationBracket::Mid
        }
    }
}

/// One cell of the adjustment table
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Adjustment {
    /// Pass the raw probability through
    Unchanged,
    /// Add a fixed offset
    Offset(f64),
    /// Subtract `elevation * factor`
    ElevationRelief(f64),
    /// Replace the raw probability outright
    Override(f64),
}

impl Adjustment {
    pub fn apply(&self, raw_probability: f64, elevation: f64) -> f64 {
        match *self {
            Adjustment::Unchanged => raw_probability,
            Adjustment::Offset(offset) => raw_probability + offset,
            Adjustment::ElevationRelief(factor) => raw_probability - elevation * factor,
            Adjustment::Override(value) => value,
        }
    }
}

/// Look up the adjustment for a tier and elevation bracket
pub fn adjustment_for(tier: ScenarioTier, bracket: ElevationBracket) -> Adjustment {
    use Adjustment::*;
    use ElevationBracket as B;

    match (tier, bracket) {
        // Low ground is unconditionally flooded
        (ScenarioTier::Catastrophe, B::Low) => Override(1.0),
        (ScenarioTier::Catastrophe, B::Mid | B::High) => Unchanged,

        (ScenarioTier::Critical, B::Low) => Offset(0.30),
        (ScenarioTier::Critical, B::Mid) => Unchanged,
        (ScenarioTier::Critical, B::High) => ElevationRelief(0.03),

        (ScenarioTier::Alert, B::Low) => Offset(0.15),
        (ScenarioTier::Alert, B::Mid) => Unchanged,
        (ScenarioTier::Alert, B::High) => ElevationRelief(0.04),

        (ScenarioTier::Normal, B::Low) => Unchanged,
        (ScenarioTier::Normal, B::Mid) => ElevationRelief(0.02),
        (ScenarioTier::Normal, B::High) => ElevationRelief(0.05),
    }
}

/// Bias a raw hazard probability by elevation under the current tier
///
/// The result is not bounded; pass it through [`clamp_risk`].
pub fn adjust_risk(raw_probability: f64, elevation: f64, tier: ScenarioTier) -> f64 {
    let bracket = ElevationBracket::for_elevation(elevation, tier);
    adjustment_for(tier, bracket).apply(raw_probability, elevation)
}

/// Bound a value to [0.0, 1.0]
///
/// Negative zero is normalized to `0.0`.
pub fn clamp_risk(value: f64) -> f64 {
    value.clamp(0.0, 1.0) + 0.0
}
