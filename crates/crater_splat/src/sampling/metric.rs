//! Depth, rim height and rim skirt derivation.
//!
//! Each metric is either sampled from its own range or derived as a percentage of the crater
//! diameter, optionally jittered by a symmetric random offset around that base value.
use rand::Rng as RngCore;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::sampling::{round2, sample, sample_range, SampleRange};

/// Diameter used when a percent-of-diameter input fails coercion.
pub const FALLBACK_DIAMETER: f64 = 1.0;
/// Percent used when a percent-of-diameter input fails coercion.
pub const FALLBACK_PERCENT: f64 = 0.1;

/// How a derived metric is produced.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MetricSpec {
    /// Sample independently of the diameter.
    Range(SampleRange),
    /// Derive as `diameter * percent`, jittered by `±base * fraction` when `offset` is set.
    PercentOfDiameter { percent: Option<f64>, offset: bool },
}

impl MetricSpec {
    pub fn range(min: f64, max: f64) -> Self {
        MetricSpec::Range(SampleRange::new(min, max))
    }

    pub fn percent(percent: f64, offset: bool) -> Self {
        MetricSpec::PercentOfDiameter {
            percent: Some(percent),
            offset,
        }
    }
}

/// The three crater metrics that derive from the diameter.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MetricKind {
    Depth,
    RimHeight,
    RimSkirt,
}

impl MetricKind {
    /// Fraction of the base value used as the symmetric offset.
    ///
    /// Depth and rim height always use `percent`. Rim skirt percentages above 1.0 (skirts wider
    /// than the crater) use the reciprocal instead, keeping the offset within the base value.
    pub fn offset_fraction(self, percent: f64) -> f64 {
        match self {
            MetricKind::RimSkirt if percent > 1.0 => 1.0 / percent,
            _ => percent,
        }
    }
}

/// `round2(diameter * percent)`, falling back to `FALLBACK_DIAMETER * FALLBACK_PERCENT` when
/// either input is missing.
pub fn percent_of_diameter(diameter: Option<f64>, percent: Option<f64>) -> f64 {
    match (diameter, percent) {
        (Some(diameter), Some(percent)) => round2(diameter * percent),
        _ => round2(FALLBACK_DIAMETER * FALLBACK_PERCENT),
    }
}

/// Produce one metric value for a crater of the given diameter.
///
/// Draws from `rng` once when sampling a range or applying an offset, never otherwise.
pub fn derive_metric(
    kind: MetricKind,
    spec: &MetricSpec,
    diameter: f64,
    rng: &mut dyn RngCore,
) -> f64 {
    match *spec {
        MetricSpec::Range(range) => sample_range(range, rng),
        MetricSpec::PercentOfDiameter { percent, offset } => {
            let base = percent_of_diameter(Some(diameter), percent);
            if !offset {
                return base;
            }
            let fraction = kind.offset_fraction(percent.unwrap_or(FALLBACK_PERCENT));
            let delta = base * fraction;
            sample(base - delta, base + delta, rng)
        }
    }
}
