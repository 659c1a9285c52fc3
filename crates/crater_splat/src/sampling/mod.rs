//! Random sampling primitives shared by every stochastic crater parameter.
//!
//! All randomness in the crate flows through [`sample`]. Inputs arrive as text from the
//! configuration layer and are coerced with [`coerce`]; a bound that failed coercion is carried
//! as `None` and replaced by [`FALLBACK_RANGE`] at the point of sampling.
//!
//! Submodules derive the crater metrics ([`metric`]) and crater centers ([`position`]) on top
//! of these primitives.
use rand::Rng as RngCore;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod metric;
pub mod position;

pub use metric::{derive_metric, percent_of_diameter, MetricKind, MetricSpec};
pub use position::{axis_bounds, deviation, sample_position, AreaAxis, CraterArea};

/// Range substituted when either bound of a [`SampleRange`] is not numeric.
pub const FALLBACK_RANGE: (f64, f64) = (0.0, 1.0);

/// Parse configuration text as a finite float.
///
/// Surrounding whitespace is ignored. Non-finite values (`inf`, `NaN`) are treated as
/// malformed input.
pub fn coerce(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Round to two decimal places.
///
/// Rounds the exact binary value to nearest, ties to even. Fixed-precision formatting is exact,
/// so the value is never scaled before rounding.
pub fn round2(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{value:.2}").parse().unwrap_or(value)
}

/// Generate a random float in the range [0, 1).
#[inline]
pub(crate) fn rand01(rng: &mut dyn RngCore) -> f64 {
    // 53 random mantissa bits.
    (rng.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
}

/// Draw uniformly between `min` and `max` and round to two decimals.
///
/// Reversed bounds sample the same interval. Equal bounds yield that value (rounded).
/// Exactly one value is drawn from `rng` per call.
pub fn sample(min: f64, max: f64, rng: &mut dyn RngCore) -> f64 {
    let u = rand01(rng);
    round2(min + (max - min) * u)
}

/// Sample a possibly malformed range, substituting [`FALLBACK_RANGE`] when either bound is
/// missing.
pub fn sample_range(range: SampleRange, rng: &mut dyn RngCore) -> f64 {
    let (min, max) = range.resolved();
    sample(min, max, rng)
}

/// Sample directly from two text bounds.
pub fn sample_text(min: &str, max: &str, rng: &mut dyn RngCore) -> f64 {
    sample_range(SampleRange::parse(min, max), rng)
}

/// A min/max pair whose bounds may have failed coercion.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SampleRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl SampleRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    /// A degenerate range that always samples `value`.
    pub fn fixed(value: f64) -> Self {
        Self::new(value, value)
    }

    pub fn parse(min: &str, max: &str) -> Self {
        Self {
            min: coerce(min),
            max: coerce(max),
        }
    }

    /// Bounds used for sampling: both configured bounds, or [`FALLBACK_RANGE`].
    pub fn resolved(&self) -> (f64, f64) {
        match (self.min, self.max) {
            (Some(min), Some(max)) => (min, max),
            _ => FALLBACK_RANGE,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.min.is_some() && self.max.is_some()
    }
}
