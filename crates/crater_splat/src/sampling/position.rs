//! Crater center sampling within an axis-aligned area on the horizontal plane.
use glam::DVec3;
use rand::Rng as RngCore;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::sampling::{round2, sample};

/// One horizontal axis of the placement area.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AreaAxis {
    /// Center coordinate, `None` when the configured text was not numeric.
    pub center: Option<f64>,
    /// Full width along this axis, `None` when the configured text was not numeric.
    pub extent: Option<f64>,
}

impl AreaAxis {
    pub fn new(center: f64, extent: f64) -> Self {
        Self {
            center: Some(center),
            extent: Some(extent),
        }
    }
}

/// Placement area for crater centers. The vertical axis is always zero.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CraterArea {
    pub x: AreaAxis,
    pub z: AreaAxis,
}

impl CraterArea {
    pub fn new(x: AreaAxis, z: AreaAxis) -> Self {
        Self { x, z }
    }

    /// A square area of side `extent` centered at the origin.
    pub fn centered(extent: f64) -> Self {
        Self::new(AreaAxis::new(0.0, extent), AreaAxis::new(0.0, extent))
    }
}

impl Default for CraterArea {
    fn default() -> Self {
        Self::centered(1000.0)
    }
}

/// Half of the absolute extent, or 0.0 for a missing extent.
pub fn deviation(extent: Option<f64>) -> f64 {
    extent.map(|e| (e * 0.5).abs()).unwrap_or(0.0)
}

/// Rounded `(low, high)` sampling bounds for one axis.
///
/// A missing center yields `(-deviation, deviation)`.
pub fn axis_bounds(axis: AreaAxis) -> (f64, f64) {
    let dev = deviation(axis.extent);
    match axis.center {
        Some(center) => (round2(center - dev), round2(center + dev)),
        None => (round2(-dev), round2(dev)),
    }
}

/// Sample a crater center. Draws x first, then z.
pub fn sample_position(area: &CraterArea, rng: &mut dyn RngCore) -> DVec3 {
    let (x_low, x_high) = axis_bounds(area.x);
    let (z_low, z_high) = axis_bounds(area.z);
    let x = sample(x_low, x_high, rng);
    let z = sample(z_low, z_high, rng);
    DVec3::new(x, 0.0, z)
}
