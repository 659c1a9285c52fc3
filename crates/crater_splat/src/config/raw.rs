//! Flat text configuration.
//!
//! Mirrors a settings form: every numeric value is text and every feature is a flag.
//! [`RawConfiguration::to_configuration`] coerces the text into a [`Configuration`], keeping
//! malformed numbers as missing values so the samplers can apply their fallbacks.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::{
    BaseShapeSpec, Configuration, GroupSpec, InsertionMode, RimShaderSpec, TargetSelection,
    WarpSpec,
};
use crate::error::Result;
use crate::sampling::{coerce, AreaAxis, CraterArea, MetricSpec, SampleRange};

/// Amplitude used when the base-shape amplitude text is not numeric.
pub const DEFAULT_AMPLITUDE: f64 = 100.0;

/// Text-valued min/max pair plus the percent-of-diameter controls of one metric.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Debug, PartialEq)]
pub struct RawMetric {
    pub min: String,
    pub max: String,
    pub use_percent: bool,
    pub percent: String,
    pub offset: bool,
}

impl RawMetric {
    pub fn new(min: &str, max: &str) -> Self {
        Self {
            min: min.into(),
            max: max.into(),
            use_percent: false,
            percent: "0.1".into(),
            offset: false,
        }
    }

    pub fn to_spec(&self) -> MetricSpec {
        if self.use_percent {
            MetricSpec::PercentOfDiameter {
                percent: coerce(&self.percent),
                offset: self.offset,
            }
        } else {
            MetricSpec::Range(SampleRange::parse(&self.min, &self.max))
        }
    }
}

impl Default for RawMetric {
    fn default() -> Self {
        Self::new("0.0", "1.0")
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Debug, PartialEq)]
pub struct RawConfiguration {
    pub quantity: String,
    pub center_x: String,
    pub center_z: String,
    pub area_x: String,
    pub area_z: String,
    pub diameter_min: String,
    pub diameter_max: String,
    pub depth: RawMetric,
    pub rim_height: RawMetric,
    pub rim_skirt: RawMetric,
    pub softness_min: String,
    pub softness_max: String,
    pub tightness_min: String,
    pub tightness_max: String,
    pub group_enabled: bool,
    pub group_name: String,
    pub rim_shader_enabled: bool,
    pub rim_shader: String,
    pub base_shape_enabled: bool,
    pub amplitude: String,
    pub warp_enabled: bool,
    pub insertion: String,
    /// Explicit terrain node path; empty selects the first one found.
    pub target_path: String,
}

impl Default for RawConfiguration {
    fn default() -> Self {
        Self {
            quantity: "1".into(),
            center_x: "0.0".into(),
            center_z: "0.0".into(),
            area_x: "1000.0".into(),
            area_z: "1000.0".into(),
            diameter_min: "500.0".into(),
            diameter_max: "1500.0".into(),
            depth: RawMetric::new("50.0", "150.0"),
            rim_height: RawMetric::new("5.0", "20.0"),
            rim_skirt: RawMetric::new("500.0", "1500.0"),
            softness_min: "0.0".into(),
            softness_max: "1.0".into(),
            tightness_min: "0.0".into(),
            tightness_max: "16.0".into(),
            group_enabled: false,
            group_name: "Craters".into(),
            rim_shader_enabled: false,
            rim_shader: "alpine_fractal_shader_v2".into(),
            base_shape_enabled: false,
            amplitude: "100.0".into(),
            warp_enabled: false,
            insertion: "replace".into(),
            target_path: String::new(),
        }
    }
}

impl RawConfiguration {
    /// Coerce into a typed [`Configuration`].
    ///
    /// Numeric text never fails here. A non-numeric crater count falls back to 1 and a
    /// non-numeric amplitude to [`DEFAULT_AMPLITUDE`]. Unknown rim shader or insertion mode
    /// names are configuration errors.
    pub fn to_configuration(&self) -> Result<Configuration> {
        let crater_count = parse_count(&self.quantity).unwrap_or_else(|| {
            warn!(
                "Crater quantity '{}' is not a whole number; using 1.",
                self.quantity
            );
            1
        });

        let rim_shader = if self.rim_shader_enabled {
            RimShaderSpec::Shader(self.rim_shader.parse()?)
        } else {
            RimShaderSpec::None
        };

        let group = if self.group_enabled {
            GroupSpec::Named(self.group_name.clone())
        } else {
            GroupSpec::None
        };

        let base_shape = if self.base_shape_enabled {
            let amplitude = coerce(&self.amplitude).unwrap_or_else(|| {
                warn!(
                    "Amplitude '{}' is not numeric; using {}.",
                    self.amplitude, DEFAULT_AMPLITUDE
                );
                DEFAULT_AMPLITUDE
            });
            BaseShapeSpec::MountainOrValley { amplitude }
        } else {
            BaseShapeSpec::None
        };

        let target = if self.target_path.trim().is_empty() {
            TargetSelection::FirstFound
        } else {
            TargetSelection::Path(self.target_path.trim().to_owned())
        };

        let config = Configuration {
            crater_count,
            area: CraterArea::new(
                AreaAxis {
                    center: coerce(&self.center_x),
                    extent: coerce(&self.area_x),
                },
                AreaAxis {
                    center: coerce(&self.center_z),
                    extent: coerce(&self.area_z),
                },
            ),
            diameter: SampleRange::parse(&self.diameter_min, &self.diameter_max),
            depth: self.depth.to_spec(),
            rim_height: self.rim_height.to_spec(),
            rim_skirt: self.rim_skirt.to_spec(),
            softness: SampleRange::parse(&self.softness_min, &self.softness_max),
            tightness: SampleRange::parse(&self.tightness_min, &self.tightness_max),
            rim_shader,
            group,
            base_shape,
            warp: if self.warp_enabled {
                WarpSpec::Enabled
            } else {
                WarpSpec::Disabled
            },
            insertion: self.insertion.parse::<InsertionMode>()?,
            target,
        };
        Ok(config)
    }

    /// Set the area center from text copied out of a viewport, e.g. `xyz: 12.5, 0, -40`.
    ///
    /// The y component is ignored. Returns false and leaves the configuration untouched for
    /// anything that is not three comma-separated values after an `xyz:` prefix.
    pub fn apply_clipboard_position(&mut self, text: &str) -> bool {
        let Some(rest) = text.strip_prefix("xyz:") else {
            return false;
        };
        // One separator character follows the prefix.
        let mut chars = rest.chars();
        chars.next();
        let parts: Vec<&str> = chars.as_str().split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return false;
        }
        self.center_x = parts[0].to_owned();
        self.center_z = parts[2].to_owned();
        true
    }

    /// Move the area center back to the origin.
    pub fn reset_position(&mut self) {
        self.center_x = "0.0".into();
        self.center_z = "0.0".into();
    }
}

fn parse_count(text: &str) -> Option<usize> {
    text.trim().parse::<usize>().ok()
}
