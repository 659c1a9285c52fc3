//! Apply configuration.
//!
//! [`Configuration`] is the immutable snapshot of user settings an apply runs against. Numeric
//! inputs keep the result of text coercion (`None` for malformed text) so that each consumer
//! applies its own fallback. [`raw::RawConfiguration`] is the flat text form collected from a
//! user interface or a file; [`preset::Preset`] fills it with named crater ranges.
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::sampling::{CraterArea, MetricSpec, SampleRange};
use crate::scene::classes;

pub mod preset;
pub mod raw;

pub use preset::Preset;
pub use raw::RawConfiguration;

/// Shader assigned to each crater's rim shader input.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RimShaderClass {
    AlpineFractal,
    Displacement,
    FakeStones,
    ImageMap,
    PowerFractal,
    StrataAndOutcrops,
    TwistAndShear,
}

impl RimShaderClass {
    pub const ALL: [RimShaderClass; 7] = [
        RimShaderClass::AlpineFractal,
        RimShaderClass::Displacement,
        RimShaderClass::FakeStones,
        RimShaderClass::ImageMap,
        RimShaderClass::PowerFractal,
        RimShaderClass::StrataAndOutcrops,
        RimShaderClass::TwistAndShear,
    ];

    /// Host node class.
    pub fn class_name(self) -> &'static str {
        match self {
            RimShaderClass::AlpineFractal => classes::ALPINE_FRACTAL_SHADER_V2,
            RimShaderClass::Displacement => classes::DISPLACEMENT_SHADER,
            RimShaderClass::FakeStones => classes::FAKE_STONES_SHADER,
            RimShaderClass::ImageMap => classes::IMAGE_MAP_SHADER,
            RimShaderClass::PowerFractal => classes::POWER_FRACTAL_SHADER_V3,
            RimShaderClass::StrataAndOutcrops => classes::STRATA_AND_OUTCROPS_SHADER_V2,
            RimShaderClass::TwistAndShear => classes::TWIST_AND_SHEAR_SHADER,
        }
    }

    /// Short human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            RimShaderClass::AlpineFractal => "Alpine",
            RimShaderClass::Displacement => "Displacement",
            RimShaderClass::FakeStones => "Fake stones",
            RimShaderClass::ImageMap => "Image map",
            RimShaderClass::PowerFractal => "Power fractal",
            RimShaderClass::StrataAndOutcrops => "Strata and outcrops",
            RimShaderClass::TwistAndShear => "Twist and shear",
        }
    }
}

impl FromStr for RimShaderClass {
    type Err = Error;

    /// Accepts either the host class name or the label, case-insensitively.
    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        RimShaderClass::ALL
            .into_iter()
            .find(|c| {
                c.class_name().eq_ignore_ascii_case(wanted) || c.label().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| Error::InvalidConfig(format!("unknown rim shader '{wanted}'")))
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RimShaderSpec {
    #[default]
    None,
    Shader(RimShaderClass),
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum GroupSpec {
    #[default]
    None,
    Named(String),
}

/// Optional mountain (positive amplitude) or valley (negative) the craters sit on.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum BaseShapeSpec {
    #[default]
    None,
    MountainOrValley { amplitude: f64 },
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WarpSpec {
    #[default]
    Disabled,
    Enabled,
}

/// How the finished crater chain is attached to the terrain-computation node.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum InsertionMode {
    /// Leave the chain disconnected.
    Skip,
    /// Point the terrain node's main input at the chain head, discarding the old input.
    #[default]
    ReplaceMainInput,
    /// Blend the chain with the old input through a merge shader.
    MergeWithExisting,
    /// Feed the old input into the start of the chain and the chain into the terrain node.
    InsertInline,
}

impl InsertionMode {
    pub fn label(self) -> &'static str {
        match self {
            InsertionMode::Skip => "skip",
            InsertionMode::ReplaceMainInput => "replace",
            InsertionMode::MergeWithExisting => "merge",
            InsertionMode::InsertInline => "inline",
        }
    }
}

impl fmt::Display for InsertionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for InsertionMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "skip" | "don't" | "none" => Ok(InsertionMode::Skip),
            "replace" | "replace_main_input" | "output > main input" => {
                Ok(InsertionMode::ReplaceMainInput)
            }
            "merge" | "merge_with_existing" | "merge shader" => Ok(InsertionMode::MergeWithExisting),
            "inline" | "insert_inline" => Ok(InsertionMode::InsertInline),
            other => Err(Error::InvalidConfig(format!(
                "unknown insertion mode '{other}'"
            ))),
        }
    }
}

/// Which terrain-computation node receives the chain.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum TargetSelection {
    /// First `compute_terrain` child of the root, in adapter enumeration order.
    #[default]
    FirstFound,
    /// The node at an explicit path.
    Path(String),
}

/// Immutable snapshot of all settings for one apply.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq)]
pub struct Configuration {
    pub crater_count: usize,
    pub area: CraterArea,
    pub diameter: SampleRange,
    pub depth: MetricSpec,
    pub rim_height: MetricSpec,
    pub rim_skirt: MetricSpec,
    pub softness: SampleRange,
    pub tightness: SampleRange,
    pub rim_shader: RimShaderSpec,
    pub group: GroupSpec,
    pub base_shape: BaseShapeSpec,
    pub warp: WarpSpec,
    pub insertion: InsertionMode,
    pub target: TargetSelection,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            crater_count: 1,
            area: CraterArea::default(),
            diameter: SampleRange::new(500.0, 1500.0),
            depth: MetricSpec::range(50.0, 150.0),
            rim_height: MetricSpec::range(5.0, 20.0),
            rim_skirt: MetricSpec::range(500.0, 1500.0),
            softness: SampleRange::new(0.0, 1.0),
            tightness: SampleRange::new(0.0, 16.0),
            rim_shader: RimShaderSpec::None,
            group: GroupSpec::None,
            base_shape: BaseShapeSpec::None,
            warp: WarpSpec::Disabled,
            insertion: InsertionMode::ReplaceMainInput,
            target: TargetSelection::FirstFound,
        }
    }
}

impl Configuration {
    /// Creates a default configuration producing `crater_count` craters.
    pub fn new(crater_count: usize) -> Self {
        Self {
            crater_count,
            ..Default::default()
        }
    }

    pub fn with_area(mut self, area: CraterArea) -> Self {
        self.area = area;
        self
    }

    pub fn with_diameter(mut self, diameter: SampleRange) -> Self {
        self.diameter = diameter;
        self
    }

    pub fn with_depth(mut self, depth: MetricSpec) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_rim_height(mut self, rim_height: MetricSpec) -> Self {
        self.rim_height = rim_height;
        self
    }

    pub fn with_rim_skirt(mut self, rim_skirt: MetricSpec) -> Self {
        self.rim_skirt = rim_skirt;
        self
    }

    pub fn with_softness(mut self, softness: SampleRange) -> Self {
        self.softness = softness;
        self
    }

    pub fn with_tightness(mut self, tightness: SampleRange) -> Self {
        self.tightness = tightness;
        self
    }

    pub fn with_rim_shader(mut self, rim_shader: RimShaderSpec) -> Self {
        self.rim_shader = rim_shader;
        self
    }

    pub fn with_group(mut self, group: GroupSpec) -> Self {
        self.group = group;
        self
    }

    pub fn with_base_shape(mut self, base_shape: BaseShapeSpec) -> Self {
        self.base_shape = base_shape;
        self
    }

    pub fn with_warp(mut self, warp: WarpSpec) -> Self {
        self.warp = warp;
        self
    }

    pub fn with_insertion(mut self, insertion: InsertionMode) -> Self {
        self.insertion = insertion;
        self
    }

    pub fn with_target(mut self, target: TargetSelection) -> Self {
        self.target = target;
        self
    }

    /// Validates the configuration, returning an error if invalid.
    ///
    /// Malformed numeric bounds are not errors; they fall back when sampled.
    pub fn validate(&self) -> Result<()> {
        if self.crater_count == 0 {
            return Err(Error::InvalidConfig("crater_count must be > 0".into()));
        }
        if let GroupSpec::Named(name) = &self.group {
            if name.trim().is_empty() {
                return Err(Error::InvalidConfig("group name must not be empty".into()));
            }
        }
        if let TargetSelection::Path(path) = &self.target {
            if path.trim().is_empty() {
                return Err(Error::InvalidConfig("target path must not be empty".into()));
            }
        }
        Ok(())
    }
}
