//! Crater generation pipeline.
//!
//! An apply samples [`CraterParams`] for each crater, assembles them into a linear chain of
//! node operations ([`plan`]), optionally splices the chain into the scene's terrain
//! computation ([`splice`]), and executes the result against a scene graph ([`runner`]),
//! reporting progress through [`events`].
use glam::DVec3;
use rand::Rng as RngCore;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::Configuration;
use crate::sampling::{derive_metric, sample_position, sample_range, MetricKind};

pub mod events;
pub mod plan;
pub mod runner;
pub mod splice;

/// Parameters of one generated crater.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct CraterParams {
    /// Center on the horizontal plane; `y` is always 0.
    pub position: DVec3,
    pub diameter: f64,
    pub depth: f64,
    pub rim_height: f64,
    pub rim_skirt: f64,
    pub softness: f64,
    pub tightness: f64,
    /// `gui_group` as written to the crater node; empty without a group.
    ///
    /// Names are only known once the host has created the side nodes, so they stay empty in a
    /// [`plan::CraterPlan`] and are filled in on the report of an apply.
    #[cfg_attr(feature = "serde", serde(default))]
    pub group_name: String,
    /// Display name of the shared rim shader node; empty without one.
    #[cfg_attr(feature = "serde", serde(default))]
    pub rim_shader_name: String,
}

impl CraterParams {
    /// Sample one crater.
    ///
    /// Draw order is fixed: x, z, diameter, depth, rim height, rim skirt, softness, tightness.
    /// The diameter is drawn before the three metrics that derive from it.
    pub fn sample(config: &Configuration, rng: &mut dyn RngCore) -> Self {
        let position = sample_position(&config.area, rng);
        let diameter = sample_range(config.diameter, rng);
        let depth = derive_metric(MetricKind::Depth, &config.depth, diameter, rng);
        let rim_height = derive_metric(MetricKind::RimHeight, &config.rim_height, diameter, rng);
        let rim_skirt = derive_metric(MetricKind::RimSkirt, &config.rim_skirt, diameter, rng);
        let softness = sample_range(config.softness, rng);
        let tightness = sample_range(config.tightness, rng);
        Self {
            position,
            diameter,
            depth,
            rim_height,
            rim_skirt,
            softness,
            tightness,
            group_name: String::new(),
            rim_shader_name: String::new(),
        }
    }

    pub fn radius(&self) -> f64 {
        self.diameter * 0.5
    }
}

/// Format a float as parameter text: shortest round-trip form, whole numbers keep ".0".
pub(crate) fn format_number(value: f64) -> String {
    // Avoid "-0.0" from rounding tiny negatives.
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{value:?}")
}

/// "x y z" parameter text.
pub(crate) fn format_vec3(v: DVec3) -> String {
    format!(
        "{} {} {}",
        format_number(v.x),
        format_number(v.y),
        format_number(v.z)
    )
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::sampling::{CraterArea, MetricSpec, SampleRange};

    #[test]
    fn fixed_ranges_give_fixed_params() {
        let config = Configuration::new(1)
            .with_area(CraterArea::centered(0.0))
            .with_diameter(SampleRange::fixed(500.0))
            .with_depth(MetricSpec::range(50.0, 50.0))
            .with_rim_height(MetricSpec::range(5.0, 5.0))
            .with_rim_skirt(MetricSpec::range(500.0, 500.0))
            .with_softness(SampleRange::fixed(0.0))
            .with_tightness(SampleRange::fixed(0.0));
        let mut rng = StdRng::seed_from_u64(9);
        let p = CraterParams::sample(&config, &mut rng);
        assert_eq!(p.position, DVec3::ZERO);
        assert_eq!(p.diameter, 500.0);
        assert_eq!(p.depth, 50.0);
        assert_eq!(p.rim_height, 5.0);
        assert_eq!(p.rim_skirt, 500.0);
        assert_eq!(p.softness, 0.0);
        assert_eq!(p.tightness, 0.0);
        assert_eq!(p.radius(), 250.0);
    }

    #[test]
    fn metrics_derive_from_the_sampled_diameter() {
        let config = Configuration::new(1)
            .with_depth(MetricSpec::percent(0.1, false))
            .with_rim_height(MetricSpec::percent(0.02, false))
            .with_rim_skirt(MetricSpec::percent(0.5, false));
        let mut rng = StdRng::seed_from_u64(77);
        for _ in 0..50 {
            let p = CraterParams::sample(&config, &mut rng);
            assert!((500.0..=1500.0).contains(&p.diameter));
            assert_eq!(p.depth, crate::sampling::round2(p.diameter * 0.1));
            assert_eq!(p.rim_height, crate::sampling::round2(p.diameter * 0.02));
            assert_eq!(p.rim_skirt, crate::sampling::round2(p.diameter * 0.5));
        }
    }

    #[test]
    fn number_formatting_keeps_decimal_point() {
        assert_eq!(format_number(500.0), "500.0");
        assert_eq!(format_number(12.34), "12.34");
        assert_eq!(format_number(-0.0), "0.0");
        assert_eq!(format_vec3(DVec3::new(1.5, 0.0, -2.0)), "1.5 0.0 -2.0");
    }
}
