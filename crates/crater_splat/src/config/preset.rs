//! Named crater size presets.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::raw::RawConfiguration;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Preset {
    /// 1 m to 10 m.
    VeryTinyCraters,
    /// 30 m to 100 m.
    TinyCraters,
    /// Young craters, 1 km to 10 km.
    AlcYoung,
    /// 50 km to 250 km.
    Mid50kTo200k,
    /// 250 km to 500 km.
    Basins,
    /// Basins with exaggerated rims.
    SciFiBasins,
}

/// Text values a preset writes, as `(min, max)` pairs and percents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PresetValues {
    pub diameter: (&'static str, &'static str),
    pub depth: (&'static str, &'static str),
    pub depth_percent: &'static str,
    pub rim_height: (&'static str, &'static str),
    pub rim_height_percent: &'static str,
    pub rim_skirt: (&'static str, &'static str),
    pub rim_skirt_percent: &'static str,
    pub softness: (&'static str, &'static str),
    pub tightness: (&'static str, &'static str),
}

impl Preset {
    pub const ALL: [Preset; 6] = [
        Preset::VeryTinyCraters,
        Preset::TinyCraters,
        Preset::AlcYoung,
        Preset::Mid50kTo200k,
        Preset::Basins,
        Preset::SciFiBasins,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Preset::VeryTinyCraters => "Very tiny craters 1m-10m",
            Preset::TinyCraters => "Tiny craters 30m-100m",
            Preset::AlcYoung => "ALC young 1k-10k",
            Preset::Mid50kTo200k => "Mid 50k-200k",
            Preset::Basins => "Basins 250k-500k",
            Preset::SciFiBasins => "Sci-fi basins 250k-500k",
        }
    }

    pub fn values(self) -> PresetValues {
        match self {
            Preset::VeryTinyCraters => PresetValues {
                diameter: ("1", "10"),
                depth: ("0.005", "0.25"),
                depth_percent: "0.25",
                rim_height: ("0.05", "0.2"),
                rim_height_percent: "0.1",
                rim_skirt: ("1", "20"),
                rim_skirt_percent: "2",
                softness: ("0.15", "1"),
                tightness: ("2", "8"),
            },
            Preset::TinyCraters => PresetValues {
                diameter: ("30", "100"),
                depth: ("3", "12"),
                depth_percent: "0.12",
                rim_height: ("5", "30"),
                rim_height_percent: "0.1",
                rim_skirt: ("50", "150"),
                rim_skirt_percent: "10",
                softness: ("0.6", "1"),
                tightness: ("3", "5"),
            },
            Preset::AlcYoung => PresetValues {
                diameter: ("1000", "10000"),
                depth: ("100", "1000"),
                depth_percent: "0.2",
                rim_height: ("100", "200"),
                rim_height_percent: "0.2",
                rim_skirt: ("500", "4000"),
                rim_skirt_percent: "0.4",
                softness: ("0.2", "0.4"),
                tightness: ("10", "16"),
            },
            Preset::Mid50kTo200k => PresetValues {
                diameter: ("50000", "250000"),
                depth: ("1000", "2000"),
                depth_percent: "0.02",
                rim_height: ("100", "1000"),
                rim_height_percent: "0.01",
                rim_skirt: ("1000", "10000"),
                rim_skirt_percent: "0.1",
                softness: ("0.01", "0.45"),
                tightness: ("3", "4"),
            },
            Preset::Basins => PresetValues {
                diameter: ("250000", "500000"),
                depth: ("5000", "12000"),
                depth_percent: "0.06",
                rim_height: ("5000", "25000"),
                rim_height_percent: "0.1",
                rim_skirt: ("100000", "300000"),
                rim_skirt_percent: "0.05",
                softness: ("0.12", "0.05"),
                tightness: ("0.5", "6"),
            },
            Preset::SciFiBasins => PresetValues {
                diameter: ("250000", "500000"),
                depth: ("5000", "12000"),
                depth_percent: "0.06",
                rim_height: ("10000", "150000"),
                rim_height_percent: "0.4",
                rim_skirt: ("100000", "300000"),
                rim_skirt_percent: "0.05",
                softness: ("0.12", "0.05"),
                tightness: ("0.5", "6"),
            },
        }
    }

    /// Write this preset's ranges and percents into `raw`. Other fields are left alone.
    pub fn apply_to(self, raw: &mut RawConfiguration) {
        let v = self.values();
        (raw.diameter_min, raw.diameter_max) = owned(v.diameter);
        (raw.depth.min, raw.depth.max) = owned(v.depth);
        raw.depth.percent = v.depth_percent.into();
        (raw.rim_height.min, raw.rim_height.max) = owned(v.rim_height);
        raw.rim_height.percent = v.rim_height_percent.into();
        (raw.rim_skirt.min, raw.rim_skirt.max) = owned(v.rim_skirt);
        raw.rim_skirt.percent = v.rim_skirt_percent.into();
        (raw.softness_min, raw.softness_max) = owned(v.softness);
        (raw.tightness_min, raw.tightness_max) = owned(v.tightness);
    }
}

fn owned((min, max): (&str, &str)) -> (String, String) {
    (min.to_owned(), max.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampling::{MetricSpec, SampleRange};

    #[test]
    fn apply_overwrites_ranges_only() {
        let mut raw = RawConfiguration {
            quantity: "25".into(),
            group_enabled: true,
            ..Default::default()
        };
        Preset::TinyCraters.apply_to(&mut raw);
        assert_eq!(raw.diameter_min, "30");
        assert_eq!(raw.diameter_max, "100");
        assert_eq!(raw.rim_skirt.percent, "10");
        assert_eq!(raw.quantity, "25");
        assert!(raw.group_enabled);
    }

    #[test]
    fn every_preset_coerces_cleanly() {
        for preset in Preset::ALL {
            let mut raw = RawConfiguration::default();
            preset.apply_to(&mut raw);
            let c = raw.to_configuration().unwrap();
            assert!(c.diameter.is_complete(), "{}", preset.label());
            assert!(matches!(c.depth, MetricSpec::Range(r) if r.is_complete()));
            assert!(c.softness.is_complete());
            assert!(c.tightness.is_complete());
        }
    }

    #[test]
    fn basins_keep_reversed_softness() {
        let mut raw = RawConfiguration::default();
        Preset::Basins.apply_to(&mut raw);
        let c = raw.to_configuration().unwrap();
        assert_eq!(c.softness, SampleRange::new(0.12, 0.05));
    }
}
