use std::fs;

use anyhow::Context;
use crater_splat::prelude::*;
use crater_splat_examples::{init_tracing, render_report_to_png, RenderConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

const DEFAULT_SETTINGS: &str = r#"{
    "quantity": "25",
    "area_x": "8000",
    "area_z": "8000",
    "diameter_min": "300",
    "diameter_max": "1200",
    "depth": { "use_percent": true, "percent": "0.15" },
    "rim_skirt": { "use_percent": true, "percent": "0.5", "offset": true },
    "insertion": "inline"
}"#;

/// Usage: craters-from-json [settings.json] [xyz: x, y, z]
fn main() -> anyhow::Result<()> {
    init_tracing();
    let mut args = std::env::args().skip(1);

    let settings = match args.next() {
        Some(path) => fs::read_to_string(&path).with_context(|| format!("reading {path}"))?,
        None => DEFAULT_SETTINGS.to_owned(),
    };
    let mut raw: RawConfiguration =
        serde_json::from_str(&settings).context("parsing crater settings")?;

    if let Some(position) = args.next() {
        if !raw.apply_clipboard_position(&position) {
            tracing::warn!("Ignoring position '{position}'.");
        }
    }

    let config = raw.to_configuration()?;
    let mut scene = MemoryScene::new().with_compute_terrain("/Null 01");
    let mut rng = StdRng::seed_from_u64(1234);
    let report = apply(&config, &mut scene, &mut rng, None)?;

    fs::write(
        "craters-from-json.json",
        serde_json::to_string_pretty(&report.craters)?,
    )?;

    let rc = RenderConfig::for_area((800, 800), &config.area, 800.0);
    render_report_to_png(&report, &rc, "craters-from-json.png")?;

    Ok(())
}
