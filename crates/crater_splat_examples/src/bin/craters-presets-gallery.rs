use crater_splat::prelude::*;
use crater_splat_examples::{init_tracing, render_report_to_png, RenderConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    init_tracing();
    let image_size = (600, 600);

    for (i, preset) in Preset::ALL.into_iter().enumerate() {
        let mut raw = RawConfiguration {
            quantity: "30".into(),
            ..RawConfiguration::default()
        };
        preset.apply_to(&mut raw);

        // Scale the area to the preset so the gallery images are comparable.
        let widest: f64 = raw.diameter_max.parse()?;
        let extent = widest * 8.0;
        raw.area_x = extent.to_string();
        raw.area_z = extent.to_string();

        let config = raw.to_configuration()?.with_insertion(InsertionMode::Skip);
        let mut scene = MemoryScene::new();
        let mut rng = StdRng::seed_from_u64(7 + i as u64);
        let report = apply(&config, &mut scene, &mut rng, None)?;

        let rc = RenderConfig::for_area(image_size, &config.area, widest * 0.5)
            .with_background([110, 108, 104]);
        let slug = format!("{preset:?}").to_lowercase();
        tracing::info!("{}: {} nodes.", preset.label(), scene.len());
        render_report_to_png(&report, &rc, format!("craters-preset-{slug}.png"))?;
    }

    Ok(())
}
