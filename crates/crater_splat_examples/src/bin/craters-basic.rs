use crater_splat::prelude::*;
use crater_splat_examples::{init_tracing, render_report_to_png, CraterStyle, RenderConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    init_tracing();
    let image_size = (1000, 1000);

    // 40 craters over a 10 km square, chained in front of the terrain computation.
    let area = CraterArea::centered(10_000.0);
    let config = Configuration::new(40)
        .with_area(area)
        .with_diameter(SampleRange::new(200.0, 1500.0))
        .with_depth(MetricSpec::percent(0.12, false))
        .with_rim_height(MetricSpec::percent(0.03, false))
        .with_rim_skirt(MetricSpec::percent(0.4, false))
        .with_insertion(InsertionMode::ReplaceMainInput);

    let mut scene = MemoryScene::new().with_compute_terrain("/Null 01");
    let mut rng = StdRng::seed_from_u64(2025);

    let mut splatter = CraterSplatter::try_new(config, &mut scene)?;
    let report = splatter.apply(&mut rng)?;

    tracing::info!(
        "Terrain now reads from '{}'.",
        scene
            .param("/Compute Terrain", "input_node")
            .unwrap_or_default()
    );

    let rc = RenderConfig::for_area(image_size, &area, 1000.0)
        .with_background([120, 116, 110])
        .with_style(CraterStyle {
            outline: Some([200, 60, 40]),
            ..CraterStyle::default()
        });
    render_report_to_png(&report, &rc, "craters-basic.png")?;

    Ok(())
}
