use crater_splat::prelude::*;
use crater_splat_examples::{init_tracing, render_report_to_png, RenderConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    init_tracing();

    // An existing group named "Craters" forces the host to pick another name.
    let mut scene = MemoryScene::new().with_compute_terrain("/Null 01");
    scene.add_named_node("group", "Craters");

    let area = CraterArea::centered(6000.0);
    let config = Configuration::new(12)
        .with_area(area)
        .with_group(GroupSpec::Named("Craters".into()))
        .with_rim_shader(RimShaderSpec::Shader(RimShaderClass::FakeStones))
        .with_base_shape(BaseShapeSpec::MountainOrValley { amplitude: -80.0 })
        .with_warp(WarpSpec::Enabled)
        .with_insertion(InsertionMode::MergeWithExisting);

    let mut events = VecSink::only(&[
        ApplyEventKind::TargetLocated,
        ApplyEventKind::NodeCreated,
        ApplyEventKind::Spliced,
        ApplyEventKind::Warning,
    ]);
    let mut rng = StdRng::seed_from_u64(42);
    let report = apply_with_events(&config, &mut scene, &mut rng, &mut events)?;

    for event in events.as_slice() {
        match event {
            ApplyEvent::TargetLocated { target } => {
                tracing::info!("Target {} (was fed by {}).", target.path, target.previous_input)
            }
            ApplyEvent::NodeCreated { role, handle, .. } => {
                tracing::info!("{:?} -> {}", role, handle.path())
            }
            ApplyEvent::Spliced { input, .. } => tracing::info!("Terrain input: {input}"),
            ApplyEvent::Warning { message, .. } => tracing::warn!("{message}"),
            _ => {}
        }
    }

    for node in scene.nodes_of_class("crater_shader").take(2) {
        tracing::info!(
            "{}: gui_group='{}' rim_shader='{}'",
            node.path(),
            node.param("gui_group").unwrap_or_default(),
            node.param("rim_shader").unwrap_or_default()
        );
    }

    let rc = RenderConfig::for_area((800, 800), &area, 1500.0);
    render_report_to_png(&report, &rc, "craters-merge-with-existing.png")?;

    Ok(())
}
