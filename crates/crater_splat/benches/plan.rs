mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use crater_splat::prelude::{
    apply, BaseShapeSpec, ChainState, Configuration, CraterPlanBuilder, GroupSpec, InsertionMode,
    MemoryScene, RimShaderClass, RimShaderSpec, WarpSpec,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn full_config(count: usize) -> Configuration {
    Configuration::new(count)
        .with_base_shape(BaseShapeSpec::MountainOrValley { amplitude: 100.0 })
        .with_group(GroupSpec::Named("Craters".into()))
        .with_rim_shader(RimShaderSpec::Shader(RimShaderClass::FakeStones))
        .with_warp(WarpSpec::Enabled)
}

fn bench_build(c: &mut Criterion, bench_name: &str, config: Configuration) {
    let mut group = c.benchmark_group(bench_name);
    group.throughput(common::craters_throughput(config.crater_count));

    group.bench_function("build", |b| {
        b.iter_batched(
            || StdRng::seed_from_u64(12345),
            |mut rng| {
                let plan = CraterPlanBuilder::new(&config)
                    .build(ChainState::empty(), &mut rng)
                    .ok();
                black_box(plan.map(|p| p.operations().len()));
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

fn bench_apply(c: &mut Criterion, bench_name: &str, config: Configuration) {
    let mut group = c.benchmark_group(bench_name);
    group.throughput(common::craters_throughput(config.crater_count));

    group.bench_function("apply", |b| {
        b.iter_batched(
            || {
                (
                    MemoryScene::new().with_compute_terrain("/Null 01"),
                    StdRng::seed_from_u64(12345),
                )
            },
            |(mut scene, mut rng)| {
                let report = apply(&config, &mut scene, &mut rng, None).ok();
                black_box(report.map(|r| r.operations_executed));
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

pub fn plan_benches(c: &mut Criterion) {
    for count in [10, 100, 1000] {
        bench_build(
            c,
            &format!("plan/craters_only/{count}"),
            Configuration::new(count),
        );
        bench_build(c, &format!("plan/full/{count}"), full_config(count));
    }

    for mode in [
        InsertionMode::ReplaceMainInput,
        InsertionMode::MergeWithExisting,
    ] {
        bench_apply(
            c,
            &format!("apply/memory_scene/{mode:?}/100"),
            full_config(100).with_insertion(mode),
        );
    }
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = plan_benches
}
criterion_main!(benches);
