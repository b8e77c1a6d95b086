//! Criterion benchmarks for trace generation and playback.
//! Focus sizes: n in {10, 100, 1000, 10000} points.
//! Results: by default under target/criterion.

use std::time::Duration;

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use hullstep::hull::generate;
use hullstep::playback::{PlayerCfg, StepSequencePlayer};
use hullstep::rand::{draw_points, PointCloudCfg, ReplayToken};

fn cloud(n: usize, seed: u64) -> Vec<hullstep::Point> {
    let cfg = PointCloudCfg {
        count: n,
        ..PointCloudCfg::default()
    };
    draw_points(cfg, ReplayToken { seed, index: 0 })
}

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("hull");
    for &n in &[10usize, 100, 1000, 10000] {
        group.bench_with_input(BenchmarkId::new("generate", n), &n, |b, &n| {
            b.iter_batched(
                || cloud(n, 43),
                |pts| {
                    let _seq = generate(&pts);
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("replay_manual", n), &n, |b, &n| {
            let seq = generate(&cloud(n, 44));
            let tick = Duration::from_millis(1);
            b.iter_batched(
                || {
                    let mut p = StepSequencePlayer::manual(PlayerCfg { tick_interval: tick });
                    p.on_step(|step| {
                        criterion::black_box(step.upper().len());
                    });
                    p.load(seq.clone());
                    p
                },
                |mut p| {
                    p.play();
                    p.elapse(tick * (seq.len() as u32 + 1));
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_generate);
criterion_main!(benches);
