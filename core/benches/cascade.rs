use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::hint::black_box;
use sweeper_core::*;

const TIERS: [(&str, Coord, Coord, CellCount); 3] = [
    ("beginner", 9, 9, 10),
    ("intermediate", 16, 16, 40),
    ("expert", 16, 30, 99),
];

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for (name, height, width, mines) in TIERS {
        let config = GameConfig::new(height, width, mines).unwrap();
        let mut seed = 0;
        group.bench_function(name, |b| {
            b.iter(|| {
                seed += 1;
                let mut rng = SmallRng::seed_from_u64(seed);
                black_box(GameEngine::with_rng(config, &mut rng).unwrap())
            })
        });
    }
    group.finish();
}

fn bench_cascade(c: &mut Criterion) {
    let mut group = c.benchmark_group("cascade");
    for side in [32, 128, 255] {
        // a single corner mine leaves one region covering the whole board
        let layout = MineLayout::from_mine_coords((side, side), &[(0, 0)]).unwrap();
        group.bench_function(format!("open_{side}x{side}"), |b| {
            b.iter_batched(
                || GameEngine::from_layout(layout.clone()),
                |mut engine| {
                    black_box(engine.open((side - 1, side - 1)).unwrap());
                    engine
                },
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_generate, bench_cascade);
criterion_main!(benches);
