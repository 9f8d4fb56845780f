use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{rngs::StdRng, SeedableRng};
use ttt_search::board::Board;
use ttt_search::player::{
    alpha_beta::{alphabeta, ALPHA_INIT, BETA_INIT},
    mcts::run_mcts,
    min_max::minimax,
    SearchStats,
};

fn criterion_benchmark(c: &mut Criterion) {
    let board = Board::new();
    let mut group = c.benchmark_group("ttt-empty-board");
    group.measurement_time(Duration::from_secs(15));
    group.sampling_mode(criterion::SamplingMode::Flat);
    group.sample_size(10);
    group.bench_function("minimax", |b| {
        b.iter(|| {
            let mut stats = SearchStats::default();
            black_box(minimax(black_box(&board), 0, &mut stats))
        })
    });
    group.sample_size(100);
    group.bench_function("alphabeta", |b| {
        b.iter(|| {
            let mut stats = SearchStats::default();
            black_box(alphabeta(
                black_box(&board),
                0,
                ALPHA_INIT,
                BETA_INIT,
                &mut stats,
            ))
        })
    });
    let mut rng = StdRng::seed_from_u64(123);
    group.bench_function("mcts-2000", |b| {
        b.iter(|| black_box(run_mcts(black_box(&board), 2000, &mut rng)))
    });
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
