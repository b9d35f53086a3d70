//! Benchmarks comparing the strategy family on fixed random trees.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use twoplayer_search::stub::StubGame;
use twoplayer_search::{search, GameWeights, SearchOptions, StrategyKind};

const TREE_SEED: u64 = 0xc0ffee;

fn bench_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("strategies");
    let weights = GameWeights::default();

    let mut game = StubGame::random(TREE_SEED, 6, 4);
    let root = game.root().clone();
    for kind in StrategyKind::ALL {
        group.bench_function(kind.as_str(), |b| {
            let options = SearchOptions::new(kind).with_look_ahead(5);
            b.iter(|| search(&mut game, black_box(&root), &options, &weights, None))
        });
    }

    group.finish();
}

fn bench_pruning(c: &mut Criterion) {
    let mut group = c.benchmark_group("pruning");
    let weights = GameWeights::default();

    let mut game = StubGame::random(TREE_SEED, 6, 4);
    let root = game.root().clone();
    for look_ahead in 2..=6u32 {
        group.bench_with_input(
            BenchmarkId::new("alpha_beta_off", look_ahead),
            &look_ahead,
            |b, &look_ahead| {
                let options = SearchOptions::new(StrategyKind::NegaMax)
                    .with_look_ahead(look_ahead)
                    .with_alpha_beta(false);
                b.iter(|| search(&mut game, black_box(&root), &options, &weights, None))
            },
        );
        group.bench_with_input(
            BenchmarkId::new("alpha_beta_on", look_ahead),
            &look_ahead,
            |b, &look_ahead| {
                let options = SearchOptions::new(StrategyKind::NegaMax)
                    .with_look_ahead(look_ahead)
                    .with_alpha_beta(true);
                b.iter(|| search(&mut game, black_box(&root), &options, &weights, None))
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_strategies, bench_pruning);
criterion_main!(benches);
