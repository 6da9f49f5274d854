use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pprof::criterion::{Output, PProfProfiler};

use pacman_minimax::search::Strategy;
use pacman_rs::{AgentOptions, EvaluationFunction, GameState};

fn bench_strategies_to_depth(c: &mut Criterion, depth: usize) {
    let layout = include_str!("../fixtures/small_maze.lay");

    let mut group = c.benchmark_group(format!("Search: Depth {depth}"));

    for strategy in Strategy::ALL {
        let options = AgentOptions {
            depth,
            evaluation: EvaluationFunction::Better,
        };

        group.bench_function(strategy.name(), |b| {
            b.iter(|| {
                let state: GameState = layout.parse().unwrap();
                let agent = options.search_agent(strategy);

                agent.search(black_box(&state)).unwrap()
            })
        });
    }

    group.finish();
}

pub fn criterion_benchmark(c: &mut Criterion) {
    bench_strategies_to_depth(c, 2);
    bench_strategies_to_depth(c, 3);
}

criterion_group! {
    name = benches;
    config = Criterion::default().with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)));
    targets = criterion_benchmark
}
criterion_main!(benches);
