#[macro_use]
extern crate criterion;

use criterion::{black_box, BenchmarkId, Criterion};
use rand::{rngs::StdRng, SeedableRng};
use std::time::Duration;
use uct_agent::{
    hex::{HexBoard, HexPlayer},
    policy::simulation::{RandomPlayout, SimulationPolicy},
    AgentConfig, Move, UctAgent,
};

fn bench_playouts(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_playout");

    for size in [5, 7, 9, 11].iter() {
        let board = HexBoard::new(*size);
        let centre = Move::new(size / 2, size / 2);
        let policy = RandomPlayout::new();
        let mut rng = StdRng::seed_from_u64(0);

        group.bench_with_input(BenchmarkId::new("board_size", size), size, |b, &_| {
            b.iter(|| {
                black_box(policy.simulate(HexPlayer::Blue, centre, board.clone(), &mut rng))
            })
        });
    }

    group.finish();
}

fn bench_decisions(c: &mut Criterion) {
    let mut group = c.benchmark_group("choose_move");
    group.measurement_time(Duration::from_secs(10));

    // Iteration-capped so each sample does the same amount of work
    let iterations = [100, 1000];
    for &iter_count in &iterations {
        let board = HexBoard::new(7);

        let sequential = AgentConfig::default()
            .with_max_decision_time(Duration::from_secs(60))
            .with_max_iterations(iter_count)
            .with_seed(1);

        group.bench_with_input(
            BenchmarkId::new("sequential/iterations", iter_count),
            &iter_count,
            |b, &_| {
                let mut agent = UctAgent::new(sequential.clone()).unwrap();
                b.iter(|| black_box(agent.choose_move(&board, HexPlayer::Blue)))
            },
        );

        // Same number of playouts, spread over four workers per iteration
        let parallel = sequential
            .clone()
            .with_parallelization(true)
            .with_num_workers(4)
            .with_max_iterations((iter_count / 4).max(1));

        group.bench_with_input(
            BenchmarkId::new("parallel/playouts", iter_count),
            &iter_count,
            |b, &_| {
                let mut agent = UctAgent::new(parallel.clone()).unwrap();
                b.iter(|| black_box(agent.choose_move(&board, HexPlayer::Blue)))
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_playouts, bench_decisions);
criterion_main!(benches);
