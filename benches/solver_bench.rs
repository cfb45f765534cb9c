// ===== edgeplace/benches/solver_bench.rs =====
use criterion::{criterion_group, criterion_main, Criterion};
use edgeplace::optimizer::{assign, Engine, NoProgress, SolveOptions};
use edgeplace::scenario::generator;
use edgeplace::solution::PlacementSolution;
use std::hint::black_box;
use std::sync::Arc;

fn setup_solution() -> PlacementSolution {
    let scenario =
        Arc::new(generator::random_scenario(200, 30, 3, 42).expect("Failed to generate instance"));
    let mut solution = PlacementSolution::new(Arc::clone(&scenario));
    for site_idx in 0..scenario.sites.len() {
        solution.place_at(site_idx, site_idx % scenario.facility_types.len());
    }
    assign::greedy_reassign(&mut solution);
    solution
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut solution = setup_solution();
    c.bench_function("evaluate (200 devices, 30 sites)", |b| {
        b.iter(|| solution.evaluate(black_box(0.5)))
    });

    let mut reassigned = setup_solution();
    c.bench_function("greedy_reassign (200 devices, 30 sites)", |b| {
        b.iter(|| assign::greedy_reassign(black_box(&mut reassigned)))
    });

    let scenario =
        Arc::new(generator::random_scenario(50, 10, 2, 42).expect("Failed to generate instance"));
    let options = SolveOptions {
        population_size: 20,
        generations: 10,
        ..Default::default()
    };
    let engine = Engine::new(Arc::clone(&scenario), options).expect("Failed to build engine");
    c.bench_function("engine 10 generations (50 devices, 10 sites)", |b| {
        b.iter(|| engine.run(black_box(Some(7)), NoProgress))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
