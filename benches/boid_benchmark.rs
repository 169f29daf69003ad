/*
 * Boid Simulation Benchmark
 *
 * Measures the pieces of a tick separately: grid re-bucketing, the pairwise
 * rule evaluator, and whole ticks with the sequential and parallel schedulers.
 */

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use gridflock::rules::{accumulate, Accumulators};
use gridflock::{Boid, SimulationParams, SimulationState, TickScheduler, Vector2};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

fn state_with(quantity: usize, parallel: bool) -> SimulationState {
    let params = SimulationParams {
        quantity,
        parallel,
        ..SimulationParams::default()
    };
    let mut rng = StdRng::seed_from_u64(0xB01D);
    SimulationState::new(params, &mut rng).expect("valid benchmark parameters")
}

// Move every boid one cell to the right and back
fn bench_spatial_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("spatial_grid");

    for num_boids in [100, 500, 1000, 2000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(num_boids), num_boids, |b, &n| {
            let state = state_with(n, false);
            let ids: Vec<_> = state.world.boids.keys().collect();

            b.iter_batched(
                || state.world.clone(),
                |mut world| {
                    for &id in &ids {
                        let cell = world.grid.cell_of(world.boids[id].position);
                        let next = ((cell.0 + 1) % world.grid.columns(), cell.1);
                        world.grid.move_agent(id, cell, next).expect("boid in bucket");
                        world.grid.move_agent(id, next, cell).expect("boid in bucket");
                    }
                    black_box(world)
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_force_calculations(c: &mut Criterion) {
    let rules = SimulationParams::default().rules;
    let mut boid = Boid::new(Vector2::new(400.0, 350.0));
    boid.velocity = Vector2::new(1.0, 0.0);
    let neighbours: Vec<Boid> = (0..64)
        .map(|i| {
            let angle = i as f32 * 0.3;
            let mut other = Boid::new(Vector2::new(400.0 + angle.cos() * i as f32, 350.0 + angle.sin() * i as f32));
            other.velocity = Vector2::new(angle.sin(), angle.cos());
            other.color = Vector2::new(i as f32 * 3.0, 255.0 - i as f32 * 3.0);
            other
        })
        .collect();

    c.bench_function("force_calculations/64_neighbours", |b| {
        b.iter(|| {
            let mut working = boid;
            let mut acc = Accumulators::default();
            for other in &neighbours {
                accumulate(&mut working, other, &mut acc, &rules).expect("finite distances");
            }
            black_box((working, acc))
        });
    });
}

fn bench_update_loop(c: &mut Criterion) {
    let mut group = c.benchmark_group("update_loop");

    for parallel in [false, true] {
        for num_boids in [500, 2000] {
            let label = if parallel { "parallel" } else { "sequential" };
            group.bench_with_input(BenchmarkId::new(label, num_boids), &num_boids, |b, &n| {
                let mut state = state_with(n, parallel);
                let scheduler = TickScheduler::new(&state.params).expect("worker pool");
                b.iter(|| black_box(scheduler.tick(&mut state, 0.8).expect("tick")));
            });
        }
    }

    group.finish();
}

// Configure the benchmarks
criterion_group! {
    name = benches;
    config = Criterion::default()
        .sample_size(10)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1));
    targets = bench_spatial_grid, bench_force_calculations, bench_update_loop
}

criterion_main!(benches);
