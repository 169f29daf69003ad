/*
 * Tick Scheduler Module
 *
 * Drives the simulation one tick at a time:
 *   1. take delta time from the frame clock
 *   2. run one unit of work per grid column on the worker pool
 *   3. wait for every column (barrier)
 *   4. present the triangles, then poll and apply input
 *
 * Workers read neighbours from a snapshot of the world taken at the start of
 * the tick, so results do not depend on worker interleaving. Writes to the
 * live world (the boid itself and its bucket move) happen under one mutex per
 * boid update. Render triangles go to a per-column buffer and are merged in
 * column order after the barrier.
 */

use std::sync::Mutex;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{info, trace, warn};

use crate::boid::{Boid, BoidId};
use crate::boundary::{Display, Input, TriangleFan};
use crate::error::{SimError, SimResult};
use crate::params::{RuleParams, SimulationParams};
use crate::rules::{self, Accumulators};
use crate::spatial_grid::Cell;
use crate::state::{SimulationState, World};
use crate::vector::Vector2;

// Wall-clock time between frames
pub struct FrameClock {
    last: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        Self { last: Instant::now() }
    }

    // Seconds since the previous lap
    pub fn lap(&mut self) -> f32 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last);
        self.last = now;
        elapsed.as_secs_f32()
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FrameStats {
    pub delta_time: f32,
    pub tick_time: Duration,
    pub triangles: usize,
}

/// Read-only inputs shared by every worker during one tick.
pub struct TickContext<'a> {
    snapshot: &'a World,
    rules: RuleParams,
    cell_search_radius: f32,
    boid_size: f32,
    delta_time: f32,
    pointer: Option<Vector2>,
}

impl<'a> TickContext<'a> {
    pub fn new(
        snapshot: &'a World,
        params: &SimulationParams,
        delta_time: f32,
        pointer: Option<Vector2>,
    ) -> Self {
        Self {
            snapshot,
            rules: params.rules,
            cell_search_radius: params.cell_search_radius,
            boid_size: params.boid_size,
            delta_time,
            pointer,
        }
    }

    /// Compute the next state of one boid from the snapshot.
    pub fn step_boid(&self, id: BoidId) -> SimResult<Boid> {
        let boid = self.snapshot.boids.get(id).ok_or(SimError::MissingBoid(id))?;
        let cell = self.snapshot.grid.cell_of(boid.position);
        self.step_in_cell(id, cell)
    }

    fn step_in_cell(&self, id: BoidId, cell: Cell) -> SimResult<Boid> {
        let snapshot = self.snapshot;
        let mut boid = *snapshot.boids.get(id).ok_or(SimError::MissingBoid(id))?;
        let mut forces = Accumulators::default();

        for near in snapshot.grid.neighbors_within_cell_radius(cell, self.cell_search_radius) {
            for &other_id in snapshot.grid.bucket(near) {
                if other_id == id {
                    continue;
                }
                let other = snapshot.boids.get(other_id).ok_or(SimError::MissingBoid(other_id))?;
                rules::accumulate(&mut boid, other, &mut forces, &self.rules)?;
            }
        }

        boid.integrate(&forces, self.delta_time, self.pointer, snapshot.bounds)?;
        Ok(boid)
    }

    // One unit of work: every boid that started the tick in `column`
    fn update_column(&self, column: usize, live: &Mutex<&mut World>) -> SimResult<Vec<TriangleFan>> {
        let grid = &self.snapshot.grid;
        let mut triangles = Vec::new();

        for row in 0..grid.rows() {
            let cell = (column, row);
            for &id in grid.bucket(cell) {
                let updated = self.step_in_cell(id, cell)?;

                {
                    let mut guard = live.lock().map_err(|_| SimError::LockPoisoned)?;
                    let world = &mut **guard;
                    let slot = world.boids.get_mut(id).ok_or(SimError::MissingBoid(id))?;
                    let new_cell = world.grid.cell_of(updated.position);
                    world.grid.move_agent(id, cell, new_cell)?;
                    *slot = updated;
                }

                triangles.push(updated.triangle(self.boid_size));
            }
        }

        Ok(triangles)
    }
}

pub struct TickScheduler {
    // None runs the columns on the calling thread
    pool: Option<ThreadPool>,
    clock: FrameClock,
}

impl TickScheduler {
    pub fn new(params: &SimulationParams) -> SimResult<Self> {
        let pool = if params.parallel {
            let mut builder = ThreadPoolBuilder::new().thread_name(|i| format!("flock-worker-{i}"));
            if params.worker_threads > 0 {
                builder = builder.num_threads(params.worker_threads);
            }
            Some(builder.build()?)
        } else {
            None
        };

        let scheduler = Self {
            pool,
            clock: FrameClock::new(),
        };
        info!(workers = scheduler.workers(), parallel = params.parallel, "tick scheduler ready");
        Ok(scheduler)
    }

    pub fn is_parallel(&self) -> bool {
        self.pool.is_some()
    }

    pub fn workers(&self) -> usize {
        self.pool.as_ref().map_or(1, ThreadPool::current_num_threads)
    }

    /// Advance every boid once and return their triangles in column order.
    pub fn tick(&self, state: &mut SimulationState, delta_time: f32) -> SimResult<Vec<TriangleFan>> {
        let snapshot = state.world.clone();
        let ctx = TickContext::new(&snapshot, &state.params, delta_time, state.pointer.force_target());
        let columns = snapshot.grid.columns();

        let per_column = {
            let live = Mutex::new(&mut state.world);
            match &self.pool {
                Some(pool) => pool.install(|| {
                    (0..columns)
                        .into_par_iter()
                        .map(|column| ctx.update_column(column, &live))
                        .collect::<SimResult<Vec<_>>>()
                })?,
                None => (0..columns)
                    .map(|column| ctx.update_column(column, &live))
                    .collect::<SimResult<Vec<_>>>()?,
            }
        };

        debug_assert!(state.world.is_consistent(), "grid membership diverged from the arena");
        Ok(per_column.into_iter().flatten().collect())
    }

    /// Run one full frame against the boundary, timed by the frame clock.
    pub fn frame<D, I>(&mut self, state: &mut SimulationState, display: &mut D, input: &mut I) -> Option<FrameStats>
    where
        D: Display + ?Sized,
        I: Input + ?Sized,
    {
        let elapsed = self.clock.lap();
        self.advance(state, display, input, elapsed)
    }

    /// One frame with an explicit wall-clock interval. Returns `None` once stopped.
    pub fn advance<D, I>(
        &mut self,
        state: &mut SimulationState,
        display: &mut D,
        input: &mut I,
        elapsed_secs: f32,
    ) -> Option<FrameStats>
    where
        D: Display + ?Sized,
        I: Input + ?Sized,
    {
        if !state.is_running() {
            return None;
        }

        let delta_time = state.delta_time(elapsed_secs);
        let started = Instant::now();
        let mut stats = FrameStats {
            delta_time,
            ..FrameStats::default()
        };

        match self.tick(state, delta_time) {
            Ok(triangles) => {
                stats.tick_time = started.elapsed();
                stats.triangles = triangles.len();
                trace!(delta_time, tick_us = stats.tick_time.as_micros() as u64, triangles = stats.triangles, "tick");
                display.present(&triangles);
            }
            Err(err) => warn!(%err, "tick failed, skipping"),
        }

        state.set_pointer_target(input.pointer());
        for event in input.poll() {
            state.apply_input(event);
        }

        Some(stats)
    }

    /// Drive frames until the input boundary asks to quit. Returns the frame count.
    pub fn run<D, I>(&mut self, state: &mut SimulationState, display: &mut D, input: &mut I) -> usize
    where
        D: Display + ?Sized,
        I: Input + ?Sized,
    {
        let mut frames = 0;
        while self.frame(state, display, input).is_some() {
            frames += 1;
        }
        frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(parallel: bool) -> SimulationParams {
        SimulationParams {
            quantity: 0,
            parallel,
            worker_threads: 2,
            ..SimulationParams::default()
        }
    }

    #[test]
    fn sequential_scheduler_has_one_worker() {
        let scheduler = TickScheduler::new(&params(false)).unwrap();
        assert!(!scheduler.is_parallel());
        assert_eq!(scheduler.workers(), 1);

        let scheduler = TickScheduler::new(&params(true)).unwrap();
        assert!(scheduler.is_parallel());
        assert_eq!(scheduler.workers(), 2);
    }

    #[test]
    fn boundary_crossing_moves_boid_to_first_column() {
        let params = params(true);
        let mut world = World::new(&params);
        let mut boid = Boid::new(Vector2::new(799.5, 350.0));
        boid.velocity = Vector2::new(1.0, 0.0);
        let id = world.spawn(boid);
        assert_eq!(world.grid.bucket((7, 3)), &[id]);

        let mut state = SimulationState::with_world(params.clone(), world);
        let scheduler = TickScheduler::new(&params).unwrap();
        let triangles = scheduler.tick(&mut state, 1.0).unwrap();

        assert_eq!(triangles.len(), 1);
        assert_eq!(state.world.boids[id].position.x, 1.0);
        assert!(state.world.grid.bucket((7, 3)).is_empty());
        assert_eq!(state.world.grid.bucket((0, 3)), &[id]);
    }

    #[test]
    fn step_boid_matches_tick_result() {
        let params = params(false);
        let mut world = World::new(&params);
        let a = world.spawn(Boid::new(Vector2::new(100.0, 100.0)));
        let _b = world.spawn(Boid::new(Vector2::new(105.0, 100.0)));

        let snapshot = world.clone();
        let ctx = TickContext::new(&snapshot, &params, 0.5, None);
        let expected = ctx.step_boid(a).unwrap();

        let mut state = SimulationState::with_world(params.clone(), world);
        TickScheduler::new(&params).unwrap().tick(&mut state, 0.5).unwrap();
        assert_eq!(state.world.boids[a], expected);
    }
}
