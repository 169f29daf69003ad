/*
 * Simulation State Module
 *
 * Everything the tick scheduler reads and writes: the boid arena with its
 * spatial grid, the speed multiplier, pointer force settings and the
 * Running/Stopped flag. Input events from the boundary are applied here.
 */

use rand::Rng;
use slotmap::SlotMap;
use tracing::info;

use crate::boid::{Boid, BoidId};
use crate::boundary::InputEvent;
use crate::error::SimResult;
use crate::params::SimulationParams;
use crate::spatial_grid::SpatialGrid;
use crate::vector::Vector2;

const SPEED_STEP: f32 = 0.1;
// Speeds at or below this count as zero and wrap back to full speed
const SPEED_EPSILON: f32 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Stopped,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    pub active: bool,
    pub target: Vector2,
}

impl PointerState {
    pub fn force_target(&self) -> Option<Vector2> {
        self.active.then_some(self.target)
    }
}

// Boid arena plus the grid that indexes it
#[derive(Debug, Clone)]
pub struct World {
    pub boids: SlotMap<BoidId, Boid>,
    pub grid: SpatialGrid,
    pub bounds: Vector2,
}

impl World {
    pub fn new(params: &SimulationParams) -> Self {
        let bounds = Vector2::new(params.world_width, params.world_height);
        let cell_size = Vector2::new(params.cell_width, params.cell_height);
        Self {
            boids: SlotMap::with_capacity_and_key(params.quantity),
            grid: SpatialGrid::new(bounds, cell_size),
            bounds,
        }
    }

    pub fn populate<R: Rng + ?Sized>(params: &SimulationParams, rng: &mut R) -> Self {
        let mut world = Self::new(params);
        for _ in 0..params.quantity {
            world.spawn(Boid::random(rng, params));
        }
        world
    }

    pub fn spawn(&mut self, mut boid: Boid) -> BoidId {
        boid.wrap_edges(self.bounds);
        let id = self.boids.insert(boid);
        self.grid.insert(id, boid.position);
        id
    }

    pub fn len(&self) -> usize {
        self.boids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boids.is_empty()
    }

    pub fn is_consistent(&self) -> bool {
        self.grid.is_consistent_with(&self.boids)
    }
}

pub struct SimulationState {
    pub params: SimulationParams,
    pub world: World,
    pub speed: f32,
    pub pointer: PointerState,
    pub run_state: RunState,
}

impl SimulationState {
    pub fn new<R: Rng + ?Sized>(params: SimulationParams, rng: &mut R) -> SimResult<Self> {
        params.validate()?;
        let world = World::populate(&params, rng);
        Ok(Self::with_world(params, world))
    }

    pub fn with_world(params: SimulationParams, world: World) -> Self {
        Self {
            params,
            world,
            speed: 1.0,
            pointer: PointerState::default(),
            run_state: RunState::Running,
        }
    }

    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    // Wall-clock seconds scaled by the base factor and the speed multiplier
    pub fn delta_time(&self, elapsed_secs: f32) -> f32 {
        elapsed_secs * self.params.delta_time_scale * self.speed
    }

    // Rebuild the population from the current parameters
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) -> SimResult<()> {
        self.params.validate()?;
        self.world = World::populate(&self.params, rng);
        info!(boids = self.world.len(), "population reset");
        Ok(())
    }

    pub fn set_pointer_target(&mut self, target: Vector2) {
        self.pointer.target = target;
    }

    pub fn apply_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::Quit => {
                if self.run_state == RunState::Running {
                    info!("quit requested, stopping simulation");
                }
                self.run_state = RunState::Stopped;
            }
            InputEvent::DecreaseSpeed => {
                self.speed = if self.speed > SPEED_EPSILON {
                    (self.speed - SPEED_STEP).max(0.0)
                } else {
                    1.0
                };
                info!(speed = self.speed, "simulation speed changed");
            }
            InputEvent::PointerPressed => {
                self.pointer.active = true;
                info!(x = self.pointer.target.x, y = self.pointer.target.y, "pointer force on");
            }
            InputEvent::PointerReleased => {
                self.pointer.active = false;
                info!("pointer force off");
            }
        }
    }
}
