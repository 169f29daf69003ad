/*
 * Boid Flocking Simulation - Module Definitions
 *
 * The simulation core (vector math, boids, the spatial grid, neighbour rules,
 * state and the tick scheduler) is independent of the window. The nannou
 * modules (app, camera, input, renderer, ui, debug) implement the display and
 * input boundary on top of it.
 */

// Re-export key components for easier access
pub use boid::{Boid, BoidId};
pub use boundary::{Display, Input, InputEvent, TriangleFan};
pub use error::{SimError, SimResult};
pub use params::{RuleParams, SimulationParams};
pub use scheduler::{FrameStats, TickContext, TickScheduler};
pub use spatial_grid::{Cell, SpatialGrid};
pub use state::{PointerState, RunState, SimulationState, World};
pub use vector::Vector2;

// Simulation core
pub mod boid;
pub mod boundary;
pub mod error;
pub mod params;
pub mod rules;
pub mod scheduler;
pub mod spatial_grid;
pub mod state;
pub mod vector;

// Window boundary
pub mod app;
pub mod camera;
pub mod debug;
pub mod input;
pub mod renderer;
pub mod ui;
