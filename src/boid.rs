/*
 * Boid Module
 *
 * This module defines the Boid struct and its per-tick integration.
 * A boid carries three velocity-like terms:
 *   velocity          - steered by separation and cohesion
 *   still_velocity    - steered by alignment
 *   external_velocity - pull toward the pointer while the pointer force is active
 * The `color` vector is a two-channel (red, blue) tint, not a spatial quantity.
 */

use rand::Rng;
use slotmap::new_key_type;

use crate::boundary::TriangleFan;
use crate::error::SimResult;
use crate::params::SimulationParams;
use crate::rules::Accumulators;
use crate::vector::Vector2;

new_key_type! {
    /// Stable handle of a boid in the world arena.
    pub struct BoidId;
}

// Steering blend: velocity += (separation + cohesion) / 3 * dt * 10
const STEERING_DIVISOR: f32 = 3.0;
const STEERING_GAIN: f32 = 10.0;

// Negative strength pulls toward the pointer
pub const POINTER_STRENGTH: f32 = -100.0;
/// Distances to the pointer target are floored at this value.
pub const MIN_POINTER_DISTANCE: f32 = 1.0;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Boid {
    pub position: Vector2,
    pub velocity: Vector2,
    pub still_velocity: Vector2,
    pub external_velocity: Vector2,
    pub color: Vector2,
}

impl Boid {
    pub fn new(position: Vector2) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    // Spawn near the world centre with a random heading and tint
    pub fn random<R: Rng + ?Sized>(rng: &mut R, params: &SimulationParams) -> Self {
        let world = Vector2::new(params.world_width, params.world_height);
        let spread = world.magnitude();
        let near = spread / 4.0;

        let offset = Vector2::new(rng.gen_range(-near..near), rng.gen_range(-near..near));
        let centre = world * 0.5;
        let position = centre + offset;

        let heading = Vector2::new(rng.gen_range(-spread..spread), rng.gen_range(-spread..spread));

        Self {
            position: Vector2::new(
                position.x.clamp(0.0, world.x - 1.0),
                position.y.clamp(0.0, world.y - 1.0),
            ),
            velocity: heading.unit(),
            still_velocity: Vector2::ZERO,
            external_velocity: Vector2::ZERO,
            color: Vector2::new(rng.gen_range(0.0..255.0), rng.gen_range(0.0..255.0)),
        }
    }

    // Apply accumulated neighbour forces, the optional pointer pull, and move
    pub fn integrate(
        &mut self,
        forces: &Accumulators,
        delta_time: f32,
        pointer: Option<Vector2>,
        bounds: Vector2,
    ) -> SimResult<()> {
        let steering = (forces.separation + forces.cohesion).divide(STEERING_DIVISOR)?;
        self.velocity = self.velocity.unit() + steering * delta_time * STEERING_GAIN;
        self.still_velocity = self.still_velocity.unit() + forces.alignment * delta_time;

        // external_velocity keeps its last value while the pointer is released
        if let Some(target) = pointer {
            self.external_velocity = pointer_velocity(self.position, target)?;
        }

        self.position += (self.external_velocity + (self.still_velocity + self.velocity).unit()) * delta_time;
        self.wrap_edges(bounds);
        Ok(())
    }

    // Toroidal wrap, keeps the position inside [0, bound) on both axes
    pub fn wrap_edges(&mut self, bounds: Vector2) {
        self.position.x = wrap_axis(self.position.x, bounds.x);
        self.position.y = wrap_axis(self.position.y, bounds.y);
    }

    pub fn triangle(&self, size: f32) -> TriangleFan {
        let Vector2 { x, y } = self.position;
        TriangleFan {
            vertices: [
                Vector2::new(x, y + size),
                Vector2::new(x - size, y - size),
                Vector2::new(x + size, y - size),
            ],
            // float -> u8 casts saturate
            rgba: [self.color.x as u8, 0, self.color.y as u8, 255],
        }
    }
}

pub fn pointer_velocity(position: Vector2, target: Vector2) -> SimResult<Vector2> {
    let offset = position - target;
    let distance = offset.magnitude().max(MIN_POINTER_DISTANCE);
    (offset.unit() * POINTER_STRENGTH).divide(distance * 2.0)
}

#[inline]
fn wrap_axis(value: f32, bound: f32) -> f32 {
    if value >= bound {
        1.0
    } else if value < 0.0 {
        bound - 1.0
    } else {
        value
    }
}
