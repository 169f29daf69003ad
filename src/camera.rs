/*
 * Camera Module
 *
 * Maps between simulation coordinates (origin at the top-left corner, y
 * pointing down, one unit per pixel) and nannou window coordinates (origin at
 * the window centre, y pointing up). The window is created at world size and
 * is not resizable, so the mapping is a fixed flip and shift.
 */

use nannou::prelude::*;

use crate::vector::Vector2;

pub struct Camera {
    pub world_size: Vector2,
}

impl Camera {
    pub fn new(world_size: Vector2) -> Self {
        Self { world_size }
    }

    // Convert a point from world space to screen space
    pub fn world_to_screen(&self, point: Vector2) -> Vec2 {
        vec2(
            point.x - self.world_size.x / 2.0,
            self.world_size.y / 2.0 - point.y,
        )
    }

    // Convert a point from screen space to world space
    pub fn screen_to_world(&self, point: Vec2) -> Vector2 {
        Vector2::new(
            point.x + self.world_size.x / 2.0,
            self.world_size.y / 2.0 - point.y,
        )
    }
}
