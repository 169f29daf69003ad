/*
 * Boundary Module
 *
 * Contracts between the simulation core and whatever presents it. The core
 * hands a `Display` one triangle per boid per tick and asks an `Input` for the
 * events that arrived since the previous tick. The nannou window implements
 * both (see `app`); tests use scripted implementations.
 */

use crate::vector::Vector2;

/// One boid's render geometry in world coordinates (origin top-left, y down).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleFan {
    pub vertices: [Vector2; 3],
    pub rgba: [u8; 4],
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Quit,
    DecreaseSpeed,
    PointerPressed,
    PointerReleased,
}

pub trait Display {
    fn present(&mut self, triangles: &[TriangleFan]);
}

pub trait Input {
    /// Drain the events received since the last poll, oldest first.
    fn poll(&mut self) -> Vec<InputEvent>;

    /// Current pointer position in world coordinates.
    fn pointer(&self) -> Vector2;
}
