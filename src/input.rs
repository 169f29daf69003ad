/*
 * Input Module
 *
 * nannou event handlers for the simulation window. Handlers only translate
 * window events into `InputEvent`s and queue them; the tick scheduler drains
 * the queue once per frame after the tick has run.
 *
 * Bindings:
 * - H: decrease simulation speed
 * - Q / Escape / closing the window: quit
 * - any mouse button held: pointer force toward the cursor
 */

use nannou::prelude::*;

use crate::app::Model;
use crate::boundary::{Input, InputEvent};
use crate::vector::Vector2;

#[derive(Debug, Default)]
pub struct EventQueue {
    events: Vec<InputEvent>,
    pointer: Vector2,
}

impl EventQueue {
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    pub fn set_pointer(&mut self, pointer: Vector2) {
        self.pointer = pointer;
    }
}

impl Input for EventQueue {
    fn poll(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    fn pointer(&self) -> Vector2 {
        self.pointer
    }
}

pub fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    match key {
        Key::H => model.input.push(InputEvent::DecreaseSpeed),
        Key::Q | Key::Escape => model.input.push(InputEvent::Quit),
        _ => {}
    }
}

// Mouse moved event handler
pub fn mouse_moved(_app: &App, model: &mut Model, pos: Point2) {
    let world_pos = model.camera.screen_to_world(pos);
    model.input.set_pointer(world_pos);
}

pub fn mouse_pressed(_app: &App, model: &mut Model, _button: MouseButton) {
    // Clicks on the control panel belong to egui
    if !model.egui.ctx().is_pointer_over_area() {
        model.input.push(InputEvent::PointerPressed);
    }
}

pub fn mouse_released(_app: &App, model: &mut Model, _button: MouseButton) {
    model.input.push(InputEvent::PointerReleased);
}

pub fn closed(_app: &App, model: &mut Model) {
    model.input.push(InputEvent::Quit);
}

// Handle raw window events for egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poll_drains_in_order() {
        let mut queue = EventQueue::default();
        queue.push(InputEvent::PointerPressed);
        queue.push(InputEvent::DecreaseSpeed);
        queue.set_pointer(Vector2::new(3.0, 4.0));

        assert_eq!(queue.poll(), vec![InputEvent::PointerPressed, InputEvent::DecreaseSpeed]);
        assert!(queue.poll().is_empty());
        assert_eq!(queue.pointer(), Vector2::new(3.0, 4.0));
    }
}
