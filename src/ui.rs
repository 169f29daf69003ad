/*
 * UI Module
 *
 * Control panel built with nannou_egui. Lets the user tune the rule factors,
 * the speed multiplier and the population while the simulation runs, and shows
 * the debug readouts.
 */

use nannou_egui::{egui, Egui};

use crate::debug::DebugInfo;
use crate::params::SimulationParams;
use crate::state::SimulationState;

#[derive(Debug, Clone, Copy, Default)]
pub struct UiResponse {
    /// The population must be rebuilt (button pressed or a new quantity committed).
    pub reset: bool,
}

// A slider drag commits once on release; clicks and keyboard edits commit at once
fn population_reset(reset_clicked: bool, quantity_committed: bool, quantity: usize, population: usize) -> bool {
    reset_clicked || (quantity_committed && quantity != population)
}

pub fn update_ui(egui: &mut Egui, state: &mut SimulationState, debug_info: &DebugInfo) -> UiResponse {
    let mut reset_clicked = false;
    let mut quantity_committed = false;

    let ctx = egui.begin_frame();

    egui::Window::new("Simulation Controls")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.collapsing("Flocking Rules", |ui| {
                let rules = &mut state.params.rules;
                ui.add(egui::Slider::new(&mut rules.separation_factor, SimulationParams::get_separation_range()).text("Separation"));
                ui.add(egui::Slider::new(&mut rules.cohesion_factor, SimulationParams::get_factor_range()).text("Cohesion"));
                ui.add(egui::Slider::new(&mut rules.alignment_factor, SimulationParams::get_factor_range()).text("Alignment"));
            });

            ui.collapsing("Simulation", |ui| {
                ui.add(egui::Slider::new(&mut state.speed, SimulationParams::get_speed_range()).text("Speed (H to step down)"));
                let quantity = ui.add(egui::Slider::new(&mut state.params.quantity, SimulationParams::get_quantity_range()).text("Boids"));
                quantity_committed = quantity.drag_released() || (quantity.changed() && !quantity.dragged());
                if ui.button("Reset Boids").clicked() {
                    reset_clicked = true;
                }
                let pointer = if state.pointer.active { "on" } else { "off" };
                ui.label(format!("Pointer force: {pointer}"));
            });

            ui.collapsing("Performance", |ui| {
                ui.label(format!("FPS: {:.1}", debug_info.fps));
                ui.label(format!("Frame time: {:.2} ms", debug_info.frame_time.as_secs_f64() * 1000.0));
                ui.label(format!("Tick time: {:.2} ms", debug_info.tick_time.as_secs_f64() * 1000.0));
                ui.label(format!("Delta time: {:.3}", debug_info.delta_time));
                ui.label(format!("Boids drawn: {}", debug_info.triangles));
                ui.label(format!("Grid: {} x {}", debug_info.grid_columns, debug_info.grid_rows));
                ui.label(format!("Workers: {}", debug_info.workers));
            });
        });

    UiResponse {
        reset: population_reset(reset_clicked, quantity_committed, state.params.quantity, state.world.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dragging_quantity_waits_for_release() {
        // mid-drag frames change the value without committing it
        assert!(!population_reset(false, false, 800, 500));
        assert!(!population_reset(false, false, 900, 500));
        assert!(population_reset(false, true, 900, 500));
    }

    #[test]
    fn committed_quantity_equal_to_population_is_ignored() {
        assert!(!population_reset(false, true, 500, 500));
        assert!(population_reset(true, false, 500, 500));
    }
}
