/*
 * Application Module
 *
 * This module defines the nannou application model and its update step.
 * Initialisation loads the parameters, seeds the population and opens the
 * window; any failure there is fatal. Each update runs one scheduler frame:
 * tick, present into the frame buffer, then apply queued input.
 */

use std::path::{Path, PathBuf};

use nannou::prelude::*;
use nannou_egui::Egui;
use tracing::{error, info, warn};

use crate::camera::Camera;
use crate::debug::DebugInfo;
use crate::error::{SimError, SimResult};
use crate::input::{self, EventQueue};
use crate::params::SimulationParams;
use crate::renderer::{self, FrameBuffer};
use crate::scheduler::TickScheduler;
use crate::state::SimulationState;
use crate::ui;
use crate::vector::Vector2;

// Main model for the application
pub struct Model {
    pub state: SimulationState,
    pub scheduler: TickScheduler,
    pub egui: Egui,
    pub camera: Camera,
    pub input: EventQueue,
    pub frame: FrameBuffer,
    pub debug_info: DebugInfo,
}

// Initialize the model; the first CLI argument may name a JSON parameter file
pub fn model(app: &App) -> Model {
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);

    match build_model(app, config_path.as_deref()) {
        Ok(model) => model,
        Err(err) => {
            error!(%err, "failed to initialise simulation");
            std::process::exit(1);
        }
    }
}

fn build_model(app: &App, config_path: Option<&Path>) -> SimResult<Model> {
    let params = SimulationParams::load(config_path)?;
    let state = SimulationState::new(params, &mut rand::thread_rng())?;
    let scheduler = TickScheduler::new(&state.params)?;

    // Quitting goes through the input boundary so the run state is updated
    app.set_exit_on_escape(false);

    let window_id = app
        .new_window()
        .title("Boids")
        .size(state.params.world_width as u32, state.params.world_height as u32)
        .resizable(false)
        .view(renderer::view)
        .key_pressed(input::key_pressed)
        .mouse_moved(input::mouse_moved)
        .mouse_pressed(input::mouse_pressed)
        .mouse_released(input::mouse_released)
        .closed(input::closed)
        .raw_event(input::raw_window_event)
        .build()
        .map_err(|err| SimError::DisplayInit(format!("{err:?}")))?;

    let window = app
        .window(window_id)
        .ok_or_else(|| SimError::DisplayInit("window closed during start-up".to_owned()))?;
    let egui = Egui::from_window(&window);

    let debug_info = DebugInfo {
        workers: scheduler.workers(),
        grid_columns: state.world.grid.columns(),
        grid_rows: state.world.grid.rows(),
        ..DebugInfo::default()
    };

    info!(
        boids = state.world.len(),
        columns = debug_info.grid_columns,
        rows = debug_info.grid_rows,
        workers = debug_info.workers,
        "simulation initialised",
    );

    let world_size = Vector2::new(state.params.world_width, state.params.world_height);

    Ok(Model {
        state,
        scheduler,
        egui,
        camera: Camera::new(world_size),
        input: EventQueue::default(),
        frame: FrameBuffer::default(),
        debug_info,
    })
}

// Update the model
pub fn update(app: &App, model: &mut Model, update: Update) {
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;

    model.egui.set_elapsed_time(update.since_start);
    let response = ui::update_ui(&mut model.egui, &mut model.state, &model.debug_info);
    if response.reset {
        if let Err(err) = model.state.reset(&mut rand::thread_rng()) {
            warn!(%err, "population reset rejected");
        }
    }

    if let Some(stats) = model.scheduler.frame(&mut model.state, &mut model.frame, &mut model.input) {
        model.debug_info.record(stats);
    }

    if !model.state.is_running() {
        app.quit();
    }
}
