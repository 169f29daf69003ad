/*
 * Simulation Parameters Module
 *
 * This module defines the SimulationParams struct that holds every tunable of
 * the simulation: world and cell geometry, population, the neighbour rule
 * factors and radii, and the time scale. Parameters load from an optional JSON
 * file and are validated once before the world is built. The factor ranges
 * below are used by the UI sliders.
 */

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// Environment variable naming a JSON parameter file.
pub const CONFIG_ENV: &str = "GRIDFLOCK_CONFIG";

// Weights and distance thresholds used by the neighbour rule evaluator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleParams {
    pub separation_factor: f32,
    pub cohesion_factor: f32,
    pub alignment_factor: f32,
    /// Neighbours at or inside this distance bleed their colour into the boid.
    pub contact_radius: f32,
    /// Neighbours at or inside this distance contribute no force.
    pub coincident_radius: f32,
    pub interaction_radius: f32,
    pub alignment_radius: f32,
}

impl Default for RuleParams {
    fn default() -> Self {
        Self {
            separation_factor: 30.0,
            cohesion_factor: 1.0,
            alignment_factor: 0.1,
            contact_radius: 15.0,
            coincident_radius: 1.0,
            interaction_radius: 100.0,
            alignment_radius: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    pub world_width: f32,
    pub world_height: f32,
    pub cell_width: f32,
    pub cell_height: f32,
    pub quantity: usize,
    /// Multiplier applied to wall-clock seconds to obtain delta time.
    pub delta_time_scale: f32,
    /// Cell-space radius of the neighbourhood searched around a boid's cell.
    pub cell_search_radius: f32,
    /// Half extent of the rendered triangle.
    pub boid_size: f32,
    pub parallel: bool,
    /// Worker pool size; 0 lets rayon pick one thread per core.
    pub worker_threads: usize,
    pub rules: RuleParams,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            world_width: 800.0,
            world_height: 700.0,
            cell_width: 100.0,
            cell_height: 100.0,
            quantity: 500,
            delta_time_scale: 50.0,
            cell_search_radius: 2.0,
            boid_size: 2.5,
            parallel: true,
            worker_threads: 0,
            rules: RuleParams::default(),
        }
    }
}

impl SimulationParams {
    // Load from an explicit path, else from $GRIDFLOCK_CONFIG, else defaults
    pub fn load(path: Option<&Path>) -> SimResult<Self> {
        let path = match path {
            Some(path) => Some(path.to_path_buf()),
            None => std::env::var_os(CONFIG_ENV).map(PathBuf::from),
        };

        let params = match path {
            Some(path) => {
                let text = std::fs::read_to_string(&path)
                    .map_err(|source| SimError::ConfigIo { path: path.clone(), source })?;
                Self::from_json(&text)?
            }
            None => Self::default(),
        };

        params.validate()?;
        Ok(params)
    }

    pub fn from_json(text: &str) -> SimResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn validate(&self) -> SimResult<()> {
        let positive = |v: f32| v.is_finite() && v > 0.0;

        if !positive(self.world_width) || !positive(self.world_height) {
            return Err(SimError::InvalidConfig("world size must be positive"));
        }
        // Wrapping re-enters at 1.0 and bound - 1.0, both must be interior
        if self.world_width <= 2.0 || self.world_height <= 2.0 {
            return Err(SimError::InvalidConfig("world size must exceed 2 units"));
        }
        if !positive(self.cell_width) || !positive(self.cell_height) {
            return Err(SimError::InvalidConfig("cell size must be positive"));
        }
        if self.cell_width > self.world_width || self.cell_height > self.world_height {
            return Err(SimError::InvalidConfig("cell size must not exceed world size"));
        }
        if !positive(self.delta_time_scale) {
            return Err(SimError::InvalidConfig("delta_time_scale must be positive"));
        }
        if !self.cell_search_radius.is_finite() || self.cell_search_radius < 0.0 {
            return Err(SimError::InvalidConfig("cell_search_radius must be non-negative"));
        }
        if !self.boid_size.is_finite() || self.boid_size < 0.0 {
            return Err(SimError::InvalidConfig("boid_size must be non-negative"));
        }

        let rules = &self.rules;
        let factors = [rules.separation_factor, rules.cohesion_factor, rules.alignment_factor];
        if factors.iter().any(|f| !f.is_finite()) {
            return Err(SimError::InvalidConfig("rule factors must be finite"));
        }
        let radii = [
            rules.contact_radius,
            rules.coincident_radius,
            rules.interaction_radius,
            rules.alignment_radius,
        ];
        if radii.iter().any(|r| !r.is_finite() || *r < 0.0) {
            return Err(SimError::InvalidConfig("rule radii must be non-negative"));
        }
        if rules.interaction_radius <= rules.coincident_radius {
            return Err(SimError::InvalidConfig(
                "interaction_radius must exceed coincident_radius",
            ));
        }

        Ok(())
    }

    // Get parameter ranges for UI sliders
    pub fn get_quantity_range() -> std::ops::RangeInclusive<usize> {
        1..=5000
    }

    pub fn get_separation_range() -> std::ops::RangeInclusive<f32> {
        0.0..=100.0
    }

    pub fn get_factor_range() -> std::ops::RangeInclusive<f32> {
        0.0..=5.0
    }

    pub fn get_speed_range() -> std::ops::RangeInclusive<f32> {
        0.0..=1.0
    }
}
