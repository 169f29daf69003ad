/*
 * Debug Information Module
 *
 * This module defines the DebugInfo struct that collects performance metrics
 * and simulation readouts shown in the control panel.
 */

use std::time::Duration;

use crate::scheduler::FrameStats;

// Debug information to display
#[derive(Debug, Clone, Default)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub tick_time: Duration,
    pub delta_time: f32,
    pub triangles: usize,
    pub workers: usize,
    pub grid_columns: usize,
    pub grid_rows: usize,
}

impl DebugInfo {
    pub fn record(&mut self, stats: FrameStats) {
        self.tick_time = stats.tick_time;
        self.delta_time = stats.delta_time;
        self.triangles = stats.triangles;
    }
}
