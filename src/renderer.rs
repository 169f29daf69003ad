/*
 * Renderer Module
 *
 * The Display side of the window: the scheduler hands each tick's triangles
 * to a FrameBuffer, and the nannou view draws whatever the buffer holds.
 */

use nannou::prelude::*;
use tracing::warn;

use crate::app::Model;
use crate::boundary::{Display, TriangleFan};

#[derive(Debug, Default)]
pub struct FrameBuffer {
    triangles: Vec<TriangleFan>,
}

impl FrameBuffer {
    pub fn triangles(&self) -> &[TriangleFan] {
        &self.triangles
    }
}

impl Display for FrameBuffer {
    fn present(&mut self, triangles: &[TriangleFan]) {
        self.triangles.clear();
        self.triangles.extend_from_slice(triangles);
    }
}

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    draw.background().color(BLACK);

    for triangle in model.frame.triangles() {
        let points = triangle.vertices.map(|v| model.camera.world_to_screen(v));
        let [r, g, b, _] = triangle.rgba;
        draw.polygon().color(rgb(r, g, b)).points(points);
    }

    if let Err(err) = draw.to_frame(app, &frame) {
        warn!(?err, "failed to draw frame");
    }

    // Draw the egui UI
    if let Err(err) = model.egui.draw_to_frame(&frame) {
        warn!(?err, "failed to draw control panel");
    }
}
