//! Legacy desktop OpenGL staging.
//!
//! The fixed-function pipeline draws `GL_TRIANGLE_STRIP` runs per quad, so
//! stroke buffers pass through in their native strip order.

use crate::backend::{RenderBackend, StagedDraw, StrokePrimitive};
use crate::paint::Paint;
use crate::types::BoundingBox;

#[derive(Debug, Default)]
pub struct GlBackend {
    fills: Vec<StagedDraw>,
    strokes: Vec<StagedDraw>,
}

impl GlBackend {
    pub fn new() -> GlBackend {
        GlBackend::default()
    }

    pub fn fills(&self) -> &[StagedDraw] {
        &self.fills
    }

    pub fn strokes(&self) -> &[StagedDraw] {
        &self.strokes
    }
}

impl RenderBackend for GlBackend {
    fn stroke_primitive(&self) -> StrokePrimitive {
        StrokePrimitive::QuadStrip
    }

    fn submit_fill(&mut self, vertices: &[f32], bounds: &BoundingBox, paint: &Paint) {
        self.fills.push(StagedDraw {
            vertices: vertices.to_vec(),
            color: paint.color(),
            bounds: Some(*bounds),
        });
    }

    fn submit_stroke(&mut self, vertices: &[f32], paint: &Paint) {
        self.strokes.push(StagedDraw {
            vertices: vertices.to_vec(),
            color: paint.color(),
            bounds: None,
        });
    }

    fn begin_frame(&mut self) {
        self.fills.clear();
        self.strokes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strokes_pass_through_as_strips() {
        let mut backend = GlBackend::new();
        assert_eq!(backend.stroke_primitive(), StrokePrimitive::QuadStrip);

        let quads = [0.0, -1.0, 0.0, 1.0, 10.0, -1.0, 10.0, 1.0];
        backend.submit_stroke(&quads, &Paint::default());
        assert_eq!(backend.strokes().len(), 1);
        assert_eq!(backend.strokes()[0].vertices, quads);

        backend.begin_frame();
        assert!(backend.strokes().is_empty());
    }

    #[test]
    fn fills_keep_their_bounds() {
        let mut backend = GlBackend::new();
        let mut bounds = BoundingBox::EMPTY;
        bounds.expand(0.0, 0.0);
        bounds.expand(4.0, 4.0);
        backend.submit_fill(&[0.0; 6], &bounds, &Paint::default());
        assert_eq!(backend.fills()[0].bounds, Some(bounds));
    }
}
