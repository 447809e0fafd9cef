//! Vulkan staging.
//!
//! Strokes flatten to triangle lists, and every staged draw is tagged with
//! the frame index so the embedding renderer can bind it to the matching
//! in-flight frame resources.

use crate::backend::{quads_to_triangle_list, RenderBackend, StagedDraw, StrokePrimitive};
use crate::paint::Paint;
use crate::types::BoundingBox;

#[derive(Debug, Default)]
pub struct VulkanBackend {
    fills: Vec<StagedDraw>,
    strokes: Vec<StagedDraw>,
    frame_index: u64,
}

impl VulkanBackend {
    pub fn new() -> VulkanBackend {
        VulkanBackend::default()
    }

    pub fn fills(&self) -> &[StagedDraw] {
        &self.fills
    }

    pub fn strokes(&self) -> &[StagedDraw] {
        &self.strokes
    }

    /// Monotonic frame counter, bumped by every `begin_frame`.
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }
}

impl RenderBackend for VulkanBackend {
    fn stroke_primitive(&self) -> StrokePrimitive {
        StrokePrimitive::TriangleList
    }

    fn submit_fill(&mut self, vertices: &[f32], bounds: &BoundingBox, paint: &Paint) {
        self.fills.push(StagedDraw {
            vertices: vertices.to_vec(),
            color: paint.color(),
            bounds: Some(*bounds),
        });
    }

    fn submit_stroke(&mut self, vertices: &[f32], paint: &Paint) {
        let mut triangles = Vec::new();
        quads_to_triangle_list(vertices, &mut triangles);
        self.strokes.push(StagedDraw {
            vertices: triangles,
            color: paint.color(),
            bounds: None,
        });
    }

    fn begin_frame(&mut self) {
        self.frame_index += 1;
        self.fills.clear();
        self.strokes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_advance_and_drop_staged_draws() {
        let mut backend = VulkanBackend::new();
        assert_eq!(backend.frame_index(), 0);

        backend.begin_frame();
        backend.submit_stroke(
            &[0.0, -1.0, 0.0, 1.0, 5.0, -1.0, 5.0, 1.0],
            &Paint::default(),
        );
        backend.end_frame();
        assert_eq!(backend.frame_index(), 1);
        assert_eq!(backend.strokes().len(), 1);

        backend.begin_frame();
        assert_eq!(backend.frame_index(), 2);
        assert!(backend.strokes().is_empty());
    }
}
