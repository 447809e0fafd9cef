//! OpenGL ES staging.
//!
//! ES2 class hardware has no quad primitives, so stroke quads are
//! flattened into independent triangles on submission and fills and
//! strokes share one draw layout.

use crate::backend::{quads_to_triangle_list, RenderBackend, StagedDraw, StrokePrimitive};
use crate::paint::Paint;
use crate::types::BoundingBox;

#[derive(Debug, Default)]
pub struct GlesBackend {
    fills: Vec<StagedDraw>,
    strokes: Vec<StagedDraw>,
}

impl GlesBackend {
    pub fn new() -> GlesBackend {
        GlesBackend::default()
    }

    pub fn fills(&self) -> &[StagedDraw] {
        &self.fills
    }

    pub fn strokes(&self) -> &[StagedDraw] {
        &self.strokes
    }
}

impl RenderBackend for GlesBackend {
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
        self.fills.clear();
        self.strokes.clear();
    }
}
