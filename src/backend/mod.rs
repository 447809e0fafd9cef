//! Presentation backend seam.
//!
//! Design rule: the geometry core stays backend-agnostic. Backends only
//! consume finished vertex buffers, staging them in the layout their API
//! draws; device and pipeline ownership belongs to the embedding renderer.

pub mod gl;
pub mod gles;
pub mod vulkan;

use crate::paint::Paint;
use crate::tess::polygon;
use crate::types::BoundingBox;

/// Stroke delivery layout a backend draws natively.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrokePrimitive {
    /// Four-vertex strips, one per quad.
    QuadStrip,
    /// Quads pre-flattened into independent triangles.
    TriangleList,
}

/// One staged draw: a finished vertex buffer plus flat paint state.
#[derive(Clone, Debug)]
pub struct StagedDraw {
    pub vertices: Vec<f32>,
    pub color: [f32; 4],
    /// Fill draws carry their bounds for scissor and culling decisions.
    pub bounds: Option<BoundingBox>,
}

/// Consumes rebuilt geometry for one presentation API.
///
/// Fill meshes arrive as independent-triangle lists everywhere. Strokes
/// arrive as quad lists; backends that cannot draw strips convert on
/// submission.
pub trait RenderBackend {
    /// Layout this backend stages strokes in.
    fn stroke_primitive(&self) -> StrokePrimitive;

    /// Stage a fill mesh for the current frame.
    fn submit_fill(&mut self, vertices: &[f32], bounds: &BoundingBox, paint: &Paint);

    /// Stage stroke quads for the current frame.
    fn submit_stroke(&mut self, vertices: &[f32], paint: &Paint);

    /// Drop staged draws and start a fresh frame.
    fn begin_frame(&mut self);

    /// Finish the frame. Staging backends have nothing to flush.
    fn end_frame(&mut self) {}
}

/// Flatten a stroke quad list into independent triangles, two per quad,
/// preserving each quad's strip orientation.
pub(crate) fn quads_to_triangle_list(quads: &[f32], out: &mut Vec<f32>) {
    out.reserve(quads.len() / 8 * 12);
    for quad in quads.chunks_exact(8) {
        let pts = [
            (quad[0], quad[1]),
            (quad[2], quad[3]),
            (quad[4], quad[5]),
            (quad[6], quad[7]),
        ];
        polygon::strip_to_triangles(&pts, |p| {
            out.push(p.0);
            out.push(p.1);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_flattening_keeps_orientation() {
        // One horizontal stroke quad: (0,-1) (0,1) (10,-1) (10,1).
        let quad = [0.0, -1.0, 0.0, 1.0, 10.0, -1.0, 10.0, 1.0];
        let mut tris = Vec::new();
        quads_to_triangle_list(&quad, &mut tris);
        assert_eq!(tris.len(), 12);

        let sign = |t: &[f32]| {
            ((t[2] - t[0]) * (t[5] - t[1]) - (t[4] - t[0]) * (t[3] - t[1])).signum()
        };
        assert_eq!(sign(&tris[0..6]), sign(&tris[6..12]));
    }

    #[test]
    fn partial_trailing_quad_is_ignored() {
        let mut tris = Vec::new();
        quads_to_triangle_list(&[0.0; 11], &mut tris);
        assert_eq!(tris.len(), 12);
    }
}
