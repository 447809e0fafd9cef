//! Stroke geometry: one unjoined quad per flattened segment.

use crate::error::PathError;
use crate::tess::walk::{walk, WalkEvent};

/// Build stroke geometry for a segment stream.
///
/// Output is a flat x,y buffer with four strip-ordered vertices (eight
/// floats) per drawn segment. Corners are two overlapping quads; there are
/// no joins, miters, or end caps. Zero-length segments draw nothing, so
/// the quad count can be lower than the flattened segment count.
pub fn build_stroke(
    segments: &[u8],
    coords: &[f32],
    stroke_width: f32,
    iterations: u32,
) -> Result<Vec<f32>, PathError> {
    let mut vertices: Vec<f32> = Vec::new();
    let mut pen = (0.0f32, 0.0f32);
    walk(segments, coords, iterations, |ev| match ev {
        WalkEvent::Begin(p) | WalkEvent::Jump(p) => pen = p,
        WalkEvent::Point(p) | WalkEvent::Close(p) => {
            fat_line_segment(&mut vertices, pen, p, stroke_width);
            pen = p;
        }
    })?;
    Ok(vertices)
}

/// Emit one quad covering the segment, offset half the stroke width to
/// each side. Vertices are strip-ordered: both sides of `p0`, then both
/// sides of `p1`.
fn fat_line_segment(vertices: &mut Vec<f32>, p0: (f32, f32), p1: (f32, f32), stroke_width: f32) {
    if p0 == p1 {
        return;
    }

    let mut dx = p1.1 - p0.1;
    let mut dy = p0.0 - p1.0;
    let inv_mag = 1.0 / (dx * dx + dy * dy).sqrt();
    dx *= inv_mag;
    dy *= inv_mag;
    let radius = stroke_width * 0.5;

    vertices.push(p0.0 + radius * dx);
    vertices.push(p0.1 + radius * dy);
    vertices.push(p0.0 - radius * dx);
    vertices.push(p0.1 - radius * dy);
    vertices.push(p1.0 + radius * dx);
    vertices.push(p1.1 + radius * dy);
    vertices.push(p1.0 - radius * dx);
    vertices.push(p1.1 - radius * dy);
}
