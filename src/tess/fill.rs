//! Fill tessellation: a segment stream becomes an independent-triangle mesh.

use crate::error::PathError;
use crate::tess::polygon;
use crate::tess::walk::{walk, WalkEvent};
use crate::types::{BoundingBox, WindingRule};

/// Triangulated fill geometry.
///
/// `vertices` holds x,y pairs, three vertices per triangle, no index
/// buffer. `bounds` covers exactly the emitted vertices; an empty mesh
/// reports the zero box.
#[derive(Clone, Debug, Default)]
pub struct FillGeometry {
    pub vertices: Vec<f32>,
    pub bounds: BoundingBox,
}

impl FillGeometry {
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 6
    }
}

/// Build fill geometry for a segment stream.
///
/// `iterations` is the sample count used when flattening each curve or
/// arc. Contours with fewer than three effective points or no area
/// contribute nothing; a stream with no fillable area yields an empty
/// mesh. Only a malformed stream is an error.
pub fn tessellate(
    segments: &[u8],
    coords: &[f32],
    rule: WindingRule,
    iterations: u32,
) -> Result<FillGeometry, PathError> {
    // 1) Walk the stream into raw rings.
    let mut contours: Vec<Vec<(f32, f32)>> = Vec::new();
    let mut open: Vec<(f32, f32)> = Vec::new();
    let finalize = |contours: &mut Vec<Vec<(f32, f32)>>, open: &mut Vec<(f32, f32)>| {
        if open.len() >= 3 {
            contours.push(std::mem::take(open));
        } else {
            open.clear();
        }
    };
    walk(segments, coords, iterations, |ev| match ev {
        WalkEvent::Begin(p) => {
            finalize(&mut contours, &mut open);
            open.push(p);
        }
        WalkEvent::Point(p) => open.push(p),
        WalkEvent::Jump(_) => {}
        WalkEvent::Close(_) => finalize(&mut contours, &mut open),
    })?;
    finalize(&mut contours, &mut open);

    // 2) Cleanup: drop duplicate vertices and degenerate rings.
    for ring in &mut contours {
        polygon::normalize_ring(ring);
    }
    contours.retain(|ring| ring.len() >= 3 && polygon::ring_area_abs(ring) > 0.0);

    // 3) Crossing rings, with themselves or with each other, become
    //    simple sub-rings sharing synthesized vertices.
    let contours = polygon::split_intersections(contours);

    // 4) Winding classification and hole grouping.
    let groups = polygon::group_contours(&contours, rule);

    // 5) Triangulate, accumulating bounds over emitted vertices only.
    let mut vertices: Vec<f32> = Vec::new();
    let mut bounds = BoundingBox::EMPTY;
    polygon::triangulate_groups(&contours, &groups, |p| {
        bounds.expand(p.0, p.1);
        vertices.push(p.0);
        vertices.push(p.1);
    });

    if vertices.is_empty() {
        return Ok(FillGeometry { vertices, bounds: BoundingBox::default() });
    }
    Ok(FillGeometry { vertices, bounds })
}
