//! Polygon decomposition for the fill tessellator.
//!
//! Contours arrive as raw flattened rings. This module cleans them up,
//! splits crossing rings into simple ones, decides which rings bound
//! filled area under the active winding rule, attaches holes to their
//! outers, and triangulates each group.

use earcutr::earcut;
use log::warn;

use crate::types::WindingRule;

// -----------------
// Ring cleanup
// -----------------

/// Drop the duplicated closing vertex and consecutive duplicates.
///
/// Rings are implicitly closed; earcut and the containment tests are
/// happier when the closing vertex is not repeated. Only exact duplicates
/// are culled so arbitrarily small geometry survives untouched.
pub(crate) fn normalize_ring(ring: &mut Vec<(f32, f32)>) {
    ring.dedup();
    while ring.len() >= 2 && ring[0] == ring[ring.len() - 1] {
        ring.pop();
    }
}

// -----------------
// Primitive decomposition
// -----------------

/// Unroll a triangle fan into independent triangles.
pub(crate) fn fan_to_triangles(pts: &[(f32, f32)], mut emit: impl FnMut((f32, f32))) {
    for i in 2..pts.len() {
        emit(pts[0]);
        emit(pts[i - 1]);
        emit(pts[i]);
    }
}

/// Unroll a triangle strip into independent triangles.
///
/// Odd triangles swap their trailing vertices so every output triangle
/// keeps the strip's orientation.
pub(crate) fn strip_to_triangles(pts: &[(f32, f32)], mut emit: impl FnMut((f32, f32))) {
    for i in 2..pts.len() {
        if i % 2 == 0 {
            emit(pts[i - 2]);
            emit(pts[i - 1]);
            emit(pts[i]);
        } else {
            emit(pts[i - 2]);
            emit(pts[i]);
            emit(pts[i - 1]);
        }
    }
}

// -----------------
// Crossing resolution
// -----------------

/// Split every proper crossing in the contour set into simple rings.
///
/// Edge pairs from one ring and from two different rings are treated
/// alike. Each crossing is synthesized once and spliced into both strands,
/// and traversal swaps strands there. The output carries exactly the
/// directed edges of the input, so winding numbers evaluated against the
/// output match the input everywhere. A crossing inside one ring splits
/// it apart; a crossing between two rings rewires them into the
/// boundaries of their union and of their overlap.
pub(crate) fn split_intersections(contours: Vec<Vec<(f32, f32)>>) -> Vec<Vec<(f32, f32)>> {
    // Edges are numbered globally, ring by ring: vertex k owns the edge
    // from itself to the next vertex of its ring.
    let total: usize = contours.iter().map(|ring| ring.len()).sum();
    let mut verts: Vec<(f32, f32)> = Vec::with_capacity(total);
    let mut edge_to: Vec<usize> = Vec::with_capacity(total);
    for ring in &contours {
        let base = verts.len();
        for (i, &p) in ring.iter().enumerate() {
            verts.push(p);
            edge_to.push(base + (i + 1) % ring.len());
        }
    }

    // Proper crossings between edge pairs, kept per edge as (parameter
    // along the edge, crossing id). Edges that meet at a shared ring
    // vertex intersect at a parameter endpoint, which segment_crossing
    // already rejects.
    let mut splits: Vec<Vec<(f32, usize)>> = vec![Vec::new(); total];
    let mut crossings: Vec<(f32, f32)> = Vec::new();
    for i in 0..total {
        for j in (i + 1)..total {
            if let Some((p, t, u)) =
                segment_crossing(verts[i], verts[edge_to[i]], verts[j], verts[edge_to[j]])
            {
                let id = crossings.len();
                crossings.push(p);
                splits[i].push((t, id));
                splits[j].push((u, id));
            }
        }
    }
    if crossings.is_empty() {
        return contours;
    }

    // Rebuild each ring with its crossing points spliced in place.
    struct Node {
        p: (f32, f32),
        crossing: Option<usize>,
    }
    let mut nodes: Vec<Node> = Vec::with_capacity(total + 2 * crossings.len());
    let mut next: Vec<usize> = Vec::with_capacity(total + 2 * crossings.len());
    let mut edge = 0;
    for ring in &contours {
        let base = nodes.len();
        for &p in ring {
            nodes.push(Node { p, crossing: None });
            splits[edge].sort_by(|a, b| a.0.total_cmp(&b.0));
            for &(_, id) in &splits[edge] {
                nodes.push(Node { p: crossings[id], crossing: Some(id) });
            }
            edge += 1;
        }
        for k in base..nodes.len() {
            next.push(if k + 1 == nodes.len() { base } else { k + 1 });
        }
    }

    // Swapping the successors of a crossing's two occurrences reroutes
    // traversal onto the other strand there.
    let mut pair: Vec<Vec<usize>> = vec![Vec::new(); crossings.len()];
    for (k, node) in nodes.iter().enumerate() {
        if let Some(id) = node.crossing {
            pair[id].push(k);
        }
    }
    for p in &pair {
        if let [k0, k1] = p[..] {
            next.swap(k0, k1);
        }
    }

    // Permutation cycles are the simple output rings.
    let count = nodes.len();
    let mut out: Vec<Vec<(f32, f32)>> = Vec::new();
    let mut visited = vec![false; count];
    for start in 0..count {
        if visited[start] {
            continue;
        }
        let mut cycle: Vec<(f32, f32)> = Vec::new();
        let mut k = start;
        while !visited[k] {
            visited[k] = true;
            cycle.push(nodes[k].p);
            k = next[k];
        }
        normalize_ring(&mut cycle);
        if cycle.len() >= 3 && ring_area_abs(&cycle) > 0.0 {
            out.push(cycle);
        }
    }
    out
}

/// Proper crossing between segments `a0a1` and `b0b1`.
///
/// Endpoint touches and collinear overlaps do not count; only interior
/// crossings need splitting.
fn segment_crossing(
    a0: (f32, f32),
    a1: (f32, f32),
    b0: (f32, f32),
    b1: (f32, f32),
) -> Option<((f32, f32), f32, f32)> {
    let r = (a1.0 - a0.0, a1.1 - a0.1);
    let s = (b1.0 - b0.0, b1.1 - b0.1);
    let denom = r.0 * s.1 - r.1 * s.0;
    if denom == 0.0 {
        return None;
    }
    let q = (b0.0 - a0.0, b0.1 - a0.1);
    let t = (q.0 * s.1 - q.1 * s.0) / denom;
    let u = (q.0 * r.1 - q.1 * r.0) / denom;
    const EPS: f32 = 1e-6;
    if t <= EPS || t >= 1.0 - EPS || u <= EPS || u >= 1.0 - EPS {
        return None;
    }
    Some(((a0.0 + t * r.0, a0.1 + t * r.1), t, u))
}

// -----------------
// Winding classification
// -----------------

/// Evaluate the winding rule at `p` against every contour.
pub(crate) fn filled_at(p: (f32, f32), contours: &[Vec<(f32, f32)>], rule: WindingRule) -> bool {
    match rule {
        WindingRule::EvenOdd => {
            let mut inside = false;
            for ring in contours {
                if point_inside(p, ring) {
                    inside = !inside;
                }
            }
            inside
        }
        WindingRule::NonZero => {
            let mut wn: i32 = 0;
            for ring in contours {
                wn += winding_number(p, ring);
            }
            wn != 0
        }
    }
}

fn winding_number(p: (f32, f32), ring: &[(f32, f32)]) -> i32 {
    let (px, py) = p;
    let mut wn: i32 = 0;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let (x0, y0) = ring[j];
        let (x1, y1) = ring[i];
        if y0 <= py {
            if y1 > py && is_left((x0, y0), (x1, y1), (px, py)) > 0.0 {
                wn += 1;
            }
        } else if y1 <= py && is_left((x0, y0), (x1, y1), (px, py)) < 0.0 {
            wn -= 1;
        }
        j = i;
    }
    wn
}

#[inline(always)]
fn is_left(a: (f32, f32), b: (f32, f32), p: (f32, f32)) -> f32 {
    (b.0 - a.0) * (p.1 - a.1) - (p.0 - a.0) * (b.1 - a.1)
}

fn point_inside(p: (f32, f32), ring: &[(f32, f32)]) -> bool {
    // Ray casting.
    let (px, py) = p;
    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let (xi, yi) = ring[i];
        let (xj, yj) = ring[j];
        if (yi > py) != (yj > py) && px < (xj - xi) * (py - yi) / (yj - yi + 1e-12) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Pick a point that is (very likely) just inside the ring.
///
/// Offsets the midpoint of the longest edge perpendicular by a fraction of
/// the ring's own size, so the pick works at any coordinate scale.
pub(crate) fn interior_sample(ring: &[(f32, f32)]) -> (f32, f32) {
    let mut longest = 0.0f32;
    let mut p0 = ring[0];
    let mut p1 = ring[1 % ring.len()];
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let a = ring[j];
        let b = ring[i];
        let len_sq = (b.0 - a.0).powi(2) + (b.1 - a.1).powi(2);
        if len_sq > longest {
            longest = len_sq;
            p0 = a;
            p1 = b;
        }
        j = i;
    }
    let mid = ((p0.0 + p1.0) * 0.5, (p0.1 + p1.1) * 0.5);
    let len = longest.sqrt().max(1e-12);
    let nx = -(p1.1 - p0.1) / len;
    let ny = (p1.0 - p0.0) / len;

    let (bb_min_x, bb_min_y, bb_max_x, bb_max_y) = ring_bbox(ring);
    let scale = (bb_max_x - bb_min_x).max(bb_max_y - bb_min_y).max(1e-12);
    for frac in [1e-3f32, 1e-2, 1e-1] {
        let off = frac * scale;
        let c0 = (mid.0 + nx * off, mid.1 + ny * off);
        if point_inside(c0, ring) {
            return c0;
        }
        let c1 = (mid.0 - nx * off, mid.1 - ny * off);
        if point_inside(c1, ring) {
            return c1;
        }
    }

    // Fallback: centroid-ish.
    let mut cx = 0.0f32;
    let mut cy = 0.0f32;
    for &(x, y) in ring {
        cx += x;
        cy += y;
    }
    (cx / ring.len() as f32, cy / ring.len() as f32)
}

// -----------------
// Hole grouping
// -----------------

/// Indices into the contour list: one filled outer plus its holes.
#[derive(Clone, Debug)]
pub(crate) struct ContourGroup {
    pub outer: usize,
    pub holes: Vec<usize>,
}

/// Group contours into filled outers with attached holes.
///
/// A contour is an outer when the winding rule evaluates filled just
/// inside it, against all contours together. This handles nesting for both
/// rules without winding-sign heuristics. Holes attach to their nearest
/// filled ancestor, found through the smallest-containing-contour parent
/// relation.
pub(crate) fn group_contours(contours: &[Vec<(f32, f32)>], rule: WindingRule) -> Vec<ContourGroup> {
    let mut bboxes = Vec::with_capacity(contours.len());
    let mut samples = Vec::with_capacity(contours.len());
    for ring in contours {
        bboxes.push(ring_bbox(ring));
        samples.push(interior_sample(ring));
    }

    let mut parent: Vec<Option<usize>> = vec![None; contours.len()];
    for i in 0..contours.len() {
        let p = samples[i];
        let mut best: Option<usize> = None;
        let mut best_area = f32::INFINITY;
        for (j, ring) in contours.iter().enumerate() {
            if i == j || !bbox_contains(bboxes[j], p) || !point_inside(p, ring) {
                continue;
            }
            let area = ring_area_abs(ring);
            if area < best_area {
                best_area = area;
                best = Some(j);
            }
        }
        parent[i] = best;
    }

    let is_outer: Vec<bool> =
        (0..contours.len()).map(|i| filled_at(samples[i], contours, rule)).collect();

    let mut groups: Vec<ContourGroup> = Vec::new();
    let mut group_of: Vec<Option<usize>> = vec![None; contours.len()];
    for (i, outer) in is_outer.iter().enumerate() {
        if *outer {
            group_of[i] = Some(groups.len());
            groups.push(ContourGroup { outer: i, holes: Vec::new() });
        }
    }

    for i in 0..contours.len() {
        if is_outer[i] {
            continue;
        }
        let mut up = parent[i];
        while let Some(j) = up {
            if let Some(g) = group_of[j] {
                groups[g].holes.push(i);
                break;
            }
            up = parent[j];
        }
    }

    groups
}

// -----------------
// Triangulation
// -----------------

/// Triangulate every group into an independent-triangle stream.
///
/// Convex hole-free outers fan directly; everything else goes through
/// earcut. A group earcut cannot handle is logged and skipped, never
/// fatal.
pub(crate) fn triangulate_groups(
    contours: &[Vec<(f32, f32)>],
    groups: &[ContourGroup],
    mut emit: impl FnMut((f32, f32)),
) {
    for group in groups {
        let outer = &contours[group.outer];
        if group.holes.is_empty() && is_convex(outer) {
            fan_to_triangles(outer, &mut emit);
            continue;
        }

        let mut coords: Vec<f64> = Vec::new();
        let mut pts: Vec<(f32, f32)> = Vec::new();
        let mut hole_starts: Vec<usize> = Vec::new();
        push_ring(&mut coords, &mut pts, outer);
        for &h in &group.holes {
            hole_starts.push(pts.len());
            push_ring(&mut coords, &mut pts, &contours[h]);
        }

        match earcut(&coords, &hole_starts, 2) {
            Ok(indices) => {
                for tri in indices.chunks_exact(3) {
                    emit(pts[tri[0]]);
                    emit(pts[tri[1]]);
                    emit(pts[tri[2]]);
                }
            }
            Err(err) => {
                warn!("skipping untriangulatable contour group: {:?}", err);
            }
        }
    }
}

fn push_ring(coords: &mut Vec<f64>, pts: &mut Vec<(f32, f32)>, ring: &[(f32, f32)]) {
    for &(x, y) in ring {
        coords.push(x as f64);
        coords.push(y as f64);
        pts.push((x, y));
    }
}

/// All non-degenerate turns agree in direction.
fn is_convex(ring: &[(f32, f32)]) -> bool {
    let n = ring.len();
    if n < 4 {
        return true;
    }
    let mut sign = 0.0f32;
    for i in 0..n {
        let a = ring[i];
        let b = ring[(i + 1) % n];
        let c = ring[(i + 2) % n];
        let cross = (b.0 - a.0) * (c.1 - b.1) - (b.1 - a.1) * (c.0 - b.0);
        if cross != 0.0 {
            if sign != 0.0 && (cross > 0.0) != (sign > 0.0) {
                return false;
            }
            sign = cross;
        }
    }
    true
}

// -----------------
// Area and bounds helpers
// -----------------

#[inline(always)]
pub(crate) fn ring_area_signed(ring: &[(f32, f32)]) -> f32 {
    // Shoelace.
    let mut a = 0.0f32;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        a += ring[j].0 * ring[i].1 - ring[i].0 * ring[j].1;
        j = i;
    }
    0.5 * a
}

#[inline(always)]
pub(crate) fn ring_area_abs(ring: &[(f32, f32)]) -> f32 {
    ring_area_signed(ring).abs()
}

#[inline(always)]
fn ring_bbox(ring: &[(f32, f32)]) -> (f32, f32, f32, f32) {
    let mut min_x = ring[0].0;
    let mut max_x = ring[0].0;
    let mut min_y = ring[0].1;
    let mut max_y = ring[0].1;
    for &(x, y) in ring.iter().skip(1) {
        min_x = min_x.min(x);
        max_x = max_x.max(x);
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }
    (min_x, min_y, max_x, max_y)
}

#[inline(always)]
fn bbox_contains(bb: (f32, f32, f32, f32), p: (f32, f32)) -> bool {
    p.0 > bb.0 && p.0 < bb.2 && p.1 > bb.1 && p.1 < bb.3
}
