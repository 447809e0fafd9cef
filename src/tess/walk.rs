//! Segment stream walking, shared by the fill and stroke builders.
//!
//! Both builders consume the same event stream and differ only in what they
//! do with the on-path points. Nothing is cached between walks: a path that
//! is both filled and stroked flattens its curves once per builder.

use crate::error::PathError;
use crate::path::segment::{Segment, SegmentKind};
use crate::tess::flatten;

/// On-path events produced while walking a segment stream.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum WalkEvent {
    /// A contour opened at the point.
    Begin((f32, f32)),
    /// Next on-path point of the open contour, connected by an edge.
    Point((f32, f32)),
    /// The current point moved without tracing an edge. Arc sampling stops
    /// short of the arc's endpoint; the open contour continues from there.
    Jump((f32, f32)),
    /// The contour closed back to its anchor point.
    Close((f32, f32)),
}

struct Cursor<'a> {
    coords: &'a [f32],
    at: usize,
}

impl<'a> Cursor<'a> {
    fn remaining(&self) -> usize {
        self.coords.len() - self.at
    }

    // Arity is checked per segment before any next() call.
    fn next(&mut self) -> f32 {
        let v = self.coords[self.at];
        self.at += 1;
        v
    }
}

#[inline(always)]
fn reflect(p: (f32, f32), through: (f32, f32)) -> (f32, f32) {
    (2.0 * through.0 - p.0, 2.0 * through.1 - p.1)
}

fn ensure_open<V: FnMut(WalkEvent)>(open: &mut bool, at: (f32, f32), visit: &mut V) {
    if !*open {
        visit(WalkEvent::Begin(at));
        *open = true;
    }
}

/// Walk a segment stream, resolving relative coordinates and flattening
/// curves and arcs into `iterations` samples each.
///
/// The walk is strict about the stream itself (unknown opcodes and
/// coordinate underruns abort with an error before any partial segment is
/// consumed) and lenient about geometry: degenerate arcs skip to their
/// endpoint, and a point-producing segment with no contour open implicitly
/// opens one at the current point.
pub(crate) fn walk<V>(
    segments: &[u8],
    coords: &[f32],
    iterations: u32,
    mut visit: V,
) -> Result<(), PathError>
where
    V: FnMut(WalkEvent),
{
    let steps = iterations.max(1);
    let mut cursor = Cursor { coords, at: 0 };
    let mut cur = (0.0f32, 0.0f32);
    let mut anchor = (0.0f32, 0.0f32);
    let mut open = false;
    // Trailing control point of the preceding segment, kept per curve
    // family so the smooth shorthands reflect only across their own kind.
    let mut prev_quad_ctrl: Option<(f32, f32)> = None;
    let mut prev_cubic_ctrl: Option<(f32, f32)> = None;

    for &opcode in segments {
        let seg = Segment::decode(opcode)?;
        let needed = seg.kind.coord_count();
        if cursor.remaining() < needed {
            return Err(PathError::CoordinateUnderrun {
                opcode,
                needed,
                available: cursor.remaining(),
            });
        }

        match seg.kind {
            SegmentKind::ClosePath => {
                visit(WalkEvent::Close(anchor));
                cur = anchor;
                open = false;
                prev_quad_ctrl = None;
                prev_cubic_ctrl = None;
            }
            SegmentKind::MoveTo => {
                let mut p = (cursor.next(), cursor.next());
                if seg.relative {
                    p.0 += cur.0;
                    p.1 += cur.1;
                }
                cur = p;
                anchor = p;
                open = true;
                visit(WalkEvent::Begin(p));
                prev_quad_ctrl = None;
                prev_cubic_ctrl = None;
            }
            SegmentKind::LineTo => {
                let mut p = (cursor.next(), cursor.next());
                if seg.relative {
                    p.0 += cur.0;
                    p.1 += cur.1;
                }
                ensure_open(&mut open, cur, &mut visit);
                visit(WalkEvent::Point(p));
                cur = p;
                prev_quad_ctrl = None;
                prev_cubic_ctrl = None;
            }
            SegmentKind::HLineTo => {
                let mut x = cursor.next();
                if seg.relative {
                    x += cur.0;
                }
                let p = (x, cur.1);
                ensure_open(&mut open, cur, &mut visit);
                visit(WalkEvent::Point(p));
                cur = p;
                prev_quad_ctrl = None;
                prev_cubic_ctrl = None;
            }
            SegmentKind::VLineTo => {
                let mut y = cursor.next();
                if seg.relative {
                    y += cur.1;
                }
                let p = (cur.0, y);
                ensure_open(&mut open, cur, &mut visit);
                visit(WalkEvent::Point(p));
                cur = p;
                prev_quad_ctrl = None;
                prev_cubic_ctrl = None;
            }
            SegmentKind::QuadTo => {
                let mut c = (cursor.next(), cursor.next());
                let mut p = (cursor.next(), cursor.next());
                if seg.relative {
                    c.0 += cur.0;
                    c.1 += cur.1;
                    p.0 += cur.0;
                    p.1 += cur.1;
                }
                ensure_open(&mut open, cur, &mut visit);
                let from = cur;
                for i in 1..=steps {
                    let t = i as f32 / steps as f32;
                    visit(WalkEvent::Point(flatten::quad_point(from, c, p, t)));
                }
                cur = p;
                prev_quad_ctrl = Some(c);
                prev_cubic_ctrl = None;
            }
            SegmentKind::SmoothQuadTo => {
                let mut p = (cursor.next(), cursor.next());
                if seg.relative {
                    p.0 += cur.0;
                    p.1 += cur.1;
                }
                let c = match prev_quad_ctrl {
                    Some(prev) => reflect(prev, cur),
                    None => cur,
                };
                ensure_open(&mut open, cur, &mut visit);
                let from = cur;
                for i in 1..=steps {
                    let t = i as f32 / steps as f32;
                    visit(WalkEvent::Point(flatten::quad_point(from, c, p, t)));
                }
                cur = p;
                prev_quad_ctrl = Some(c);
                prev_cubic_ctrl = None;
            }
            SegmentKind::CubicTo => {
                let mut c0 = (cursor.next(), cursor.next());
                let mut c1 = (cursor.next(), cursor.next());
                let mut p = (cursor.next(), cursor.next());
                if seg.relative {
                    c0.0 += cur.0;
                    c0.1 += cur.1;
                    c1.0 += cur.0;
                    c1.1 += cur.1;
                    p.0 += cur.0;
                    p.1 += cur.1;
                }
                ensure_open(&mut open, cur, &mut visit);
                let from = cur;
                for i in 1..=steps {
                    let t = i as f32 / steps as f32;
                    visit(WalkEvent::Point(flatten::cubic_point(from, c0, c1, p, t)));
                }
                cur = p;
                prev_cubic_ctrl = Some(c1);
                prev_quad_ctrl = None;
            }
            SegmentKind::SmoothCubicTo => {
                let mut c1 = (cursor.next(), cursor.next());
                let mut p = (cursor.next(), cursor.next());
                if seg.relative {
                    c1.0 += cur.0;
                    c1.1 += cur.1;
                    p.0 += cur.0;
                    p.1 += cur.1;
                }
                let c0 = match prev_cubic_ctrl {
                    Some(prev) => reflect(prev, cur),
                    None => cur,
                };
                ensure_open(&mut open, cur, &mut visit);
                let from = cur;
                for i in 1..=steps {
                    let t = i as f32 / steps as f32;
                    visit(WalkEvent::Point(flatten::cubic_point(from, c0, c1, p, t)));
                }
                cur = p;
                prev_cubic_ctrl = Some(c1);
                prev_quad_ctrl = None;
            }
            SegmentKind::SmallCcwArcTo
            | SegmentKind::SmallCwArcTo
            | SegmentKind::LargeCcwArcTo
            | SegmentKind::LargeCwArcTo => {
                let rh = cursor.next();
                let rv = cursor.next();
                let rot = cursor.next();
                let mut p = (cursor.next(), cursor.next());
                if seg.relative {
                    p.0 += cur.0;
                    p.1 += cur.1;
                }
                ensure_open(&mut open, cur, &mut visit);
                match flatten::arc_sweep(rh, rv, rot, cur, p) {
                    Some(sweep) => {
                        let step = 360.0 / steps as f32;
                        let mut angle = sweep.start_angle;
                        while angle < sweep.end_angle {
                            visit(WalkEvent::Point(flatten::ellipse_point(
                                sweep.center,
                                rh,
                                rv,
                                angle,
                            )));
                            angle += step;
                        }
                    }
                    None => {
                        log::debug!(
                            "arc opcode {:#04x} admits no ellipse center, skipping to endpoint",
                            opcode
                        );
                    }
                }
                visit(WalkEvent::Jump(p));
                cur = p;
                prev_quad_ctrl = None;
                prev_cubic_ctrl = None;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn events(segments: &[u8], coords: &[f32], iterations: u32) -> Vec<WalkEvent> {
        let mut out = Vec::new();
        walk(segments, coords, iterations, |ev| out.push(ev)).unwrap();
        out
    }

    fn op(kind: SegmentKind) -> u8 {
        Segment::abs(kind).encode()
    }

    fn rel_op(kind: SegmentKind) -> u8 {
        Segment::rel(kind).encode()
    }

    #[test]
    fn move_line_close_sequence() {
        let segs = [
            op(SegmentKind::MoveTo),
            op(SegmentKind::LineTo),
            op(SegmentKind::ClosePath),
        ];
        let coords = [5.0, 5.0, 10.0, 5.0];
        assert_eq!(
            events(&segs, &coords, 16),
            vec![
                WalkEvent::Begin((5.0, 5.0)),
                WalkEvent::Point((10.0, 5.0)),
                WalkEvent::Close((5.0, 5.0)),
            ]
        );
    }

    #[test]
    fn relative_coordinates_accumulate() {
        let segs = [
            rel_op(SegmentKind::MoveTo),
            rel_op(SegmentKind::LineTo),
            rel_op(SegmentKind::HLineTo),
            rel_op(SegmentKind::VLineTo),
        ];
        let coords = [1.0, 2.0, 3.0, 4.0, 10.0, -1.0];
        assert_eq!(
            events(&segs, &coords, 16),
            vec![
                WalkEvent::Begin((1.0, 2.0)),
                WalkEvent::Point((4.0, 6.0)),
                WalkEvent::Point((14.0, 6.0)),
                WalkEvent::Point((14.0, 5.0)),
            ]
        );
    }

    #[test]
    fn hline_vline_inherit_the_other_axis() {
        let segs = [
            op(SegmentKind::MoveTo),
            op(SegmentKind::HLineTo),
            op(SegmentKind::VLineTo),
        ];
        let coords = [2.0, 3.0, 9.0, 7.0];
        assert_eq!(
            events(&segs, &coords, 16),
            vec![
                WalkEvent::Begin((2.0, 3.0)),
                WalkEvent::Point((9.0, 3.0)),
                WalkEvent::Point((9.0, 7.0)),
            ]
        );
    }

    #[test]
    fn close_resets_current_point_to_anchor() {
        let segs = [
            op(SegmentKind::MoveTo),
            op(SegmentKind::LineTo),
            op(SegmentKind::ClosePath),
            rel_op(SegmentKind::LineTo),
        ];
        let coords = [5.0, 5.0, 10.0, 5.0, 1.0, 1.0];
        let evs = events(&segs, &coords, 16);
        // The relative line after the close starts from the anchor and the
        // contour reopens there.
        assert_eq!(evs[3], WalkEvent::Begin((5.0, 5.0)));
        assert_eq!(evs[4], WalkEvent::Point((6.0, 6.0)));
    }

    #[test]
    fn leading_segment_without_move_opens_at_origin() {
        let segs = [op(SegmentKind::LineTo)];
        let coords = [3.0, 4.0];
        assert_eq!(
            events(&segs, &coords, 16),
            vec![WalkEvent::Begin((0.0, 0.0)), WalkEvent::Point((3.0, 4.0))]
        );
    }

    #[test]
    fn cubic_emits_iterations_samples_ending_on_endpoint() {
        let segs = [op(SegmentKind::MoveTo), op(SegmentKind::CubicTo)];
        let coords = [0.0, 0.0, 1.0, 2.0, 3.0, 2.0, 4.0, 0.0];
        let evs = events(&segs, &coords, 7);
        assert_eq!(evs.len(), 1 + 7);
        // Exact endpoint, not approximate: t reaches exactly 1.0.
        assert_eq!(*evs.last().unwrap(), WalkEvent::Point((4.0, 0.0)));
    }

    #[test]
    fn quad_sample_count_follows_iterations() {
        let segs = [op(SegmentKind::MoveTo), op(SegmentKind::QuadTo)];
        let coords = [0.0, 0.0, 1.0, 1.0, 2.0, 0.0];
        assert_eq!(events(&segs, &coords, 5).len(), 1 + 5);
        assert_eq!(events(&segs, &coords, 1).len(), 1 + 1);
    }

    #[test]
    fn smooth_quad_reflects_previous_control() {
        let segs = [
            op(SegmentKind::MoveTo),
            op(SegmentKind::QuadTo),
            op(SegmentKind::SmoothQuadTo),
        ];
        let coords = [0.0, 0.0, 2.0, 2.0, 4.0, 0.0, 8.0, 0.0];
        let evs = events(&segs, &coords, 2);
        // Reflected control is 2*(4,0) - (2,2) = (6,-2).
        let expected = flatten::quad_point((4.0, 0.0), (6.0, -2.0), (8.0, 0.0), 0.5);
        assert_eq!(evs[3], WalkEvent::Point(expected));
        assert_eq!(evs[4], WalkEvent::Point((8.0, 0.0)));
    }

    #[test]
    fn smooth_cubic_reflects_previous_control() {
        let segs = [
            op(SegmentKind::MoveTo),
            op(SegmentKind::CubicTo),
            op(SegmentKind::SmoothCubicTo),
        ];
        let coords = [
            0.0, 0.0, // move
            1.0, 1.0, 2.0, 1.0, 3.0, 0.0, // cubic, trailing control (2,1)
            5.0, -1.0, 6.0, 0.0, // smooth cubic
        ];
        let evs = events(&segs, &coords, 2);
        // First control reflects (2,1) across (3,0) to (4,-1).
        let expected = flatten::cubic_point((3.0, 0.0), (4.0, -1.0), (5.0, -1.0), (6.0, 0.0), 0.5);
        assert_eq!(evs[3], WalkEvent::Point(expected));
    }

    #[test]
    fn smooth_after_line_degrades_to_current_point() {
        let segs = [
            op(SegmentKind::MoveTo),
            op(SegmentKind::LineTo),
            op(SegmentKind::SmoothQuadTo),
        ];
        let coords = [0.0, 0.0, 4.0, 0.0, 8.0, 4.0];
        let evs = events(&segs, &coords, 2);
        // No preceding quad: the control collapses onto the current point.
        let expected = flatten::quad_point((4.0, 0.0), (4.0, 0.0), (8.0, 4.0), 0.5);
        assert_eq!(evs[2], WalkEvent::Point(expected));
    }

    #[test]
    fn smooth_cubic_ignores_quad_history() {
        let segs = [
            op(SegmentKind::MoveTo),
            op(SegmentKind::QuadTo),
            op(SegmentKind::SmoothCubicTo),
        ];
        let coords = [0.0, 0.0, 2.0, 2.0, 4.0, 0.0, 5.0, -1.0, 6.0, 0.0];
        let evs = events(&segs, &coords, 2);
        // The quad's control does not reflect into a cubic shorthand.
        let expected = flatten::cubic_point((4.0, 0.0), (4.0, 0.0), (5.0, -1.0), (6.0, 0.0), 0.5);
        assert_eq!(evs[3], WalkEvent::Point(expected));
    }

    #[test]
    fn all_four_arc_kinds_walk_identically() {
        let kinds = [
            SegmentKind::SmallCcwArcTo,
            SegmentKind::SmallCwArcTo,
            SegmentKind::LargeCcwArcTo,
            SegmentKind::LargeCwArcTo,
        ];
        let coords = [0.0, 0.0, 2.0, 2.0, 0.0, 2.0, 2.0];
        let reference = events(&[op(SegmentKind::MoveTo), op(kinds[0])], &coords, 16);
        assert!(reference.len() > 3, "arc produced no samples");
        for kind in &kinds[1..] {
            let evs = events(&[op(SegmentKind::MoveTo), op(*kind)], &coords, 16);
            assert_eq!(evs, reference, "{:?} diverged", kind);
        }
    }

    #[test]
    fn degenerate_arc_jumps_to_endpoint() {
        let segs = [op(SegmentKind::MoveTo), op(SegmentKind::SmallCcwArcTo)];
        // Unit radii cannot span endpoints 10 apart.
        let coords = [0.0, 0.0, 1.0, 1.0, 0.0, 10.0, 0.0];
        assert_eq!(
            events(&segs, &coords, 16),
            vec![WalkEvent::Begin((0.0, 0.0)), WalkEvent::Jump((10.0, 0.0))]
        );
    }

    #[test]
    fn relative_arc_offsets_endpoint_only() {
        let abs = [op(SegmentKind::MoveTo), op(SegmentKind::SmallCwArcTo)];
        let rel = [op(SegmentKind::MoveTo), rel_op(SegmentKind::SmallCwArcTo)];
        let abs_coords = [1.0, 1.0, 2.0, 2.0, 0.0, 3.0, 3.0];
        let rel_coords = [1.0, 1.0, 2.0, 2.0, 0.0, 2.0, 2.0];
        assert_eq!(events(&abs, &abs_coords, 16), events(&rel, &rel_coords, 16));
    }

    #[test]
    fn underrun_reports_opcode_and_counts() {
        let segs = [op(SegmentKind::MoveTo), op(SegmentKind::CubicTo)];
        let coords = [0.0, 0.0, 1.0, 1.0, 2.0];
        let err = walk(&segs, &coords, 16, |_| {}).unwrap_err();
        assert_eq!(
            err,
            PathError::CoordinateUnderrun {
                opcode: op(SegmentKind::CubicTo),
                needed: 6,
                available: 3,
            }
        );
    }

    #[test]
    fn unknown_opcode_aborts_the_walk() {
        let err = walk(&[0xff], &[], 16, |_| {}).unwrap_err();
        assert_eq!(err, PathError::UnknownOpcode(0xff));
    }
}
