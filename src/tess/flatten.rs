//! Curve and arc flattening math.
//!
//! Pure functions: the segment walker decides where samples go, these
//! compute what the samples are. Everything here is deterministic so
//! repeated builds of an unchanged path produce bit-identical geometry.

/// Cubic Bezier basis along one axis.
///
/// At `t == 1.0` the three leading terms multiply by an exact zero, so the
/// result is exactly `p1` and flattened curves land on their endpoints.
#[inline(always)]
pub(crate) fn cubic_bezier_1d(p0: f32, c0: f32, c1: f32, p1: f32, t: f32) -> f32 {
    let omt = 1.0 - t;
    p0 * omt * omt * omt
        + 3.0 * c0 * t * omt * omt
        + 3.0 * c1 * t * t * omt
        + p1 * t * t * t
}

/// Quadratic Bezier basis along one axis.
#[inline(always)]
pub(crate) fn quad_bezier_1d(p0: f32, c: f32, p1: f32, t: f32) -> f32 {
    let omt = 1.0 - t;
    p0 * omt * omt + 2.0 * c * t * omt + p1 * t * t
}

#[inline(always)]
pub(crate) fn cubic_point(
    p0: (f32, f32),
    c0: (f32, f32),
    c1: (f32, f32),
    p1: (f32, f32),
    t: f32,
) -> (f32, f32) {
    (
        cubic_bezier_1d(p0.0, c0.0, c1.0, p1.0, t),
        cubic_bezier_1d(p0.1, c0.1, c1.1, p1.1, t),
    )
}

#[inline(always)]
pub(crate) fn quad_point(p0: (f32, f32), c: (f32, f32), p1: (f32, f32), t: f32) -> (f32, f32) {
    (quad_bezier_1d(p0.0, c.0, p1.0, t), quad_bezier_1d(p0.1, c.1, p1.1, t))
}

// ------------------------------------------------------------------------
// Endpoint-parameterized arcs
// ------------------------------------------------------------------------

/// Start and end sweep angles, in degrees, around an ellipse center.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ArcSweep {
    pub center: (f32, f32),
    pub start_angle: f32,
    pub end_angle: f32,
}

/// Centers of the two unit circles passing through both points.
///
/// `None` when the points coincide or lie more than a diameter apart.
fn find_unit_circles(p0: (f32, f32), p1: (f32, f32)) -> Option<((f32, f32), (f32, f32))> {
    let dx = p0.0 - p1.0;
    let dy = p0.1 - p1.1;
    let dsq = dx * dx + dy * dy;
    if dsq == 0.0 {
        return None;
    }
    let disc = 1.0 / dsq - 0.25;
    if disc < 0.0 || !disc.is_finite() {
        return None;
    }
    let xm = (p0.0 + p1.0) * 0.5;
    let ym = (p0.1 + p1.1) * 0.5;
    let s = disc.sqrt();
    let sdx = s * dx;
    let sdy = s * dy;
    Some(((xm + sdy, ym - sdx), (xm - sdy, ym + sdx)))
}

/// Candidate ellipse centers for an arc between two endpoints.
///
/// The endpoints are rotated by the arc's rotation angle and scaled by the
/// inverse radii into unit-circle space, intersected there, and the
/// candidates mapped back out. `None` when no ellipse with these radii can
/// pass through both endpoints.
pub(crate) fn find_ellipse_centers(
    rh: f32,
    rv: f32,
    rot_degrees: f32,
    p0: (f32, f32),
    p1: (f32, f32),
) -> Option<((f32, f32), (f32, f32))> {
    let rot = rot_degrees.to_radians();
    let (sin, cos) = rot.sin_cos();
    let u0 = ((p0.0 * cos + p0.1 * sin) / rh, (-p0.0 * sin + p0.1 * cos) / rv);
    let u1 = ((p1.0 * cos + p1.1 * sin) / rh, (-p1.0 * sin + p1.1 * cos) / rv);
    let (c0, c1) = find_unit_circles(u0, u1)?;
    let unmap = |c: (f32, f32)| {
        let x = c.0 * rh;
        let y = c.1 * rv;
        (x * cos - y * sin, x * sin + y * cos)
    };
    Some((unmap(c0), unmap(c1)))
}

/// Sweep angles for the arc from `start` to `end`.
///
/// The first candidate center is always used, the sweep direction comes
/// from the x component of the center-to-start unit vector, and the
/// large/small and CW/CCW opcode flags do not participate: all four arc
/// kinds sample identically.
pub(crate) fn arc_sweep(
    rh: f32,
    rv: f32,
    rot_degrees: f32,
    start: (f32, f32),
    end: (f32, f32),
) -> Option<ArcSweep> {
    let (center, _) = find_ellipse_centers(rh, rv, rot_degrees, start, end)?;
    let n0 = normalized((center.0 - start.0, center.1 - start.1));
    let n1 = normalized((center.0 - end.0, center.1 - end.1));
    let mut start_angle = (-n0.0).clamp(-1.0, 1.0).acos().to_degrees();
    let mut end_angle = (-n1.0).clamp(-1.0, 1.0).acos().to_degrees();
    if n0.0 >= 0.0 {
        start_angle = 360.0 - start_angle;
        end_angle = 360.0 - end_angle;
    }
    if start_angle > end_angle {
        std::mem::swap(&mut start_angle, &mut end_angle);
        start_angle -= 90.0;
        end_angle -= 90.0;
    }
    Some(ArcSweep { center, start_angle, end_angle })
}

/// Point at `angle_degrees` on the axis-aligned ellipse around `center`.
///
/// The rotation parameter participates in center finding only; the sweep
/// itself samples an axis-aligned ellipse.
#[inline(always)]
pub(crate) fn ellipse_point(center: (f32, f32), rh: f32, rv: f32, angle_degrees: f32) -> (f32, f32) {
    let a = angle_degrees.to_radians();
    (center.0 + rh * a.cos(), center.1 + rv * a.sin())
}

#[inline(always)]
fn normalized(v: (f32, f32)) -> (f32, f32) {
    let inv = 1.0 / (v.0 * v.0 + v.1 * v.1).sqrt();
    (v.0 * inv, v.1 * inv)
}
