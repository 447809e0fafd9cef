//! End-to-end pipeline: path data in, staged backend draws out.

use vgcore::backend::gl::GlBackend;
use vgcore::backend::gles::GlesBackend;
use vgcore::backend::vulkan::VulkanBackend;
use vgcore::backend::{RenderBackend, StrokePrimitive};
use vgcore::{
    build_stroke, tessellate, DataKind, Paint, Path, PathError, Segment, SegmentKind,
    WindingRule, DEFAULT_ITERATIONS,
};

fn op(kind: SegmentKind) -> u8 {
    Segment::abs(kind).encode()
}

fn rect_path() -> Path {
    let mut path = Path::new(DataKind::F32, 1.0, 0.0).unwrap();
    path.append(
        &[
            op(SegmentKind::MoveTo),
            op(SegmentKind::LineTo),
            op(SegmentKind::LineTo),
            op(SegmentKind::LineTo),
            op(SegmentKind::ClosePath),
        ],
        &[0.0, 0.0, 10.0, 0.0, 10.0, 10.0, 0.0, 10.0],
    )
    .unwrap();
    path
}

#[test]
fn fill_and_stroke_reach_every_backend() {
    vgcore::init_logger();

    let mut path = rect_path();
    let fill_paint = Paint::new([1.0, 0.0, 0.0, 1.0]);
    let stroke_paint = Paint::new([0.0, 0.0, 0.0, 1.0]);

    path.build_fill_if_dirty(&fill_paint, WindingRule::NonZero, DEFAULT_ITERATIONS, false)
        .unwrap();
    path.build_stroke_if_dirty(&stroke_paint, 2.0, DEFAULT_ITERATIONS, false).unwrap();

    // A rectangle fans into two triangles and strokes into four quads:
    // three explicit sides plus the closing segment back to the anchor.
    assert_eq!(path.fill_vertices().len(), 12);
    assert_eq!(path.stroke_vertices().len(), 4 * 8);

    let mut gl = GlBackend::new();
    let mut gles = GlesBackend::new();
    let mut vulkan = VulkanBackend::new();

    for backend in [&mut gl as &mut dyn RenderBackend, &mut gles, &mut vulkan] {
        backend.begin_frame();
        backend.submit_fill(path.fill_vertices(), &path.bounds(), &fill_paint);
        backend.submit_stroke(path.stroke_vertices(), &stroke_paint);
        backend.end_frame();
    }

    // Quad strips pass through legacy GL untouched.
    assert_eq!(gl.stroke_primitive(), StrokePrimitive::QuadStrip);
    assert_eq!(gl.strokes()[0].vertices.len(), 4 * 8);

    // ES and Vulkan get two triangles per quad.
    for (primitive, len) in [
        (gles.stroke_primitive(), gles.strokes()[0].vertices.len()),
        (vulkan.stroke_primitive(), vulkan.strokes()[0].vertices.len()),
    ] {
        assert_eq!(primitive, StrokePrimitive::TriangleList);
        assert_eq!(len, 4 * 12);
    }

    // Fills are identical triangle lists everywhere, tagged with bounds.
    for staged in [&gl.fills()[0], &gles.fills()[0], &vulkan.fills()[0]] {
        assert_eq!(staged.vertices, path.fill_vertices());
        assert_eq!(staged.color, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(staged.bounds.unwrap().to_array(), [0.0, 0.0, 10.0, 10.0]);
    }
}

#[test]
fn open_polyline_strokes_one_quad_per_segment() {
    let mut path = Path::new(DataKind::F32, 1.0, 0.0).unwrap();
    path.append(
        &[
            op(SegmentKind::MoveTo),
            op(SegmentKind::LineTo),
            op(SegmentKind::LineTo),
            op(SegmentKind::LineTo),
        ],
        &[0.0, 0.0, 4.0, 0.0, 4.0, 4.0, 0.0, 4.0],
    )
    .unwrap();
    let paint = Paint::default();
    path.build_stroke_if_dirty(&paint, 1.0, 16, false).unwrap();
    assert_eq!(path.stroke_vertices().len(), 3 * 8);
}

#[test]
fn donut_hole_survives_the_full_pipeline() {
    let mut path = Path::new(DataKind::F32, 1.0, 0.0).unwrap();
    let square = [
        op(SegmentKind::MoveTo),
        op(SegmentKind::LineTo),
        op(SegmentKind::LineTo),
        op(SegmentKind::LineTo),
        op(SegmentKind::ClosePath),
    ];
    path.append(&square, &[0.0, 0.0, 10.0, 0.0, 10.0, 10.0, 0.0, 10.0]).unwrap();
    path.append(&square, &[2.0, 2.0, 2.0, 8.0, 8.0, 8.0, 8.0, 2.0]).unwrap();

    let paint = Paint::default();
    path.build_fill_if_dirty(&paint, WindingRule::EvenOdd, 16, false).unwrap();

    let area: f32 = path
        .fill_vertices()
        .chunks_exact(6)
        .map(|t| 0.5 * ((t[2] - t[0]) * (t[5] - t[1]) - (t[4] - t[0]) * (t[3] - t[1])).abs())
        .sum();
    assert!((area - 64.0).abs() < 1e-3, "area {}", area);
}

#[test]
fn overlapping_subpaths_cancel_under_even_odd() {
    let mut path = Path::new(DataKind::F32, 1.0, 0.0).unwrap();
    let square = [
        op(SegmentKind::MoveTo),
        op(SegmentKind::LineTo),
        op(SegmentKind::LineTo),
        op(SegmentKind::LineTo),
        op(SegmentKind::ClosePath),
    ];
    path.append(&square, &[0.0, 0.0, 10.0, 0.0, 10.0, 10.0, 0.0, 10.0]).unwrap();
    path.append(&square, &[4.0, 4.0, 14.0, 4.0, 14.0, 14.0, 4.0, 14.0]).unwrap();

    let paint = Paint::default();
    path.build_fill_if_dirty(&paint, WindingRule::EvenOdd, 16, false).unwrap();

    let area: f32 = path
        .fill_vertices()
        .chunks_exact(6)
        .map(|t| 0.5 * ((t[2] - t[0]) * (t[5] - t[1]) - (t[4] - t[0]) * (t[3] - t[1])).abs())
        .sum();
    // Each square minus the shared 6x6 overlap.
    assert!((area - 128.0).abs() < 1e-3, "area {}", area);
    assert_eq!(path.bounds().to_array(), [0.0, 0.0, 14.0, 14.0]);
}

#[test]
fn arc_opcode_flags_do_not_change_geometry() {
    let kinds = [
        SegmentKind::SmallCcwArcTo,
        SegmentKind::SmallCwArcTo,
        SegmentKind::LargeCcwArcTo,
        SegmentKind::LargeCwArcTo,
    ];
    let coords = [0.0, 0.0, 3.0, 3.0, 0.0, 4.0, 2.0];
    let meshes: Vec<Vec<f32>> = kinds
        .iter()
        .map(|kind| {
            let segs = [
                op(SegmentKind::MoveTo),
                op(*kind),
                op(SegmentKind::LineTo),
                op(SegmentKind::ClosePath),
            ];
            let mut full = coords.to_vec();
            full.extend_from_slice(&[4.0, -2.0]);
            tessellate(&segs, &full, WindingRule::NonZero, 16).unwrap().vertices
        })
        .collect();
    assert!(!meshes[0].is_empty());
    for mesh in &meshes[1..] {
        assert_eq!(*mesh, meshes[0]);
    }
}

#[test]
fn degenerate_arc_is_not_an_error() {
    let segs = [op(SegmentKind::MoveTo), op(SegmentKind::SmallCwArcTo)];
    let coords = [0.0, 0.0, 1.0, 1.0, 0.0, 10.0, 0.0];
    let geom = tessellate(&segs, &coords, WindingRule::NonZero, 16).unwrap();
    assert!(geom.vertices.is_empty());
    let quads = build_stroke(&segs, &coords, 2.0, 16).unwrap();
    assert!(quads.is_empty());
}

#[test]
fn malformed_streams_error_before_geometry() {
    let mut path = Path::new(DataKind::F32, 1.0, 0.0).unwrap();
    assert_eq!(path.append(&[0xfe], &[]).unwrap_err(), PathError::UnknownOpcode(0xfe));

    // A stream can also go bad at build time if assembled from valid
    // opcodes but starved of coordinates downstream.
    let err = tessellate(&[op(SegmentKind::QuadTo)], &[1.0], WindingRule::NonZero, 16)
        .unwrap_err();
    assert!(matches!(err, PathError::CoordinateUnderrun { needed: 4, available: 1, .. }));
}

#[test]
fn rebuilds_only_when_state_demands_it() {
    let mut path = rect_path();
    let red = Paint::new([1.0, 0.0, 0.0, 1.0]);
    let blue = Paint::new([0.0, 0.0, 1.0, 1.0]);

    assert!(path.build_fill_if_dirty(&red, WindingRule::NonZero, 16, false).unwrap());
    assert!(!path.build_fill_if_dirty(&red, WindingRule::NonZero, 16, false).unwrap());
    // Different paint identity.
    assert!(path.build_fill_if_dirty(&blue, WindingRule::NonZero, 16, false).unwrap());
    // Batch recording forces it.
    assert!(path.build_fill_if_dirty(&blue, WindingRule::NonZero, 16, true).unwrap());
    // Data edits invalidate both caches.
    path.append(&[op(SegmentKind::LineTo)], &[-5.0, -5.0]).unwrap();
    assert!(path.is_fill_dirty());
    assert!(path.is_stroke_dirty());
}

#[test]
fn configured_defaults_are_sane() {
    assert_eq!(DEFAULT_ITERATIONS, 16);
    assert!(vgcore::default_iterations() >= 1);
    let cfg = vgcore::core_config();
    assert!(cfg.tess_iterations >= 1);
}
