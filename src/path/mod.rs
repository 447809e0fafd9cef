//! Path segment store and cached geometry.
//!
//! Design rule: the store never interprets geometry on append. Opcodes and
//! arity are checked so a malformed batch is rejected atomically, but
//! stream-level meaning is only discovered when geometry is built.

pub mod segment;

use log::debug;

use crate::error::PathError;
use crate::paint::{Paint, PaintId};
use crate::tess::{fill, stroke};
use crate::types::{BoundingBox, DataKind, Matrix2D, WindingRule};

use segment::Segment;

/// A retained path: opcode and coordinate buffers plus cached fill and
/// stroke geometry with their dirty flags.
#[derive(Clone, Debug)]
pub struct Path {
    data_kind: DataKind,
    scale: f32,
    bias: f32,
    segments: Vec<u8>,
    coords: Vec<f32>,
    bounds: BoundingBox,
    fill_dirty: bool,
    stroke_dirty: bool,
    fill_paint: Option<PaintId>,
    stroke_paint: Option<PaintId>,
    fill_vertices: Vec<f32>,
    stroke_vertices: Vec<f32>,
}

impl Path {
    pub fn new(data_kind: DataKind, scale: f32, bias: f32) -> Result<Path, PathError> {
        Path::with_capacity(data_kind, scale, bias, 0, 0)
    }

    /// Like [`Path::new`] with segment and coordinate storage reserved up
    /// front.
    pub fn with_capacity(
        data_kind: DataKind,
        scale: f32,
        bias: f32,
        segment_hint: usize,
        coord_hint: usize,
    ) -> Result<Path, PathError> {
        if data_kind != DataKind::F32 {
            return Err(PathError::UnsupportedDataKind(data_kind));
        }
        Ok(Path {
            data_kind,
            scale,
            bias,
            segments: Vec::with_capacity(segment_hint),
            coords: Vec::with_capacity(coord_hint),
            bounds: BoundingBox::EMPTY,
            fill_dirty: true,
            stroke_dirty: true,
            fill_paint: None,
            stroke_paint: None,
            fill_vertices: Vec::new(),
            stroke_vertices: Vec::new(),
        })
    }

    pub fn data_kind(&self) -> DataKind {
        self.data_kind
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn bias(&self) -> f32 {
        self.bias
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn coord_count(&self) -> usize {
        self.coords.len()
    }

    pub fn segments(&self) -> &[u8] {
        &self.segments
    }

    pub fn coords(&self) -> &[f32] {
        &self.coords
    }

    /// Bounds of the most recent fill build. The empty sentinel (infinite
    /// minima, negative extent) until a build has run.
    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    pub fn is_fill_dirty(&self) -> bool {
        self.fill_dirty
    }

    pub fn is_stroke_dirty(&self) -> bool {
        self.stroke_dirty
    }

    /// Triangle-list fill vertices from the most recent fill build.
    pub fn fill_vertices(&self) -> &[f32] {
        &self.fill_vertices
    }

    /// Quad-list stroke vertices from the most recent stroke build.
    pub fn stroke_vertices(&self) -> &[f32] {
        &self.stroke_vertices
    }

    /// Append opcodes and their coordinates.
    ///
    /// Every opcode is decoded and the batch's total arity checked against
    /// the raw buffer first, so a malformed call leaves the store
    /// untouched. Surplus raw coordinates are ignored.
    pub fn append(&mut self, segments: &[u8], raw_coords: &[f32]) -> Result<(), PathError> {
        let mut needed = 0usize;
        for &opcode in segments {
            let seg = Segment::decode(opcode)?;
            needed += seg.kind.coord_count();
            if needed > raw_coords.len() {
                return Err(PathError::CoordinateUnderrun {
                    opcode,
                    needed,
                    available: raw_coords.len(),
                });
            }
        }
        self.segments.extend_from_slice(segments);
        self.coords.extend_from_slice(&raw_coords[..needed]);
        self.fill_dirty = true;
        self.stroke_dirty = true;
        Ok(())
    }

    /// Empty the store and reset the bounds to the empty sentinel. Cached
    /// geometry is marked stale, not freed.
    pub fn clear(&mut self) {
        self.segments.clear();
        self.coords.clear();
        self.bounds = BoundingBox::EMPTY;
        self.fill_dirty = true;
        self.stroke_dirty = true;
    }

    /// Replace this path's data with another path's.
    ///
    /// TODO: apply `transform` to the copied coordinates; they are carried
    /// over untransformed for now.
    pub fn copy_from(&mut self, src: &Path, transform: &Matrix2D) {
        if !transform.is_identity() {
            debug!("path copy does not apply the supplied transform yet");
        }
        self.segments.clear();
        self.segments.extend_from_slice(&src.segments);
        self.coords.clear();
        self.coords.extend_from_slice(&src.coords);
        self.fill_dirty = true;
        self.stroke_dirty = true;
    }

    /// Rebuild fill geometry when stale, returning whether a rebuild ran.
    ///
    /// Stale means the fill flag is set, `paint` differs in identity from
    /// the previous fill build, or `force` is set (batch recording rebuilds
    /// unconditionally). A failed rebuild leaves the flag set.
    pub fn build_fill_if_dirty(
        &mut self,
        paint: &Paint,
        rule: WindingRule,
        iterations: u32,
        force: bool,
    ) -> Result<bool, PathError> {
        if self.fill_paint != Some(paint.id()) {
            self.fill_paint = Some(paint.id());
            self.fill_dirty = true;
        }
        if !self.fill_dirty && !force {
            return Ok(false);
        }
        let built = fill::tessellate(&self.segments, &self.coords, rule, iterations)?;
        self.fill_vertices = built.vertices;
        self.bounds = built.bounds;
        self.fill_dirty = false;
        Ok(true)
    }

    /// Rebuild stroke geometry when stale, returning whether a rebuild ran.
    ///
    /// Same staleness contract as [`Path::build_fill_if_dirty`]. Note the
    /// stroke width is not tracked: callers changing width mark the stroke
    /// dirty themselves or pass `force`.
    pub fn build_stroke_if_dirty(
        &mut self,
        paint: &Paint,
        stroke_width: f32,
        iterations: u32,
        force: bool,
    ) -> Result<bool, PathError> {
        if self.stroke_paint != Some(paint.id()) {
            self.stroke_paint = Some(paint.id());
            self.stroke_dirty = true;
        }
        if !self.stroke_dirty && !force {
            return Ok(false);
        }
        self.stroke_vertices =
            stroke::build_stroke(&self.segments, &self.coords, stroke_width, iterations)?;
        self.stroke_dirty = false;
        Ok(true)
    }

    pub fn set_fill_dirty(&mut self, dirty: bool) {
        self.fill_dirty = dirty;
    }

    pub fn set_stroke_dirty(&mut self, dirty: bool) {
        self.stroke_dirty = dirty;
    }
}
