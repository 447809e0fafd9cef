//! Geometry builders: curve flattening, fill tessellation, stroking.
//!
//! Design rule: builders are pure functions over `(segments, coords)`
//! slices. They hold no state, so identical inputs always produce
//! identical buffers.

pub mod fill;
pub mod stroke;

pub(crate) mod flatten;
pub(crate) mod polygon;
pub(crate) mod walk;
