//! vgcore
//!
//! OpenVG-style path geometry: declarative move/line/curve/arc streams in,
//! GPU-consumable triangle and quad buffers out, with winding-rule-aware
//! fill tessellation, constant-width stroking, and per-path dirty caching.
//!
//! Design rule: keep this file thin.

pub mod backend;
pub mod error;
pub mod paint;
pub mod path;
pub mod tess;
pub mod types;

mod util;

pub use error::PathError;
pub use paint::{Paint, PaintId};
pub use path::segment::{Segment, SegmentKind};
pub use path::Path;
pub use tess::fill::{tessellate, FillGeometry};
pub use tess::stroke::build_stroke;
pub use types::{BoundingBox, DataKind, Matrix2D, WindingRule};
pub use util::config::{core_config, default_iterations, CoreConfig, DEFAULT_ITERATIONS};
pub use util::logging::init_logger;
