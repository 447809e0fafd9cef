//! Paint state: a stable identity plus a solid color.
//!
//! The geometry core only needs paint identity to decide when cached
//! geometry must be rebuilt; gradient and pattern evaluation belong to the
//! embedding renderer.

use std::sync::atomic::{AtomicU32, Ordering};

static NEXT_PAINT_ID: AtomicU32 = AtomicU32::new(1);

/// Identity token, unique per created paint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PaintId(u32);

/// Solid-color paint.
#[derive(Clone, Debug)]
pub struct Paint {
    id: PaintId,
    color: [f32; 4],
}

impl Paint {
    /// RGBA components in `0.0..=1.0`.
    pub fn new(color: [f32; 4]) -> Paint {
        let id = PaintId(NEXT_PAINT_ID.fetch_add(1, Ordering::Relaxed));
        Paint { id, color }
    }

    pub fn id(&self) -> PaintId {
        self.id
    }

    pub fn color(&self) -> [f32; 4] {
        self.color
    }

    /// Recoloring keeps the identity; geometry cached against this paint
    /// stays valid.
    pub fn set_color(&mut self, color: [f32; 4]) {
        self.color = color;
    }
}

impl Default for Paint {
    /// Opaque black.
    fn default() -> Paint {
        Paint::new([0.0, 0.0, 0.0, 1.0])
    }
}
