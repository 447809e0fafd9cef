//! Shared geometry types used by the path store, the geometry builders, and
//! the backend seam.

/// Polygon fill classification for self-overlapping shapes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindingRule {
    NonZero,
    EvenOdd,
}

/// Coordinate encodings a path can be created with.
///
/// Only `F32` is implemented. The integer kinds exist so callers get a clear
/// error at construction instead of silently misreading their data; their
/// decode would apply the path's scale/bias pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataKind {
    S8,
    S16,
    S32,
    F32,
}

/// Axis-aligned bounds accumulated over emitted vertices.
///
/// Kept as min/max corners; the published form is `(min_x, min_y, width,
/// height)`. The empty sentinel is min=+INF / max=-INF, which reads back
/// with negative width and height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl BoundingBox {
    pub const EMPTY: BoundingBox = BoundingBox {
        min_x: f32::INFINITY,
        min_y: f32::INFINITY,
        max_x: f32::NEG_INFINITY,
        max_y: f32::NEG_INFINITY,
    };

    pub fn expand(&mut self, x: f32, y: f32) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    pub fn is_empty(&self) -> bool {
        self.max_x < self.min_x || self.max_y < self.min_y
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    /// `(min_x, min_y, width, height)`, the layout backends consume.
    pub fn to_array(&self) -> [f32; 4] {
        [self.min_x, self.min_y, self.width(), self.height()]
    }
}

impl Default for BoundingBox {
    /// Zero box, the published bounds of an empty build.
    fn default() -> Self {
        BoundingBox { min_x: 0.0, min_y: 0.0, max_x: 0.0, max_y: 0.0 }
    }
}

/// Row-major affine transform: `(a c tx; b d ty)`.
#[derive(Clone, Copy, Debug)]
pub struct Matrix2D {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub tx: f32,
    pub ty: f32,
}

impl Matrix2D {
    pub fn identity() -> Self {
        Matrix2D { a: 1.0, b: 0.0, c: 0.0, d: 1.0, tx: 0.0, ty: 0.0 }
    }

    pub fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        (self.a * x + self.c * y + self.tx, self.b * x + self.d * y + self.ty)
    }

    pub fn is_identity(&self) -> bool {
        approx_eq_f32(self.a, 1.0)
            && approx_eq_f32(self.d, 1.0)
            && approx_eq_f32(self.b, 0.0)
            && approx_eq_f32(self.c, 0.0)
            && approx_eq_f32(self.tx, 0.0)
            && approx_eq_f32(self.ty, 0.0)
    }
}

impl Default for Matrix2D {
    fn default() -> Self {
        Matrix2D::identity()
    }
}

fn approx_eq_f32(a: f32, b: f32) -> bool {
    (a - b).abs() <= 0.0001
}
