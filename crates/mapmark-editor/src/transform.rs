//! Affine transform utilities.
//!
//! Every shape carries a full [`Affine`] attribute set. A point in the
//! shape's local space reaches world space through the fixed composition
//! order: offset-subtract, scale, skew, rotate, translate. World-to-local
//! inverts the same chain in exact reverse order, so
//! `invert_point(transform_point(p)) == p` to floating-point tolerance for
//! any non-degenerate scale.
//!
//! [`Matrix`] is the composable 2x3 form of the same transform, used for
//! batch point work: baking a free-drawing's transform into its strokes and
//! decomposing the image-crop matrix stack.

use mapmark_core::error::{ensure_even, GeometryError};
use mapmark_core::geometry::Point;
use serde::{Deserialize, Serialize};

/// Scales smaller than this are treated as degenerate for inversion.
const SCALE_EPSILON: f64 = 1e-12;

/// A shape's placement attributes: translation, scale, skew, rotation
/// (degrees), and the pivot offset subtracted before rotation and scale
/// apply (e.g. width/2, height/2 for centered shapes).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Affine {
    pub x: f64,
    pub y: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub skew_x: f64,
    pub skew_y: f64,
    /// Rotation in degrees, clockwise in screen coordinates.
    pub rotation: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for Affine {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            skew_x: 0.0,
            skew_y: 0.0,
            rotation: 0.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

impl Affine {
    /// Placement at `(x, y)` with identity scale/skew/rotation.
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }

    /// True when either scale factor is too small to invert.
    pub fn is_degenerate(&self) -> bool {
        self.scale_x.abs() < SCALE_EPSILON || self.scale_y.abs() < SCALE_EPSILON
    }

    /// Builds the equivalent composable matrix:
    /// `translate(x, y) * rotate * skew * scale * translate(-offset)`.
    pub fn matrix(&self) -> Matrix {
        let mut m = Matrix::identity();
        m.translate(self.x, self.y);
        if self.rotation != 0.0 {
            m.rotate(self.rotation.to_radians());
        }
        if self.skew_x != 0.0 || self.skew_y != 0.0 {
            m.skew(self.skew_x, self.skew_y);
        }
        if self.scale_x != 1.0 || self.scale_y != 1.0 {
            m.scale(self.scale_x, self.scale_y);
        }
        if self.offset_x != 0.0 || self.offset_y != 0.0 {
            m.translate(-self.offset_x, -self.offset_y);
        }
        m
    }

    /// Resets placement to identity: `x = y = rotation = skew = 0`,
    /// `scale = 1`. Offsets are preserved. Used after baking a transform
    /// into point data so that visually nothing moves.
    pub fn reset(&mut self) {
        self.x = 0.0;
        self.y = 0.0;
        self.rotation = 0.0;
        self.skew_x = 0.0;
        self.skew_y = 0.0;
        self.scale_x = 1.0;
        self.scale_y = 1.0;
    }
}

/// Maps a local-space point to world space through `affine`.
pub fn transform_point(local: Point, affine: &Affine) -> Point {
    // Offset-subtract, then scale.
    let x = (local.x - affine.offset_x) * affine.scale_x;
    let y = (local.y - affine.offset_y) * affine.scale_y;

    // Skew maps (x, y) to (x + kx*y, y + ky*x); both terms read the
    // pre-skew values.
    let sx = x + affine.skew_x * y;
    let sy = y + affine.skew_y * x;

    let r = affine.rotation.to_radians();
    let (sin, cos) = r.sin_cos();
    let rx = sx * cos - sy * sin;
    let ry = sx * sin + sy * cos;

    Point::new(rx + affine.x, ry + affine.y)
}

/// Maps a world-space point back to local space, inverting the composition
/// in exact reverse order: translate, rotate, skew, scale, offset-add.
///
/// A zero scale factor makes the inversion undefined and is rejected as a
/// [`GeometryError::DegenerateScale`] rather than silently dividing.
pub fn invert_point(world: Point, affine: &Affine) -> Result<Point, GeometryError> {
    if affine.is_degenerate() {
        return Err(GeometryError::DegenerateScale {
            scale_x: affine.scale_x,
            scale_y: affine.scale_y,
        });
    }

    let x = world.x - affine.x;
    let y = world.y - affine.y;

    let r = -affine.rotation.to_radians();
    let (sin, cos) = r.sin_cos();
    let rx = x * cos - y * sin;
    let ry = x * sin + y * cos;

    // Inverse of the skew matrix [[1, kx], [ky, 1]].
    let det = 1.0 - affine.skew_x * affine.skew_y;
    if det.abs() < SCALE_EPSILON {
        return Err(GeometryError::SingularMatrix { determinant: det });
    }
    let sx = (rx - affine.skew_x * ry) / det;
    let sy = (ry - affine.skew_y * rx) / det;

    Ok(Point::new(
        sx / affine.scale_x + affine.offset_x,
        sy / affine.scale_y + affine.offset_y,
    ))
}

/// A 2x3 affine matrix in `[a, b, c, d, e, f]` layout:
/// `x' = a*x + c*y + e`, `y' = b*x + d*y + f`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    m: [f64; 6],
}

impl Default for Matrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl Matrix {
    pub fn identity() -> Self {
        Self {
            m: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
        }
    }

    pub fn from_parts(m: [f64; 6]) -> Self {
        Self { m }
    }

    pub fn parts(&self) -> [f64; 6] {
        self.m
    }

    pub fn translate(&mut self, dx: f64, dy: f64) -> &mut Self {
        self.m[4] += self.m[0] * dx + self.m[2] * dy;
        self.m[5] += self.m[1] * dx + self.m[3] * dy;
        self
    }

    pub fn rotate(&mut self, rad: f64) -> &mut Self {
        let (sin, cos) = rad.sin_cos();
        let m11 = self.m[0] * cos + self.m[2] * sin;
        let m12 = self.m[1] * cos + self.m[3] * sin;
        let m21 = self.m[0] * -sin + self.m[2] * cos;
        let m22 = self.m[1] * -sin + self.m[3] * cos;
        self.m[0] = m11;
        self.m[1] = m12;
        self.m[2] = m21;
        self.m[3] = m22;
        self
    }

    pub fn scale(&mut self, sx: f64, sy: f64) -> &mut Self {
        self.m[0] *= sx;
        self.m[1] *= sx;
        self.m[2] *= sy;
        self.m[3] *= sy;
        self
    }

    pub fn skew(&mut self, kx: f64, ky: f64) -> &mut Self {
        let m11 = self.m[0] + self.m[2] * ky;
        let m12 = self.m[1] + self.m[3] * ky;
        let m21 = self.m[0] * kx + self.m[2];
        let m22 = self.m[1] * kx + self.m[3];
        self.m[0] = m11;
        self.m[1] = m12;
        self.m[2] = m21;
        self.m[3] = m22;
        self
    }

    /// Post-multiplies by `other`: `self = self * other`.
    pub fn multiply(&mut self, other: &Matrix) -> &mut Self {
        let [a1, b1, c1, d1, e1, f1] = self.m;
        let [a2, b2, c2, d2, e2, f2] = other.m;
        self.m = [
            a1 * a2 + c1 * b2,
            b1 * a2 + d1 * b2,
            a1 * c2 + c1 * d2,
            b1 * c2 + d1 * d2,
            a1 * e2 + c1 * f2 + e1,
            b1 * e2 + d1 * f2 + f1,
        ];
        self
    }

    pub fn determinant(&self) -> f64 {
        self.m[0] * self.m[3] - self.m[1] * self.m[2]
    }

    /// Returns the inverse matrix, or an error if this one is singular.
    pub fn inverted(&self) -> Result<Matrix, GeometryError> {
        let det = self.determinant();
        if det.abs() < SCALE_EPSILON {
            return Err(GeometryError::SingularMatrix { determinant: det });
        }
        let [a, b, c, d, e, f] = self.m;
        let inv = 1.0 / det;
        Ok(Matrix {
            m: [
                d * inv,
                -b * inv,
                -c * inv,
                a * inv,
                (c * f - d * e) * inv,
                (b * e - a * f) * inv,
            ],
        })
    }

    pub fn transform_point(&self, p: Point) -> Point {
        Point::new(
            self.m[0] * p.x + self.m[2] * p.y + self.m[4],
            self.m[1] * p.x + self.m[3] * p.y + self.m[5],
        )
    }

    /// Decomposes into translation, rotation, scale, and skew, matching the
    /// renderer's node-attribute semantics (rotation in degrees, offsets
    /// zero). The crop-rectangle math feeds matrix products through this to
    /// obtain node attributes the renderer accepts.
    pub fn decompose(&self) -> Result<Affine, GeometryError> {
        let [a, b, c, d, e, f] = self.m;
        let delta = a * d - b * c;
        if delta.abs() < SCALE_EPSILON {
            return Err(GeometryError::SingularMatrix { determinant: delta });
        }

        let mut out = Affine {
            x: e,
            y: f,
            ..Affine::default()
        };

        if a != 0.0 || b != 0.0 {
            let r = a.hypot(b);
            out.rotation = if b > 0.0 {
                (a / r).acos().to_degrees()
            } else {
                -(a / r).acos().to_degrees()
            };
            out.scale_x = r;
            out.scale_y = delta / r;
            out.skew_x = (a * c + b * d) / delta;
            out.skew_y = 0.0;
        } else {
            // c != 0 || d != 0 given the determinant check above.
            let s = c.hypot(d);
            out.rotation = 90.0
                - if d > 0.0 {
                    (-c / s).acos().to_degrees()
                } else {
                    -(c / s).acos().to_degrees()
                };
            out.scale_x = delta / s;
            out.scale_y = s;
            out.skew_x = 0.0;
            out.skew_y = (a * c + b * d) / delta;
        }

        Ok(out)
    }
}

/// Applies `matrix` to a flat `[x0, y0, x1, y1, ...]` coordinate list in
/// place. Used when baking a shape's transform into its own point data.
pub fn bake_points(points: &mut [f64], matrix: &Matrix) -> Result<(), GeometryError> {
    ensure_even(points)?;
    for pair in points.chunks_exact_mut(2) {
        let p = matrix.transform_point(Point::new(pair[0], pair[1]));
        pair[0] = p.x;
        pair[1] = p.y;
    }
    Ok(())
}
