//! Transform-end normalization for radius-driven kinds.
//!
//! The transformer hands back raw scale factors. Radius-driven kinds
//! (circle, regular polygon, star, ring, wedge) must not keep a non-uniform
//! scale: the larger axis magnitude is taken as the true uniform scale and
//! absorbed into the radius scalar, the other axis keeps its ratio, and the
//! signs survive so mirroring is preserved. Sized kinds (rectangle, image,
//! video) absorb scale into width/height and recenter their pivot instead.

use serde::{Deserialize, Serialize};

use crate::shapes::{Shape, ShapeKind};
use crate::transform::Affine;

/// The placement attributes a transformer gesture leaves on the rendered
/// node: what transform-end copies back into the shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeTransform {
    pub x: f64,
    pub y: f64,
    /// Degrees.
    pub rotation: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub skew_x: f64,
    pub skew_y: f64,
}

impl NodeTransform {
    pub fn from_affine(affine: &Affine) -> Self {
        Self {
            x: affine.x,
            y: affine.y,
            rotation: affine.rotation,
            scale_x: affine.scale_x,
            scale_y: affine.scale_y,
            skew_x: affine.skew_x,
            skew_y: affine.skew_y,
        }
    }
}

/// Splits raw scale factors into (uniform magnitude, normalized scale_x,
/// normalized scale_y): the larger magnitude becomes the uniform scale, the
/// winning axis keeps only its sign, the other keeps the ratio.
pub fn split_uniform_scale(scale_x: f64, scale_y: f64) -> (f64, f64, f64) {
    let sign_x = if scale_x < 0.0 { -1.0 } else { 1.0 };
    let sign_y = if scale_y < 0.0 { -1.0 } else { 1.0 };
    let abs_x = scale_x * sign_x;
    let abs_y = scale_y * sign_y;

    if abs_x > abs_y {
        (abs_x, sign_x, (abs_y / abs_x) * sign_y)
    } else {
        (abs_y, (abs_x / abs_y) * sign_x, sign_y)
    }
}

/// Copies every node attribute back verbatim. Used by the vertex-based
/// kinds, whose geometry lives in `points` and tolerates any placement.
pub fn copy_node_transform(shape: &mut Shape, t: &NodeTransform) {
    shape.affine.x = t.x;
    shape.affine.y = t.y;
    shape.affine.rotation = t.rotation;
    shape.affine.scale_x = t.scale_x;
    shape.affine.scale_y = t.scale_y;
    shape.affine.skew_x = t.skew_x;
    shape.affine.skew_y = t.skew_y;
}

/// Applies the transform-end attribute rules for the shape's kind.
///
/// Radius-driven kinds absorb the larger scale magnitude into their radius
/// scalars (rounded, as the renderer works in whole pixels there); sized
/// kinds absorb per-axis scale into width/height and recenter the pivot;
/// everything else keeps the node attributes verbatim.
pub fn normalize_transform_end(shape: &mut Shape, t: &NodeTransform) {
    let (scale_abs, new_scale_x, new_scale_y) = split_uniform_scale(t.scale_x, t.scale_y);
    let sign_x = if t.scale_x < 0.0 { -1.0 } else { 1.0 };
    let sign_y = if t.scale_y < 0.0 { -1.0 } else { 1.0 };
    let abs_x = t.scale_x * sign_x;
    let abs_y = t.scale_y * sign_y;

    match &mut shape.kind {
        ShapeKind::Circle { radius }
        | ShapeKind::ConvexPolygon { radius, .. }
        | ShapeKind::Wedge { radius, .. } => {
            *radius = (*radius * scale_abs).round();
            shape.affine.scale_x = new_scale_x;
            shape.affine.scale_y = new_scale_y;
            shape.affine.x = t.x;
            shape.affine.y = t.y;
            shape.affine.rotation = t.rotation;
        }
        ShapeKind::Ring {
            inner_radius,
            outer_radius,
        }
        | ShapeKind::ConcavePolygon {
            inner_radius,
            outer_radius,
            ..
        } => {
            *inner_radius = (*inner_radius * scale_abs).round();
            *outer_radius = (*outer_radius * scale_abs).round();
            shape.affine.scale_x = new_scale_x;
            shape.affine.scale_y = new_scale_y;
            shape.affine.x = t.x;
            shape.affine.y = t.y;
            shape.affine.rotation = t.rotation;
        }
        ShapeKind::Ellipse { radius_x, radius_y } => {
            *radius_x = (*radius_x * abs_x).round();
            *radius_y = (*radius_y * abs_y).round();
            shape.affine.scale_x = sign_x;
            shape.affine.scale_y = sign_y;
            shape.affine.x = t.x;
            shape.affine.y = t.y;
            shape.affine.rotation = t.rotation;
        }
        ShapeKind::Rectangle { width, height, .. }
        | ShapeKind::Image { width, height, .. }
        | ShapeKind::Video { width, height, .. } => {
            *width = (*width * abs_x).round();
            *height = (*height * abs_y).round();
            shape.affine.offset_x = *width / 2.0;
            shape.affine.offset_y = *height / 2.0;
            shape.affine.scale_x = sign_x;
            shape.affine.scale_y = sign_y;
            shape.affine.x = t.x;
            shape.affine.y = t.y;
            shape.affine.rotation = t.rotation;
        }
        _ => copy_node_transform(shape, t),
    }
}
