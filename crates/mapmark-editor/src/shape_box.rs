//! Shape bounding-box model.
//!
//! A [`ShapeBox`] is the derived, world-space, axis-aligned description of a
//! shape (or group of shapes): left/right/top/bottom plus center. It is a
//! cache, recomputed after every geometry-affecting mutation, and is the
//! only input the guide-line engine reads.

use mapmark_core::geometry::Point;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::shapes::Shape;

/// Axis-aligned world-space bounds of a shape or group.
///
/// Invariants: `left <= right`, `top <= bottom`, centers are midpoints.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ShapeBox {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
    pub center_x: f64,
    pub center_y: f64,
}

impl ShapeBox {
    /// Builds a box from extents, computing the centers.
    pub fn from_extents(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
            center_x: (left + right) / 2.0,
            center_y: (top + bottom) / 2.0,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// The same box shifted by `(dx, dy)`.
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self {
            left: self.left + dx,
            right: self.right + dx,
            top: self.top + dy,
            bottom: self.bottom + dy,
            center_x: self.center_x + dx,
            center_y: self.center_y + dy,
        }
    }
}

/// Computes a shape's world-space box from its post-transform geometry.
///
/// The box is the axis-aligned bound of the shape's local bounds pushed
/// through its full placement, corner by corner, so rotation and skew are
/// accounted for. Returns `None` for shapes with no geometry yet.
pub fn create_shape_box(shape: &Shape) -> Option<ShapeBox> {
    let local = shape.local_bounds()?;
    let matrix = shape.affine.matrix();

    let corners: SmallVec<[Point; 4]> = local
        .corners()
        .iter()
        .map(|c| matrix.transform_point(*c))
        .collect();

    let mut min_x = f64::MAX;
    let mut min_y = f64::MAX;
    let mut max_x = f64::MIN;
    let mut max_y = f64::MIN;
    for c in &corners {
        min_x = min_x.min(c.x);
        min_y = min_y.min(c.y);
        max_x = max_x.max(c.x);
        max_y = max_y.max(c.y);
    }

    Some(ShapeBox::from_extents(min_x, min_y, max_x, max_y))
}

/// Union box of a group of shapes, from their cached boxes.
///
/// Centers are recomputed from the union, not averaged from members.
/// Returns `None` for an empty group or when any member has no cached box;
/// callers must guard rather than expect a value.
pub fn group_shape_box<'a>(shapes: impl IntoIterator<Item = &'a Shape>) -> Option<ShapeBox> {
    let mut iter = shapes.into_iter();
    let mut result = iter.next()?.box_cache?;

    for shape in iter {
        let member = shape.box_cache?;
        if member.left < result.left {
            result.left = member.left;
        }
        if member.right > result.right {
            result.right = member.right;
        }
        if member.top < result.top {
            result.top = member.top;
        }
        if member.bottom > result.bottom {
            result.bottom = member.bottom;
        }
    }

    result.center_x = (result.left + result.right) / 2.0;
    result.center_y = (result.top + result.bottom) / 2.0;
    Some(result)
}
