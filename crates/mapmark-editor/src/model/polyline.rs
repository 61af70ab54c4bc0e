//! Polyline rules.
//!
//! A polyline carries an arbitrary vertex count with a hard floor of two
//! vertices (four coordinates). Every segment exposes a midpoint handle for
//! insertion, and vertices can be removed by double-click while the floor
//! holds. Anchors are draggable only while the shape is selected.

use crate::shapes::Shape;

/// Minimum coordinate count that must always remain.
pub const MIN_POINT_LEN: usize = 4;

/// Whether a vertex may currently be deleted from this shape.
pub fn can_delete_vertex(shape: &Shape) -> bool {
    shape.supports_midpoints()
        && shape.points().map(|p| p.len() > MIN_POINT_LEN).unwrap_or(false)
}

/// Whether a midpoint may be promoted into a real vertex.
pub fn can_insert_vertex(shape: &Shape) -> bool {
    shape.supports_midpoints()
        && shape.points().map(|p| p.len() >= MIN_POINT_LEN).unwrap_or(false)
}
