//! Quadratic and bezier curve rules.
//!
//! Both curve kinds ride the same four-pair cubic rendering pipeline and are
//! fixed-arity: no vertex insertion or deletion is ever permitted.
//!
//! The quadratic curve has three logical vertices but stores its middle
//! control point twice (indices 2-3 and 4-5), so a quadratic is just a
//! cubic with zero curvature difference. Any write to the middle handle must
//! hit both copies; the duplication is a load-bearing invariant, not
//! redundant data.

use mapmark_core::error::GeometryError;
use mapmark_core::geometry::Point;

use crate::shapes::{Shape, ShapeKind, CURVE_POINT_LEN};

/// Vertex handle indices exposed for a curve kind.
///
/// The bezier exposes all four pairs; the quadratic exposes start, the
/// second copy of the middle point, and end.
pub fn handle_indices(shape: &Shape) -> &'static [usize] {
    match shape.kind {
        ShapeKind::BezierCurve { .. } => &[0, 2, 4, 6],
        ShapeKind::QuadraticCurve { .. } => &[0, 4, 6],
        _ => &[],
    }
}

/// Writes a local-space position into a curve vertex, maintaining the
/// quadratic middle-point duplication.
///
/// Returns `false` (no mutation) for indices that do not address a handle,
/// which covers stale handle references.
pub fn set_vertex_local(
    shape: &mut Shape,
    idx: usize,
    local: Point,
) -> Result<bool, GeometryError> {
    shape.validate_points()?;
    let is_quadratic = matches!(shape.kind, ShapeKind::QuadraticCurve { .. });
    let Some(points) = shape.points_mut() else {
        return Ok(false);
    };
    if idx + 1 >= points.len() || idx % 2 != 0 {
        return Ok(false);
    }

    if is_quadratic && (idx == 2 || idx == 4) {
        points[2] = local.x;
        points[3] = local.y;
        points[4] = local.x;
        points[5] = local.y;
    } else {
        points[idx] = local.x;
        points[idx + 1] = local.y;
    }
    Ok(true)
}

/// Point list for the dashed construction line drawn while a curve is being
/// edited: the straight polyline through the logical vertices.
pub fn construction_line(shape: &Shape) -> Option<Vec<f64>> {
    let points = shape.points()?;
    if points.len() != CURVE_POINT_LEN {
        return None;
    }
    match shape.kind {
        ShapeKind::BezierCurve { .. } => Some(points.to_vec()),
        ShapeKind::QuadraticCurve { .. } => Some(vec![
            points[0], points[1], points[4], points[5], points[6], points[7],
        ]),
        _ => None,
    }
}
