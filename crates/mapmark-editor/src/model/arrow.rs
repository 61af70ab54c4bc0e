//! Arrow-specific derived handles.
//!
//! Besides its vertex list, an arrow exposes three scalar controls that are
//! not points in `points`:
//! - the head length handle, sitting `pointer_length` along the last
//!   segment from its preceding vertex;
//! - the head width handle, offset from the length handle along the
//!   segment normal;
//! - the tail width handle, controlling stroke width from the first segment.
//!
//! All three are derived from the unit vector of the relevant segment and
//! clamped to stay non-negative.

use mapmark_core::error::GeometryError;
use mapmark_core::geometry::Point;

use crate::shapes::{Shape, ShapeKind};
use crate::transform::{invert_point, transform_point};

/// Unit vector and length of the segment between two local points.
fn segment_direction(from: Point, to: Point) -> (f64, f64, f64) {
    let vx = to.x - from.x;
    let vy = to.y - from.y;
    let len = vx.hypot(vy);
    if len == 0.0 {
        (1.0, 0.0, 1.0)
    } else {
        (vx / len, vy / len, len)
    }
}

fn local_pair(points: &[f64], idx: usize) -> Point {
    Point::new(points[idx], points[idx + 1])
}

/// Local position of the length handle: `pointer_length` along the last
/// segment from its preceding vertex.
fn head_base_local(points: &[f64], pointer_length: f64) -> Option<Point> {
    if points.len() < 4 {
        return None;
    }
    let end = local_pair(points, points.len() - 2);
    let prev = local_pair(points, points.len() - 4);
    let (ux, uy, _) = segment_direction(prev, end);
    Some(Point::new(
        prev.x + ux * pointer_length,
        prev.y + uy * pointer_length,
    ))
}

/// World position of the head length handle.
pub fn length_handle(shape: &Shape) -> Option<Point> {
    let ShapeKind::Arrow {
        points,
        pointer_length,
        ..
    } = &shape.kind
    else {
        return None;
    };
    head_base_local(points, *pointer_length).map(|p| transform_point(p, &shape.affine))
}

/// World position of the head width handle.
pub fn width_handle(shape: &Shape) -> Option<Point> {
    let ShapeKind::Arrow {
        points,
        pointer_length,
        pointer_width,
    } = &shape.kind
    else {
        return None;
    };
    if points.len() < 4 {
        return None;
    }
    let end = local_pair(points, points.len() - 2);
    let prev = local_pair(points, points.len() - 4);
    let (ux, uy, _) = segment_direction(prev, end);
    let (nx, ny) = (-uy, ux);
    let base = head_base_local(points, *pointer_length)?;
    let local = Point::new(
        base.x + nx * (pointer_width / 2.0),
        base.y + ny * (pointer_width / 2.0),
    );
    Some(transform_point(local, &shape.affine))
}

/// World position of the tail (stroke-width) handle.
pub fn tail_width_handle(shape: &Shape) -> Option<Point> {
    let ShapeKind::Arrow { points, .. } = &shape.kind else {
        return None;
    };
    if points.len() < 4 {
        return None;
    }
    let start = local_pair(points, 0);
    let next = local_pair(points, 2);
    let (ux, uy, _) = segment_direction(start, next);
    let (nx, ny) = (-uy, ux);
    let half = shape.style.stroke_width / 2.0;
    let local = Point::new(start.x + nx * half, start.y + ny * half);
    Some(transform_point(local, &shape.affine))
}

/// Drags the head length handle: the dragged world position is projected
/// onto the last segment's direction from its preceding vertex, and the
/// result is clamped to `[0, segment length]`.
pub fn drag_length(shape: &mut Shape, world: Point) -> Result<(), GeometryError> {
    let local = invert_point(world, &shape.affine)?;
    let ShapeKind::Arrow {
        points,
        pointer_length,
        ..
    } = &mut shape.kind
    else {
        return Ok(());
    };
    if points.len() < 4 {
        return Ok(());
    }
    let end = local_pair(points, points.len() - 2);
    let prev = local_pair(points, points.len() - 4);
    let (ux, uy, seg_len) = segment_direction(prev, end);

    let dx = local.x - prev.x;
    let dy = local.y - prev.y;
    let projection = dx * ux + dy * uy;
    *pointer_length = projection.clamp(0.0, seg_len);
    Ok(())
}

/// Drags the head width handle: width is twice the distance from the head
/// base along the segment normal.
pub fn drag_width(shape: &mut Shape, world: Point) -> Result<(), GeometryError> {
    let local = invert_point(world, &shape.affine)?;
    let ShapeKind::Arrow {
        points,
        pointer_length,
        pointer_width,
    } = &mut shape.kind
    else {
        return Ok(());
    };
    if points.len() < 4 {
        return Ok(());
    }
    let end = local_pair(points, points.len() - 2);
    let prev = local_pair(points, points.len() - 4);
    let (ux, uy, _) = segment_direction(prev, end);
    let (nx, ny) = (-uy, ux);
    let base = Point::new(
        prev.x + ux * *pointer_length,
        prev.y + uy * *pointer_length,
    );

    let dx = local.x - base.x;
    let dy = local.y - base.y;
    let side = dx * nx + dy * ny;
    *pointer_width = (side.abs() * 2.0).max(0.0);
    Ok(())
}

/// Drags the tail width handle: stroke width is twice the distance from the
/// first vertex along the first segment's normal, floored at 1.
pub fn drag_tail_width(shape: &mut Shape, world: Point) -> Result<(), GeometryError> {
    let local = invert_point(world, &shape.affine)?;
    let ShapeKind::Arrow { points, .. } = &shape.kind else {
        return Ok(());
    };
    if points.len() < 4 {
        return Ok(());
    }
    let start = local_pair(points, 0);
    let next = local_pair(points, 2);
    let (ux, uy, _) = segment_direction(start, next);
    let (nx, ny) = (-uy, ux);

    let dx = local.x - start.x;
    let dy = local.y - start.y;
    let side = dx * nx + dy * ny;
    shape.style.stroke_width = (side.abs() * 2.0).max(1.0);
    Ok(())
}
