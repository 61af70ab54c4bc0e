//! Control-point editing protocol.
//!
//! Every vertex-based shape exposes an ordered set of draggable handles:
//! real vertices, segment midpoints (insertion points), and the arrow's
//! derived size controls. Handles are addressed by an explicit
//! [`HandleRole`] rather than re-parsed strings; the string node-id format
//! survives only at the renderer boundary through `Display`/`FromStr`.
//!
//! Handle drags mutate shape-local geometry: the dragged world position is
//! inverted through the shape's placement and written back into `points`.
//! Malformed or out-of-range handle references are no-ops (they arise from
//! stale handles during rapid add/remove cycles); malformed point lists are
//! contract violations and fail fast.

use std::fmt;
use std::str::FromStr;

use mapmark_core::error::GeometryError;
use mapmark_core::geometry::Point;
use smallvec::SmallVec;
use uuid::Uuid;

use crate::model::{arrow, curve};
use crate::shapes::{Shape, ShapeId, ShapeKind};
use crate::transform::{invert_point, transform_point};

/// What a handle controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleRole {
    /// A real vertex: the even index of its x coordinate in `points`.
    Vertex(usize),
    /// The insertion midpoint of the segment starting at this even index.
    Midpoint(usize),
    /// The arrowhead length control.
    PointerLength,
    /// The arrowhead width control.
    PointerWidth,
    /// The tail stroke-width control.
    TailWidth,
}

/// A handle's full identity: owning shape plus role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandleId {
    pub shape: ShapeId,
    pub role: HandleRole,
}

impl HandleId {
    pub fn new(shape: ShapeId, role: HandleRole) -> Self {
        Self { shape, role }
    }
}

impl fmt::Display for HandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.role {
            HandleRole::Vertex(idx) => write!(f, "{}-{}", self.shape, idx),
            HandleRole::Midpoint(idx) => write!(f, "{}-mid-{}", self.shape, idx),
            HandleRole::PointerLength => write!(f, "{}-len", self.shape),
            HandleRole::PointerWidth => write!(f, "{}-wid", self.shape),
            HandleRole::TailWidth => write!(f, "{}-twid", self.shape),
        }
    }
}

/// Failure to parse a renderer node id back into a handle identity.
///
/// Callers treat this as a stale handle and ignore the event.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("not a handle id: {0}")]
pub struct InvalidHandleId(pub String);

impl FromStr for HandleId {
    type Err = InvalidHandleId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidHandleId(s.to_string());
        let parse_shape = |base: &str| Uuid::parse_str(base).map_err(|_| invalid());

        // "-twid" must be checked before "-wid".
        if let Some(base) = s.strip_suffix("-twid") {
            return Ok(HandleId::new(parse_shape(base)?, HandleRole::TailWidth));
        }
        if let Some(base) = s.strip_suffix("-len") {
            return Ok(HandleId::new(parse_shape(base)?, HandleRole::PointerLength));
        }
        if let Some(base) = s.strip_suffix("-wid") {
            return Ok(HandleId::new(parse_shape(base)?, HandleRole::PointerWidth));
        }
        if let Some(pos) = s.rfind("-mid-") {
            let idx = s[pos + 5..].parse::<usize>().map_err(|_| invalid())?;
            return Ok(HandleId::new(
                parse_shape(&s[..pos])?,
                HandleRole::Midpoint(idx),
            ));
        }
        let pos = s.rfind('-').ok_or_else(invalid)?;
        let idx = s[pos + 1..].parse::<usize>().map_err(|_| invalid())?;
        Ok(HandleId::new(parse_shape(&s[..pos])?, HandleRole::Vertex(idx)))
    }
}

/// A renderable handle: identity plus current world position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    pub id: HandleId,
    pub position: Point,
    pub visible: bool,
}

fn local_pair(points: &[f64], idx: usize) -> Point {
    Point::new(points[idx], points[idx + 1])
}

/// Vertex handle indices exposed by the shape's kind.
fn vertex_indices(shape: &Shape) -> SmallVec<[usize; 8]> {
    match shape.kind {
        ShapeKind::QuadraticCurve { .. } | ShapeKind::BezierCurve { .. } => {
            curve::handle_indices(shape).iter().copied().collect()
        }
        _ => match shape.points() {
            Some(points) => (0..points.len()).step_by(2).collect(),
            None => SmallVec::new(),
        },
    }
}

/// Produces the full handle set for a shape. Visibility is gated on the
/// externally supplied edit flag, matching the renderer's overlay layer.
pub fn shape_handles(shape: &Shape, edited: bool) -> SmallVec<[Handle; 16]> {
    let mut handles = SmallVec::new();
    let Some(points) = shape.points() else {
        return handles;
    };

    for idx in vertex_indices(shape) {
        handles.push(Handle {
            id: HandleId::new(shape.id, HandleRole::Vertex(idx)),
            position: transform_point(local_pair(points, idx), &shape.affine),
            visible: edited,
        });
    }

    if shape.supports_midpoints() && points.len() >= 4 {
        let mut idx = 0;
        while idx + 3 < points.len() {
            let mid = local_pair(points, idx).midpoint(&local_pair(points, idx + 2));
            handles.push(Handle {
                id: HandleId::new(shape.id, HandleRole::Midpoint(idx)),
                position: transform_point(mid, &shape.affine),
                visible: edited,
            });
            idx += 2;
        }
    }

    if let Some(position) = arrow::length_handle(shape) {
        handles.push(Handle {
            id: HandleId::new(shape.id, HandleRole::PointerLength),
            position,
            visible: edited,
        });
    }
    if let Some(position) = arrow::width_handle(shape) {
        handles.push(Handle {
            id: HandleId::new(shape.id, HandleRole::PointerWidth),
            position,
            visible: edited,
        });
    }
    if let Some(position) = arrow::tail_width_handle(shape) {
        handles.push(Handle {
            id: HandleId::new(shape.id, HandleRole::TailWidth),
            position,
            visible: edited,
        });
    }

    handles
}

/// Writes a dragged world position into the vertex at `idx`.
///
/// Returns `Ok(false)` without mutating for indices that no longer address
/// a vertex (stale handles). Odd point lists and degenerate scales are
/// contract violations.
pub fn drag_vertex(shape: &mut Shape, idx: usize, world: Point) -> Result<bool, GeometryError> {
    shape.validate_points()?;
    let local = invert_point(world, &shape.affine)?;

    match shape.kind {
        ShapeKind::QuadraticCurve { .. } | ShapeKind::BezierCurve { .. } => {
            curve::set_vertex_local(shape, idx, local)
        }
        _ => {
            let Some(points) = shape.points_mut() else {
                return Ok(false);
            };
            if idx % 2 != 0 || idx + 1 >= points.len() {
                return Ok(false);
            }
            points[idx] = local.x;
            points[idx + 1] = local.y;
            Ok(true)
        }
    }
}

/// Promotes the midpoint of the segment starting at `start_idx` into a real
/// vertex at the dragged position.
///
/// Two new coordinates are spliced in at `start_idx + 2`; the returned index
/// is the promoted vertex's, and every later vertex/midpoint identity shifts
/// implicitly (they are recomputed from the new list on the next render).
pub fn promote_midpoint(
    shape: &mut Shape,
    start_idx: usize,
    world: Point,
) -> Result<Option<usize>, GeometryError> {
    if !shape.supports_midpoints() {
        return Ok(None);
    }
    shape.validate_points()?;
    let local = invert_point(world, &shape.affine)?;

    let Some(points) = shape.points_mut() else {
        return Ok(None);
    };
    if start_idx % 2 != 0 || start_idx + 3 >= points.len() {
        return Ok(None);
    }

    let inserted = start_idx + 2;
    points.insert(inserted, local.y);
    points.insert(inserted, local.x);
    Ok(Some(inserted))
}

/// Deletes the vertex at `idx` if the kind permits deletion and at least
/// two vertices (four coordinates) would remain.
///
/// Returns `Ok(false)` without mutating when the floor or a stale index
/// blocks the deletion.
pub fn delete_vertex(shape: &mut Shape, idx: usize) -> Result<bool, GeometryError> {
    if !shape.supports_midpoints() {
        return Ok(false);
    }
    shape.validate_points()?;

    let Some(points) = shape.points_mut() else {
        return Ok(false);
    };
    if points.len() <= 4 || idx % 2 != 0 || idx + 1 >= points.len() {
        return Ok(false);
    }
    points.drain(idx..idx + 2);
    Ok(true)
}

/// Applies a handle drag-move through the role dispatch.
///
/// A [`HandleRole::Midpoint`] reaching this path has already been promoted;
/// its writes target the inserted vertex at `start + 2`, mirroring the
/// renderer relabeling the same marker.
pub fn apply_handle_drag(
    shape: &mut Shape,
    role: HandleRole,
    world: Point,
) -> Result<bool, GeometryError> {
    match role {
        HandleRole::Vertex(idx) => drag_vertex(shape, idx, world),
        HandleRole::Midpoint(start_idx) => drag_vertex(shape, start_idx + 2, world),
        HandleRole::PointerLength => {
            arrow::drag_length(shape, world)?;
            Ok(true)
        }
        HandleRole::PointerWidth => {
            arrow::drag_width(shape, world)?;
            Ok(true)
        }
        HandleRole::TailWidth => {
            arrow::drag_tail_width(shape, world)?;
            Ok(true)
        }
    }
}
