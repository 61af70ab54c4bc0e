//! Render-node mirror and the per-shape API.
//!
//! The engine does not render; it keeps a [`RenderNode`] mirror of each
//! shape's live rendered object: the latest placement, point list, and
//! derived scalars the renderer needs, plus the portal flag that lifts a
//! shape to the overlay target while a gesture is active. Mirrors live in
//! per-shape mutable cells (shape id to cell arena), so event handlers
//! always see the latest snapshot without stale captures.
//!
//! [`ShapeApi`] is the only way external code reads or writes shape state.
//! It holds weak references: after unmount every accessor returns `None`
//! and every mutation is a no-op, never a panic.

use std::rc::Rc;

use mapmark_core::geometry::Point;
use mapmark_core::types::{shared, Shared, SharedWeak};

use crate::model::NodeTransform;
use crate::shapes::{Shape, ShapeId, ShapeKind};
use crate::stage::Stage;

/// Engine-side mirror of a rendered node.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderNode {
    pub id: ShapeId,
    /// Latest placement pushed to the renderer.
    pub transform: NodeTransform,
    pub offset_x: f64,
    pub offset_y: f64,
    /// Latest point list for vertex-based kinds.
    pub points: Vec<f64>,
    pub pointer_length: f64,
    pub pointer_width: f64,
    pub stroke_width: f64,
    pub visible: bool,
    pub draggable: bool,
    /// While true the renderer hosts this shape in the overlay target.
    pub portal_active: bool,
}

impl RenderNode {
    pub fn new(id: ShapeId) -> Self {
        Self {
            id,
            transform: NodeTransform {
                x: 0.0,
                y: 0.0,
                rotation: 0.0,
                scale_x: 1.0,
                scale_y: 1.0,
                skew_x: 0.0,
                skew_y: 0.0,
            },
            offset_x: 0.0,
            offset_y: 0.0,
            points: Vec::new(),
            pointer_length: 0.0,
            pointer_width: 0.0,
            stroke_width: 1.0,
            visible: true,
            draggable: false,
            portal_active: false,
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.transform.x, self.transform.y)
    }

    pub fn set_position(&mut self, position: Point) {
        self.transform.x = position.x;
        self.transform.y = position.y;
    }

    pub fn set_points(&mut self, points: &[f64]) {
        self.points.clear();
        self.points.extend_from_slice(points);
    }

    /// Mirrors the full shape state onto the node, the engine's equivalent
    /// of pushing the attribute dictionary to the renderer.
    pub fn apply_shape(&mut self, shape: &Shape, selected: bool) {
        self.transform = NodeTransform::from_affine(&shape.affine);
        self.offset_x = shape.affine.offset_x;
        self.offset_y = shape.affine.offset_y;
        self.draggable = shape.draggable && selected;
        self.stroke_width = shape.style.stroke_width;

        match &shape.kind {
            ShapeKind::Arrow {
                points,
                pointer_length,
                pointer_width,
            } => {
                self.set_points(points);
                self.pointer_length = *pointer_length;
                self.pointer_width = *pointer_width;
            }
            ShapeKind::Polyline { points }
            | ShapeKind::QuadraticCurve { points }
            | ShapeKind::BezierCurve { points } => {
                self.set_points(points);
            }
            _ => {}
        }
    }
}

/// A shape's arena cell: the authoritative shape plus its node mirror.
#[derive(Debug, Clone)]
pub struct ShapeCell {
    pub shape: Shared<Shape>,
    pub node: Shared<RenderNode>,
}

impl ShapeCell {
    pub fn new(shape: Shape) -> Self {
        let node = RenderNode::new(shape.id);
        Self {
            shape: shared(shape),
            node: shared(node),
        }
    }
}

/// The per-shape API object handed to external collaborators.
#[derive(Clone)]
pub struct ShapeApi {
    shape: SharedWeak<Shape>,
    node: SharedWeak<RenderNode>,
    stage: SharedWeak<Stage>,
}

impl ShapeApi {
    pub(crate) fn new(cell: &ShapeCell, stage: &Shared<Stage>) -> Self {
        Self {
            shape: Rc::downgrade(&cell.shape),
            node: Rc::downgrade(&cell.node),
            stage: Rc::downgrade(stage),
        }
    }

    /// Latest shape snapshot, or `None` when unmounted.
    pub fn get_shape(&self) -> Option<Shape> {
        self.shape.upgrade().map(|s| s.borrow().clone())
    }

    /// Runs `f` against the live shape without cloning.
    pub fn with_shape<R>(&self, f: impl FnOnce(&Shape) -> R) -> Option<R> {
        self.shape.upgrade().map(|s| f(&s.borrow()))
    }

    /// Mutates the live shape. Returns `false` (no-op) when unmounted.
    ///
    /// The caller is responsible for re-applying props afterwards so the
    /// node mirror and box catch up.
    pub fn update_shape(&self, f: impl FnOnce(&mut Shape)) -> bool {
        match self.shape.upgrade() {
            Some(shape) => {
                f(&mut shape.borrow_mut());
                true
            }
            None => false,
        }
    }

    /// Latest node-mirror snapshot, or `None` when unmounted.
    pub fn get_node(&self) -> Option<RenderNode> {
        self.node.upgrade().map(|n| n.borrow().clone())
    }

    /// Mutates the node mirror directly (visibility, portal flag).
    /// Returns `false` when unmounted.
    pub fn update_prop(&self, f: impl FnOnce(&mut RenderNode)) -> bool {
        match self.node.upgrade() {
            Some(node) => {
                f(&mut node.borrow_mut());
                true
            }
            None => false,
        }
    }

    /// The stage extent, or `None` when the editor is gone.
    pub fn get_stage(&self) -> Option<Stage> {
        self.stage.upgrade().map(|s| *s.borrow())
    }
}
