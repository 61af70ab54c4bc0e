//! Event and callback contracts between the engine and its host.
//!
//! The renderer delivers pointer, drag, and transform events with
//! world-space positions; the engine mutates geometry synchronously inside
//! those handlers and reports back through a uniform callback set, so
//! external collaborators (guide-line reset, undo-history commit, canvas
//! auto-expand) can react the same way regardless of shape kind.

use crate::node::ShapeApi;
use crate::shapes::ShapeId;

/// Why a shape's attributes were (re)applied to its rendered node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppliedReason {
    /// A plain property/shape update.
    ApplyProp,
    /// A shape-body drag finished.
    DragEnd,
    /// A control-handle drag finished.
    ControlDragEnd,
    /// A rotate/scale/skew gesture finished.
    TransformEnd,
    /// An edit was committed (vertex deleted, text editing closed).
    Commit,
}

/// Modifier keys relevant to selection clicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClickModifiers {
    pub ctrl: bool,
}

/// The host-supplied callback set, shared by every shape kind.
///
/// All callbacks are optional; an absent callback is simply skipped.
#[derive(Default)]
pub struct EditorCallbacks {
    pub on_mounted: Option<Box<dyn Fn(ShapeId, &ShapeApi)>>,
    pub on_un_mounted: Option<Box<dyn Fn(ShapeId)>>,
    pub on_applied_prop: Option<Box<dyn Fn(&ShapeApi, AppliedReason)>>,
    pub on_click: Option<Box<dyn Fn(&ShapeApi, ClickModifiers)>>,
    pub on_dbl_click: Option<Box<dyn Fn(&ShapeApi)>>,
    pub on_mouse_down: Option<Box<dyn Fn(&ShapeApi)>>,
    pub on_mouse_up: Option<Box<dyn Fn(&ShapeApi)>>,
    pub on_mouse_over: Option<Box<dyn Fn(&ShapeApi)>>,
    pub on_mouse_leave: Option<Box<dyn Fn(&ShapeApi)>>,
    pub on_drag_move: Option<Box<dyn Fn(&ShapeApi)>>,
}

impl std::fmt::Debug for EditorCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorCallbacks")
            .field("on_mounted", &self.on_mounted.is_some())
            .field("on_un_mounted", &self.on_un_mounted.is_some())
            .field("on_applied_prop", &self.on_applied_prop.is_some())
            .field("on_click", &self.on_click.is_some())
            .field("on_dbl_click", &self.on_dbl_click.is_some())
            .field("on_drag_move", &self.on_drag_move.is_some())
            .finish_non_exhaustive()
    }
}
