//! The editing driver.
//!
//! `Editor` owns the shape store, selection state, guide-line state, and
//! stage, and translates renderer events into the shared editing protocol:
//!
//! - shape-body drags update only the placement translation, recompute the
//!   box, and feed the guide-line engine every tick;
//! - drag end resolves the snap offset and applies it to the whole moving
//!   selection in one translation;
//! - control-handle drags mutate shape-local geometry through the handle
//!   dispatch and push the new points to the node mirror immediately;
//! - transform end normalizes per kind (radius absorption, text font-size
//!   rule, free-drawing bake) before the box recomputes.
//!
//! Everything runs synchronously inside the calling event handler; ordering
//! within one gesture is mutate points, update node, recompute box.

use mapmark_core::error::{EditorError, Result};
use mapmark_core::geometry::Point;
use mapmark_core::types::{shared, Shared};
use smallvec::SmallVec;
use tracing::{debug, warn};

use mapmark_settings::EditorConfig;

use crate::events::{AppliedReason, ClickModifiers, EditorCallbacks};
use crate::guides::{self, GuideLines, GuideStyle};
use crate::handles::{self, Handle, HandleId, HandleRole};
use crate::model::video::MediaElement;
use crate::model::{free_drawing, radial, text, video, NodeTransform};
use crate::node::ShapeApi;
use crate::selection::SelectionManager;
use crate::shape_box::{create_shape_box, group_shape_box, ShapeBox};
use crate::shape_store::{LayerAction, ShapeStore};
use crate::shapes::{Shape, ShapeId, ShapeKind};
use crate::stage::Stage;

/// The interactive editing engine.
pub struct Editor {
    config: EditorConfig,
    stage: Shared<Stage>,
    store: ShapeStore,
    selection: SelectionManager,
    guide_lines: GuideLines,
    callbacks: EditorCallbacks,
}

impl Editor {
    pub fn new(config: EditorConfig) -> Self {
        let stage = shared(Stage::new(config.stage.width, config.stage.height));
        Self {
            config,
            stage,
            store: ShapeStore::new(),
            selection: SelectionManager::new(),
            guide_lines: GuideLines::default(),
            callbacks: EditorCallbacks::default(),
        }
    }

    pub fn set_callbacks(&mut self, callbacks: EditorCallbacks) {
        self.callbacks = callbacks;
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn stage(&self) -> Stage {
        *self.stage.borrow()
    }

    pub fn store(&self) -> &ShapeStore {
        &self.store
    }

    pub fn selection(&self) -> &SelectionManager {
        &self.selection
    }

    /// The guide lines active for the current drag, for the renderer.
    pub fn guide_lines(&self) -> &GuideLines {
        &self.guide_lines
    }

    /// How the renderer should draw the active guide lines.
    pub fn guide_style(&self) -> GuideStyle {
        self.config.guides.style
    }

    /// API object for a mounted shape.
    pub fn api(&self, id: ShapeId) -> Option<ShapeApi> {
        self.store
            .get(id)
            .map(|cell| ShapeApi::new(cell, &self.stage))
    }

    /// Mounts a shape and applies its props for the first time.
    pub fn add_shape(&mut self, shape: Shape) -> ShapeApi {
        let id = shape.id;
        let cell = self.store.insert(shape);
        let api = ShapeApi::new(&cell, &self.stage);
        self.apply_prop(id, AppliedReason::ApplyProp);
        if let Some(on_mounted) = &self.callbacks.on_mounted {
            on_mounted(id, &api);
        }
        api
    }

    /// Unmounts a shape, returning its final state.
    pub fn remove_shape(&mut self, id: ShapeId) -> Option<Shape> {
        let cell = self.store.remove(id)?;
        self.selection.forget(id);
        if let Some(on_un_mounted) = &self.callbacks.on_un_mounted {
            on_un_mounted(id);
        }
        let shape = cell.shape.borrow().clone();
        Some(shape)
    }

    /// Reorders a shape in the draw order.
    pub fn move_layer(&mut self, id: ShapeId, action: LayerAction) -> bool {
        self.store.move_layer(id, action)
    }

    /// Applies the shape's state to its node mirror, recomputes the box,
    /// and notifies collaborators.
    ///
    /// This is the single funnel every mutation goes through; kind-derived
    /// upkeep (text auto-grow) happens here so no caller can skip it.
    pub fn apply_prop(&mut self, id: ShapeId, reason: AppliedReason) {
        let Some(cell) = self.store.get(id) else {
            return;
        };
        let cell = cell.clone();
        {
            let mut shape = cell.shape.borrow_mut();
            if matches!(shape.kind, ShapeKind::Text { .. }) {
                text::autosize(&mut shape);
            }
            shape.box_cache = create_shape_box(&shape);
            let selected = self.selection.is_selected(id);
            cell.node.borrow_mut().apply_shape(&shape, selected);
        }
        if reason == AppliedReason::ApplyProp {
            self.auto_expand(id);
        }
        if reason == AppliedReason::Commit {
            self.selection.set_edited(None);
        }
        self.fire_applied(id, reason);
    }

    /// Grows the stage when a shape's box crosses its edge, expanding the
    /// axis with the larger overflow first.
    fn auto_expand(&mut self, id: ShapeId) {
        let Some(shape_box) = self
            .store
            .get(id)
            .and_then(|cell| cell.shape.borrow().box_cache)
        else {
            return;
        };
        let (stage_width, stage_height) = {
            let stage = self.stage.borrow();
            (stage.width(), stage.height())
        };
        let ratio = self.config.stage.expand_ratio;
        let overflow_x = shape_box.right / stage_width;
        let overflow_y = shape_box.bottom / stage_height;

        let mut stage = self.stage.borrow_mut();
        if overflow_x > 1.0 && overflow_y > 1.0 {
            if overflow_x > overflow_y {
                stage.expand_to(shape_box.right * ratio, false);
            } else {
                stage.expand_to(shape_box.bottom * ratio, true);
            }
        } else if overflow_x > 1.0 {
            stage.expand_to(shape_box.right * ratio, false);
        } else if overflow_y > 1.0 {
            stage.expand_to(shape_box.bottom * ratio, true);
        }
    }

    fn fire_applied(&self, id: ShapeId, reason: AppliedReason) {
        if let Some(on_applied_prop) = &self.callbacks.on_applied_prop {
            if let Some(api) = self.api(id) {
                on_applied_prop(&api, reason);
            }
        }
    }

    fn fire_shape_event(&self, id: ShapeId, callback: &Option<Box<dyn Fn(&ShapeApi)>>) {
        if let Some(callback) = callback {
            if let Some(api) = self.api(id) {
                callback(&api);
            }
        }
    }

    // ----- selection & pointer events -----

    /// A selection click on a shape body.
    pub fn click(&mut self, id: ShapeId, modifiers: ClickModifiers) {
        if !self.store.contains(id) {
            return;
        }
        self.selection.select_click(&self.store, id, modifiers.ctrl);
        self.refresh_draggable();
        if let Some(on_click) = &self.callbacks.on_click {
            if let Some(api) = self.api(id) {
                on_click(&api, modifiers);
            }
        }
    }

    /// A double-click enters edit mode for the shape.
    pub fn dbl_click(&mut self, id: ShapeId) {
        if !self.store.contains(id) {
            return;
        }
        self.selection.set_edited(Some(id));
        self.fire_shape_event(id, &self.callbacks.on_dbl_click);
    }

    pub fn mouse_down(&mut self, id: ShapeId) {
        self.fire_shape_event(id, &self.callbacks.on_mouse_down);
    }

    pub fn mouse_up(&mut self, id: ShapeId) {
        self.fire_shape_event(id, &self.callbacks.on_mouse_up);
    }

    pub fn mouse_over(&mut self, id: ShapeId) {
        self.fire_shape_event(id, &self.callbacks.on_mouse_over);
    }

    pub fn mouse_leave(&mut self, id: ShapeId) {
        self.fire_shape_event(id, &self.callbacks.on_mouse_leave);
    }

    /// Mirrors selection-dependent node flags after selection changed.
    fn refresh_draggable(&mut self) {
        for (id, cell) in self.store.iter() {
            let shape = cell.shape.borrow();
            cell.node.borrow_mut().draggable = shape.draggable && self.selection.is_selected(id);
        }
    }

    // ----- shape-body drag -----

    /// Drag-move tick: updates only the translation, recomputes the box,
    /// and rebuilds the guide lines against all static shapes and the
    /// stage.
    pub fn drag_move(&mut self, id: ShapeId, position: Point) {
        let Some(cell) = self.store.get(id) else {
            return;
        };
        let cell = cell.clone();
        {
            let mut shape = cell.shape.borrow_mut();
            shape.affine.x = position.x;
            shape.affine.y = position.y;
            shape.box_cache = create_shape_box(&shape);
            let mut node = cell.node.borrow_mut();
            node.set_position(position);
            node.portal_active = true;
        }

        let moving_ids = self.selection.moving_ids(id);
        self.guide_lines = self.collect_guides(&moving_ids);
        self.fire_shape_event(id, &self.callbacks.on_drag_move);
    }

    fn collect_guides(&self, moving_ids: &[ShapeId]) -> GuideLines {
        let Some(moving_box) = self.group_box(moving_ids) else {
            return GuideLines::default();
        };
        let statics: Vec<ShapeBox> = self
            .store
            .iter()
            .filter(|(id, _)| !moving_ids.contains(id))
            .filter_map(|(_, cell)| cell.shape.borrow().box_cache)
            .collect();

        let stage = self.stage.borrow();
        let stage_box = guides::stage_box(stage.width(), stage.height());
        guides::collect_guide_lines(
            &moving_box,
            statics.iter(),
            &stage_box,
            self.config.guides.threshold,
        )
    }

    /// Union box of the given shapes, from their cached boxes.
    fn group_box(&self, ids: &[ShapeId]) -> Option<ShapeBox> {
        let shapes: Vec<Shape> = ids
            .iter()
            .filter_map(|id| self.store.get(*id))
            .map(|cell| cell.shape.borrow().clone())
            .collect();
        group_shape_box(shapes.iter())
    }

    /// Drag end: snaps the whole moving selection to the nearest active
    /// guide line (when stick is enabled), then clears the guides.
    pub fn drag_end(&mut self, id: ShapeId) {
        let moving_ids = self.selection.moving_ids(id);

        if self.config.guides.stick {
            if let Some(moving_box) = self.group_box(&moving_ids) {
                let (dx, dy) = guides::snap_offset(
                    &moving_box,
                    &self.guide_lines,
                    self.config.guides.threshold,
                );
                if dx != 0.0 || dy != 0.0 {
                    debug!(?moving_ids, dx, dy, "snapping selection to guides");
                    self.translate_shapes(&moving_ids, dx, dy);
                }
            }
        }

        self.guide_lines.clear();
        if let Some(cell) = self.store.get(id) {
            cell.node.borrow_mut().portal_active = false;
        }
        self.fire_applied(id, AppliedReason::DragEnd);
    }

    /// Moves shapes by one shared offset (group-consistent: the selection
    /// moves together, never per-shape best fit).
    pub fn translate_shapes(&mut self, ids: &[ShapeId], dx: f64, dy: f64) {
        for id in ids {
            let Some(cell) = self.store.get(*id) else {
                continue;
            };
            let mut shape = cell.shape.borrow_mut();
            shape.affine.x += dx;
            shape.affine.y += dy;
            shape.box_cache = create_shape_box(&shape);
            let position = Point::new(shape.affine.x, shape.affine.y);
            cell.node.borrow_mut().set_position(position);
        }
    }

    // ----- control handles -----

    /// The renderable handle set for a shape, with visibility gated on its
    /// selection/edit state.
    pub fn handles(&self, id: ShapeId) -> SmallVec<[Handle; 16]> {
        match self.store.get(id) {
            Some(cell) => {
                let editable = self.selection.is_edited(id) || self.selection.is_selected(id);
                handles::shape_handles(&cell.shape.borrow(), editable)
            }
            None => SmallVec::new(),
        }
    }

    /// Starts a handle drag from a renderer node id.
    ///
    /// A midpoint handle is promoted into a real vertex here, and the
    /// returned identity is the relabeled vertex handle; subsequent moves
    /// target it. Malformed ids are stale references: logged and ignored.
    pub fn control_drag_start(&mut self, node_id: &str, world: Point) -> Result<Option<HandleId>> {
        let Some(handle) = self.parse_handle(node_id) else {
            return Ok(None);
        };
        let Some(cell) = self.store.get(handle.shape) else {
            return Ok(None);
        };
        let cell = cell.clone();
        cell.node.borrow_mut().portal_active = true;

        if let HandleRole::Midpoint(start_idx) = handle.role {
            let mut shape = cell.shape.borrow_mut();
            let inserted = handles::promote_midpoint(&mut shape, start_idx, world)
                .map_err(EditorError::from)?;
            return Ok(inserted.map(|idx| {
                if let Some(points) = shape.points() {
                    cell.node.borrow_mut().set_points(points);
                }
                HandleId::new(handle.shape, HandleRole::Vertex(idx))
            }));
        }
        Ok(Some(handle))
    }

    /// Applies a handle drag-move and pushes the mutated geometry to the
    /// node mirror immediately, so the shape visually tracks the handle.
    pub fn control_drag_move(&mut self, handle: HandleId, world: Point) -> Result<()> {
        let Some(cell) = self.store.get(handle.shape) else {
            warn!(%handle.shape, "handle drag for unmounted shape ignored");
            return Ok(());
        };
        let cell = cell.clone();
        let mut shape = cell.shape.borrow_mut();
        let changed = handles::apply_handle_drag(&mut shape, handle.role, world)
            .map_err(EditorError::from)?;
        if changed {
            let mut node = cell.node.borrow_mut();
            if let Some(points) = shape.points() {
                node.set_points(points);
            }
            if let ShapeKind::Arrow {
                pointer_length,
                pointer_width,
                ..
            } = &shape.kind
            {
                node.pointer_length = *pointer_length;
                node.pointer_width = *pointer_width;
            }
            node.stroke_width = shape.style.stroke_width;
        }
        Ok(())
    }

    /// Ends a handle drag.
    pub fn control_drag_end(&mut self, shape_id: ShapeId) {
        if let Some(cell) = self.store.get(shape_id) {
            cell.node.borrow_mut().portal_active = false;
        }
        self.apply_prop(shape_id, AppliedReason::ControlDragEnd);
    }

    /// Double-click on a vertex handle: deletes the vertex while the
    /// minimum-vertex floor allows it.
    pub fn control_dbl_click(&mut self, node_id: &str) -> Result<bool> {
        let Some(handle) = self.parse_handle(node_id) else {
            return Ok(false);
        };
        let HandleRole::Vertex(idx) = handle.role else {
            return Ok(false);
        };
        let Some(cell) = self.store.get(handle.shape) else {
            return Ok(false);
        };
        let cell = cell.clone();
        let deleted = {
            let mut shape = cell.shape.borrow_mut();
            let deleted =
                handles::delete_vertex(&mut shape, idx).map_err(EditorError::from)?;
            if deleted {
                if let Some(points) = shape.points() {
                    cell.node.borrow_mut().set_points(points);
                }
            }
            deleted
        };
        if deleted {
            self.apply_prop(handle.shape, AppliedReason::Commit);
        }
        Ok(deleted)
    }

    fn parse_handle(&self, node_id: &str) -> Option<HandleId> {
        match node_id.parse::<HandleId>() {
            Ok(handle) => Some(handle),
            Err(e) => {
                warn!("ignoring stale handle reference: {e}");
                None
            }
        }
    }

    // ----- transformer -----

    /// Live transform tick: the node attributes are mirrored verbatim so
    /// handle overlays track the gesture; normalization waits for the end.
    pub fn transform(&mut self, id: ShapeId, t: &NodeTransform) {
        let Some(cell) = self.store.get(id) else {
            return;
        };
        let mut shape = cell.shape.borrow_mut();
        radial::copy_node_transform(&mut shape, t);
        cell.node.borrow_mut().transform = *t;
    }

    /// Transform end: applies the kind's attribute rules, then re-applies
    /// props.
    pub fn transform_end(&mut self, id: ShapeId, t: &NodeTransform) -> Result<()> {
        let Some(cell) = self.store.get(id) else {
            return Ok(());
        };
        let cell = cell.clone();
        {
            let mut shape = cell.shape.borrow_mut();
            match &shape.kind {
                ShapeKind::FreeDrawing { .. } => {
                    // Bake the full transform into the strokes so repeated
                    // non-uniform scaling cannot distort stroke widths.
                    radial::copy_node_transform(&mut shape, t);
                    free_drawing::bake_transform(&mut shape).map_err(EditorError::from)?;
                }
                ShapeKind::Text { .. } => text::apply_transform_end(&mut shape, t),
                _ => radial::normalize_transform_end(&mut shape, t),
            }
        }
        self.apply_prop(id, AppliedReason::TransformEnd);
        Ok(())
    }

    // ----- media -----

    /// Synchronizes a video shape's playback block onto a media element.
    pub fn sync_media(&self, id: ShapeId, media: &mut dyn MediaElement) {
        if let Some(cell) = self.store.get(id) {
            video::sync_media(&cell.shape.borrow(), media);
        }
    }
}

impl std::fmt::Debug for Editor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("shapes", &self.store.len())
            .field("selected", &self.selection.selected_count())
            .field("stage", &self.stage.borrow().size())
            .finish_non_exhaustive()
    }
}
