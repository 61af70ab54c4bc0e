//! Ordered shape storage.
//!
//! The store owns every mounted shape's arena cell and the draw order.
//! Later entries draw on top; layer actions reorder within the list.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::node::ShapeCell;
use crate::shapes::{Shape, ShapeId};

/// Draw-order move applied to a single shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerAction {
    /// Send to the bottom of the draw order.
    Back,
    /// Bring to the top of the draw order.
    Front,
    /// One step toward the bottom.
    Backward,
    /// One step toward the top.
    Forward,
}

/// Arena of mounted shapes in draw order.
#[derive(Debug, Clone, Default)]
pub struct ShapeStore {
    order: Vec<ShapeId>,
    cells: HashMap<ShapeId, ShapeCell>,
}

impl ShapeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.cells.contains_key(&id)
    }

    /// Mounts a shape on top of the draw order, returning its cell.
    pub fn insert(&mut self, shape: Shape) -> ShapeCell {
        let id = shape.id;
        let cell = ShapeCell::new(shape);
        self.order.push(id);
        self.cells.insert(id, cell.clone());
        cell
    }

    /// Unmounts a shape, returning its cell.
    pub fn remove(&mut self, id: ShapeId) -> Option<ShapeCell> {
        let cell = self.cells.remove(&id)?;
        self.order.retain(|other| *other != id);
        Some(cell)
    }

    pub fn get(&self, id: ShapeId) -> Option<&ShapeCell> {
        self.cells.get(&id)
    }

    /// Shape ids bottom-to-top.
    pub fn ids(&self) -> impl Iterator<Item = ShapeId> + '_ {
        self.order.iter().copied()
    }

    /// Cells bottom-to-top.
    pub fn iter(&self) -> impl Iterator<Item = (ShapeId, &ShapeCell)> + '_ {
        self.order
            .iter()
            .filter_map(|id| self.cells.get(id).map(|cell| (*id, cell)))
    }

    /// Reorders one shape in the draw order. Returns `false` for unknown
    /// ids; moves that are already at their limit are no-ops returning
    /// `true`.
    pub fn move_layer(&mut self, id: ShapeId, action: LayerAction) -> bool {
        let Some(pos) = self.order.iter().position(|other| *other == id) else {
            return false;
        };
        match action {
            LayerAction::Back => {
                let id = self.order.remove(pos);
                self.order.insert(0, id);
            }
            LayerAction::Front => {
                let id = self.order.remove(pos);
                self.order.push(id);
            }
            LayerAction::Backward => {
                if pos > 0 {
                    self.order.swap(pos, pos - 1);
                }
            }
            LayerAction::Forward => {
                if pos + 1 < self.order.len() {
                    self.order.swap(pos, pos + 1);
                }
            }
        }
        true
    }
}
