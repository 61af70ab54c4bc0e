//! Selection state.
//!
//! Tracks three orthogonal pieces of selection state owned by the editor:
//! the selected set, the single-selected subset (one shape picked out
//! inside an already-selected group), and the edited shape (double-click
//! edit mode). Clicking a grouped shape selects its whole group; clicking
//! again inside the selected group narrows to that one shape. Ctrl toggles
//! membership without clearing the rest.

use std::collections::HashSet;

use crate::shape_store::ShapeStore;
use crate::shapes::ShapeId;

#[derive(Debug, Clone, Default)]
pub struct SelectionManager {
    selected: HashSet<ShapeId>,
    single_selected: HashSet<ShapeId>,
    edited: Option<ShapeId>,
}

impl SelectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_selected(&self, id: ShapeId) -> bool {
        self.selected.contains(&id)
    }

    pub fn is_single_selected(&self, id: ShapeId) -> bool {
        self.single_selected.contains(&id)
    }

    pub fn selected_ids(&self) -> impl Iterator<Item = ShapeId> + '_ {
        self.selected.iter().copied()
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    pub fn edited(&self) -> Option<ShapeId> {
        self.edited
    }

    pub fn is_edited(&self, id: ShapeId) -> bool {
        self.edited == Some(id)
    }

    pub fn set_edited(&mut self, id: Option<ShapeId>) {
        self.edited = id;
    }

    pub fn deselect_all(&mut self) {
        self.selected.clear();
        self.single_selected.clear();
        self.edited = None;
    }

    /// Drops a removed shape from every selection set.
    pub fn forget(&mut self, id: ShapeId) {
        self.selected.remove(&id);
        self.single_selected.remove(&id);
        if self.edited == Some(id) {
            self.edited = None;
        }
    }

    /// Every member of the clicked shape's outermost group, or just the
    /// shape itself when ungrouped.
    fn group_members(store: &ShapeStore, id: ShapeId) -> Vec<ShapeId> {
        let outermost = store
            .get(id)
            .and_then(|cell| cell.shape.borrow().group_ids.last().copied());
        match outermost {
            Some(group) => store
                .iter()
                .filter(|(_, cell)| cell.shape.borrow().group_ids.contains(&group))
                .map(|(member, _)| member)
                .collect(),
            None => vec![id],
        }
    }

    /// Handles a selection click on `id`.
    ///
    /// Grouped shapes select as a whole; a second click inside the fully
    /// selected group narrows to the clicked shape (single-selection).
    /// With ctrl held, membership toggles instead of replacing.
    pub fn select_click(&mut self, store: &ShapeStore, id: ShapeId, ctrl: bool) {
        if !store.contains(id) {
            return;
        }
        let members = Self::group_members(store, id);
        let group_fully_selected =
            members.len() > 1 && members.iter().all(|m| self.selected.contains(m));

        if group_fully_selected {
            // Narrow inside the group.
            if ctrl {
                if !self.single_selected.remove(&id) {
                    self.single_selected.insert(id);
                }
            } else {
                self.single_selected.clear();
                self.single_selected.insert(id);
            }
            return;
        }

        if ctrl {
            let all_in = members.iter().all(|m| self.selected.contains(m));
            if all_in {
                for m in &members {
                    self.selected.remove(m);
                }
            } else {
                self.selected.extend(members.iter().copied());
            }
        } else {
            self.selected.clear();
            self.single_selected.clear();
            self.selected.extend(members.iter().copied());
        }
    }

    /// The set of shapes that move together when `dragged` is dragged:
    /// the single-selection if the dragged shape is in it, else the full
    /// selection, else just the dragged shape.
    pub fn moving_ids(&self, dragged: ShapeId) -> Vec<ShapeId> {
        if self.single_selected.contains(&dragged) {
            self.single_selected.iter().copied().collect()
        } else if self.selected.contains(&dragged) {
            self.selected.iter().copied().collect()
        } else {
            vec![dragged]
        }
    }
}
