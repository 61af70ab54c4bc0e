//! # Mapmark Editor
//!
//! The shape geometry and interactive editing engine for Mapmark's
//! annotated map/image documents. The surrounding application supplies a
//! scene-graph renderer, a toolbar, and persistence; this crate owns the
//! geometry and the editing protocol.
//!
//! ## Core Components
//!
//! - **Transforms**: local/world point conversion under the full affine
//!   attribute set, plus the composable matrix used for transform baking
//!   and crop decomposition
//! - **Shapes**: the tagged data model over sixteen annotation kinds
//! - **Boxes**: derived axis-aligned world bounds for shapes and groups
//! - **Guides**: alignment-line candidates during drag and the minimal
//!   snap offset on release
//! - **Handles**: the uniform control-point protocol (vertex drag,
//!   midpoint promotion, deletion floor, derived arrow scalars)
//! - **Variants**: per-kind attribute rules (crop stack, text auto-grow,
//!   playback sync, radial scale normalization, free-drawing bake)
//! - **Editor**: the driver wiring store, selection, guides, and the node
//!   mirror/API layer together
//!
//! ## Architecture
//!
//! ```text
//! Editor (driver)
//!   ├── ShapeStore (draw order + arena cells)
//!   ├── SelectionManager (selected / single-selected / edited)
//!   ├── GuideLines (rebuilt per drag tick)
//!   └── Stage (extent + auto-expand)
//!
//! Shape (data model)
//!   ├── Affine / Matrix (placement)
//!   ├── ShapeBox (derived bounds)
//!   └── model::* (per-kind rules)
//!
//! RenderNode / ShapeApi (seam to the external renderer)
//! ```
//!
//! Pointer and drag events flow in from the renderer with world-space
//! positions; every mutation runs synchronously inside the handler in the
//! fixed order mutate points, update node mirror, recompute box.

pub mod editor;
pub mod events;
pub mod fonts;
pub mod guides;
pub mod handles;
pub mod model;
pub mod node;
pub mod selection;
pub mod shape_box;
pub mod shape_store;
pub mod shapes;
pub mod stage;
pub mod transform;

pub use editor::Editor;
pub use events::{AppliedReason, ClickModifiers, EditorCallbacks};
pub use guides::{collect_guide_lines, snap_offset, stage_box, GuideLines, GuideStyle};
pub use handles::{Handle, HandleId, HandleRole};
pub use model::image::{CropAnchor, CropNode};
pub use model::video::MediaElement;
pub use model::NodeTransform;
pub use node::{RenderNode, ShapeApi, ShapeCell};
pub use selection::SelectionManager;
pub use shape_box::{create_shape_box, group_shape_box, ShapeBox};
pub use shape_store::{LayerAction, ShapeStore};
pub use shapes::{
    Clip, FreeLine, GroupId, ImageFilters, LineStyle, PlaybackState, Shape, ShapeId, ShapeKind,
    ShapeStyle,
};
pub use stage::Stage;
pub use transform::{invert_point, transform_point, Affine, Matrix};
