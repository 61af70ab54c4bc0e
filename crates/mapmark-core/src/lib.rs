//! # Mapmark Core
//!
//! Core types shared by the Mapmark crates: plain 2D geometry primitives
//! (points, sizes, rectangles), the error taxonomy for geometry and editor
//! contract violations, and the single-threaded sharing/callback aliases
//! used by the editing engine.

pub mod error;
pub mod geometry;
pub mod types;

pub use error::{EditorError, GeometryError, Result};
pub use geometry::{rotate_point, Point, Rect, Size};
pub use types::{shared, shared_none, shared_some, Shared, SharedOption, SharedWeak};
