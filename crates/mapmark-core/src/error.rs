//! Error handling for Mapmark.
//!
//! Provides the error taxonomy for the editing engine:
//! - Geometry contract violations (malformed point lists, degenerate scale)
//! - Editor-level failures wrapping the geometry layer
//!
//! All error types use `thiserror` for ergonomic error handling. Contract
//! violations are fatal within the operation that detects them: the mutation
//! is aborted and the shape stays in its last-good state.

use thiserror::Error;

/// Geometry contract violations.
///
/// These indicate a programming error in the caller, never bad user input:
/// the engine fails fast rather than corrupting a shape's point list.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A flat point list must contain an even number of coordinates.
    #[error("Point list has odd length {len}; coordinates must come in x,y pairs")]
    OddPointList {
        /// The offending list length.
        len: usize,
    },

    /// A transform cannot be inverted because one of its scale factors is zero.
    #[error("Cannot invert transform with degenerate scale ({scale_x}, {scale_y})")]
    DegenerateScale {
        /// The X scale factor at the time of inversion.
        scale_x: f64,
        /// The Y scale factor at the time of inversion.
        scale_y: f64,
    },

    /// A matrix has zero determinant and cannot be inverted or decomposed.
    #[error("Singular transform matrix (determinant {determinant})")]
    SingularMatrix {
        /// The determinant of the offending matrix.
        determinant: f64,
    },

    /// A fixed-arity shape received a point list of the wrong length.
    #[error("Expected exactly {expected} coordinates, got {actual}")]
    FixedArity {
        /// The required coordinate count.
        expected: usize,
        /// The supplied coordinate count.
        actual: usize,
    },
}

/// Main error type for the Mapmark editing engine.
#[derive(Error, Debug)]
pub enum EditorError {
    /// A geometry contract violation.
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Image bytes could not be decoded.
    #[error("Failed to decode image data: {reason}")]
    ImageDecode {
        /// Why the decode failed.
        reason: String,
    },

    /// Generic editor error.
    #[error("{0}")]
    Other(String),
}

impl EditorError {
    /// Create an error from a string message.
    pub fn other(msg: impl Into<String>) -> Self {
        EditorError::Other(msg.into())
    }

    /// Check if this is a geometry contract violation.
    pub fn is_geometry(&self) -> bool {
        matches!(self, EditorError::Geometry(_))
    }
}

/// Result type using [`EditorError`].
pub type Result<T> = std::result::Result<T, EditorError>;

/// Validates that a flat coordinate list pairs up.
pub fn ensure_even(points: &[f64]) -> std::result::Result<(), GeometryError> {
    if points.len() % 2 != 0 {
        Err(GeometryError::OddPointList { len: points.len() })
    } else {
        Ok(())
    }
}
