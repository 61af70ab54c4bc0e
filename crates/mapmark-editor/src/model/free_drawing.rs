//! Free-drawing rules.
//!
//! A free drawing is a family of stroke lines treated as one rigid shape
//! while idle. To keep stroke width visually constant, transform end does
//! not accumulate scale on the placement attributes: the full transform is
//! baked into every line's local points and the placement is reset to
//! identity, so nothing moves on screen but the points now encode the
//! transform.

use mapmark_core::error::GeometryError;

use crate::shapes::{Shape, ShapeKind};

/// Flattens the shape's current placement into its stroke points and resets
/// the placement to identity. No-op for other kinds.
pub fn bake_transform(shape: &mut Shape) -> Result<(), GeometryError> {
    let matrix = shape.affine.matrix();
    let ShapeKind::FreeDrawing { lines, .. } = &mut shape.kind else {
        return Ok(());
    };

    // Validate the whole family before touching any line, so a contract
    // violation cannot leave the drawing half-baked.
    for line in lines.iter() {
        mapmark_core::error::ensure_even(&line.points)?;
    }
    for line in lines.iter_mut() {
        crate::transform::bake_points(&mut line.points, &matrix)?;
    }

    shape.affine.reset();
    Ok(())
}
