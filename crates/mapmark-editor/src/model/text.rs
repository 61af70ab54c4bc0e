//! Text shape rules.
//!
//! Text auto-grows: whenever content or layout changes, the measured block
//! height may push the shape's height up (never down below the measured
//! content), and the pivot is recentered so the box stays centered on its
//! position. At transform end a uniform scale becomes a font-size change;
//! a non-uniform scale only resizes the block.

use mapmark_core::geometry::Size;

use crate::fonts;
use crate::model::radial::NodeTransform;
use crate::shapes::{Shape, ShapeKind};

/// Relative tolerance for "the transformer scaled both axes equally".
const UNIFORM_SCALE_TOLERANCE: f64 = 1e-5;

/// Measures the current content at the shape's width.
pub fn measure(shape: &Shape) -> Option<Size> {
    let ShapeKind::Text {
        width,
        text,
        font_family,
        font_size,
        font_style,
        font_weight,
        line_height,
        padding,
        wrap,
        ..
    } = &shape.kind
    else {
        return None;
    };
    let inner_width = (width - padding * 2.0).max(0.0);
    let mut size = fonts::measure_text_block(
        text,
        font_family,
        *font_weight,
        *font_style,
        *font_size,
        *line_height,
        inner_width,
        *wrap,
    );
    size.width += padding * 2.0;
    size.height += padding * 2.0;
    Some(size)
}

/// Moves the pivot to the block center so position stays the visual center.
pub fn recenter_offset(shape: &mut Shape) {
    if let ShapeKind::Text { width, height, .. } = shape.kind {
        shape.affine.offset_x = width / 2.0;
        shape.affine.offset_y = height / 2.0;
    }
}

/// Grows the shape to fit its measured content. Returns `true` when the
/// height changed. The height never shrinks below its explicit value.
pub fn autosize(shape: &mut Shape) -> bool {
    let Some(measured) = measure(shape) else {
        return false;
    };
    let mut grown = false;
    if let ShapeKind::Text { height, .. } = &mut shape.kind {
        if measured.height > *height {
            *height = measured.height.round();
            grown = true;
        }
    }
    recenter_offset(shape);
    grown
}

/// Applies the text transform-end rule.
///
/// Scale is absorbed into the block: width and height take the per-axis
/// magnitudes (height additionally never drops below the re-measured
/// content). When both axes scaled equally, the font size scales with them
/// (rounded, floored at 1); otherwise it is left alone. Only the scale
/// signs survive on the placement.
pub fn apply_transform_end(shape: &mut Shape, t: &NodeTransform) {
    let sign_x = if t.scale_x < 0.0 { -1.0 } else { 1.0 };
    let sign_y = if t.scale_y < 0.0 { -1.0 } else { 1.0 };
    let abs_x = t.scale_x * sign_x;
    let abs_y = t.scale_y * sign_y;

    // Measure at the pre-transform width, as the content reflows only
    // after the new width is committed.
    let measured = measure(shape);

    let ShapeKind::Text {
        width,
        height,
        font_size,
        ..
    } = &mut shape.kind
    else {
        return;
    };

    let mut new_height = (*height * abs_y).round();
    if let Some(measured) = measured {
        if measured.height > new_height {
            new_height = measured.height.round();
        }
    }

    let uniform = (abs_x - abs_y).abs() <= UNIFORM_SCALE_TOLERANCE * abs_x.max(abs_y).max(1.0);
    if uniform {
        *font_size = (*font_size * abs_x).round().max(1.0);
    }

    *width = (*width * abs_x).round();
    *height = new_height;

    shape.affine.x = t.x;
    shape.affine.y = t.y;
    shape.affine.rotation = t.rotation;
    shape.affine.scale_x = sign_x;
    shape.affine.scale_y = sign_y;
    recenter_offset(shape);
}
