//! Image crop rules.
//!
//! Cropping is not vertex-based. A secondary "crop image" node with its own
//! placement is shown by the renderer while edit mode is active; the crop
//! rectangle the image keeps is the decomposition of that node against the
//! image's own transform stack:
//!
//! - entering edit mode places the crop node at
//!   `decompose(layer^-1 * image * clip)`;
//! - while the crop node is dragged or transformed, the stored clip becomes
//!   `decompose(image^-1 * layer * crop_node)`.
//!
//! Toggling edit mode preserves the existing crop; only an explicit restore
//! returns the clip to the full image bounds.

use mapmark_core::error::{EditorError, Result};
use mapmark_core::geometry::{Rect, Size};

use crate::shapes::{Clip, Shape, ShapeKind};
use crate::transform::{Affine, Matrix};

/// Placement and size for the renderer's crop overlay node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropNode {
    pub affine: Affine,
    pub width: f64,
    pub height: f64,
}

/// The image's current clip, defaulting to full bounds when none is stored.
pub fn effective_clip(shape: &Shape) -> Option<Clip> {
    let ShapeKind::Image {
        width,
        height,
        clip,
        ..
    } = &shape.kind
    else {
        return None;
    };
    Some(clip.unwrap_or_else(|| Clip::full(*width, *height)))
}

/// Computes the crop overlay placement for entering edit mode:
/// `decompose(layer^-1 * image * clip)` in the layer's coordinate system.
pub fn begin_crop(shape: &Shape, layer: &Matrix) -> Result<CropNode> {
    let clip = effective_clip(shape)
        .ok_or_else(|| EditorError::other("crop requested on a non-image shape"))?;

    let mut stack = layer.inverted()?;
    stack
        .multiply(&shape.affine.matrix())
        .multiply(&clip.affine().matrix());
    let affine = stack.decompose()?;

    Ok(CropNode {
        affine,
        width: clip.width,
        height: clip.height,
    })
}

/// Folds the crop overlay's placement back into the stored clip:
/// `decompose(image^-1 * layer * crop_node)`.
pub fn apply_crop_node(shape: &mut Shape, layer: &Matrix, node: &CropNode) -> Result<()> {
    let mut stack = shape.affine.matrix().inverted()?;
    stack.multiply(layer).multiply(&node.affine.matrix());
    let decomposed = stack.decompose()?;

    let ShapeKind::Image { clip, .. } = &mut shape.kind else {
        return Ok(());
    };
    *clip = Some(Clip {
        x: decomposed.x,
        y: decomposed.y,
        width: node.width,
        height: node.height,
        rotation: decomposed.rotation,
        scale_x: decomposed.scale_x,
        scale_y: decomposed.scale_y,
        skew_x: decomposed.skew_x,
        skew_y: decomposed.skew_y,
    });
    Ok(())
}

/// Restores the clip to the full image bounds.
pub fn reset_crop(shape: &mut Shape) {
    if let ShapeKind::Image { clip, .. } = &mut shape.kind {
        *clip = None;
    }
}

/// Anchor of the resize handle driving a crop recalculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropAnchor {
    TopLeft,
    TopCenter,
    TopRight,
    MiddleLeft,
    MiddleRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl CropAnchor {
    /// Parses the renderer's transformer anchor names.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "top-left" => Some(Self::TopLeft),
            "top-center" => Some(Self::TopCenter),
            "top-right" => Some(Self::TopRight),
            "middle-left" => Some(Self::MiddleLeft),
            "middle-right" => Some(Self::MiddleRight),
            "bottom-left" => Some(Self::BottomLeft),
            "bottom-center" => Some(Self::BottomCenter),
            "bottom-right" => Some(Self::BottomRight),
            _ => None,
        }
    }
}

/// Recalculates a crop rectangle after the image was resized from `anchor`,
/// keeping the visible region anchored to the opposite edge.
///
/// Horizontal side anchors narrow or extend the crop width proportionally;
/// vertical ones do the same for height. Corner anchors keep the crop.
pub fn calculate_crop(cur: Size, last: Size, last_crop: Rect, anchor: CropAnchor) -> Rect {
    let mut x = last_crop.x;
    let mut y = last_crop.y;
    let mut width = last_crop.width;
    let mut height = last_crop.height;

    match anchor {
        CropAnchor::MiddleLeft | CropAnchor::MiddleRight => {
            if cur.width < last.width {
                // Horizontal narrow
                width = last_crop.width * (cur.width / last.width);
                if anchor == CropAnchor::MiddleLeft {
                    x = last_crop.x + last_crop.width - width;
                }
            } else {
                // Horizontal extend
                width = cur.width * (last_crop.height / last.height);
                if width > last.width - last_crop.x {
                    height = cur.height * ((last.width - last_crop.x) / cur.width);
                }
            }
        }
        CropAnchor::TopCenter | CropAnchor::BottomCenter => {
            if cur.height < last.height {
                // Vertical narrow
                height = last_crop.height * (cur.height / last.height);
                if anchor == CropAnchor::TopCenter {
                    y = last_crop.y + last_crop.height - height;
                }
            } else {
                // Vertical extend
                height = cur.height * (last_crop.width / last.width);
                if height > last_crop.height - last_crop.y {
                    width = cur.width * ((last_crop.height - last_crop.y) / cur.height);
                }
            }
        }
        _ => {}
    }

    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Reads the intrinsic pixel dimensions of downloaded image bytes, used to
/// size a freshly created image shape.
pub fn intrinsic_dimensions(bytes: &[u8]) -> Result<(u32, u32)> {
    let reader = image::ImageReader::new(std::io::Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| EditorError::ImageDecode {
            reason: e.to_string(),
        })?;
    reader
        .into_dimensions()
        .map_err(|e| EditorError::ImageDecode {
            reason: e.to_string(),
        })
}
