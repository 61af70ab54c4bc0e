//! Guide-line alignment engine.
//!
//! While a drag is in progress, every pointer-move tick compares the moving
//! box (a single shape, or the group box of the whole selection) against
//! every static shape box and the stage box. Edges or centers strictly
//! closer than the configured threshold produce full-extent guide lines.
//! On release, the minimal-distance offset to any active line is applied to
//! the whole selection in one translation, then the lines are discarded.

use tracing::debug;

pub use mapmark_settings::config::GuideStyle;

use crate::shape_box::ShapeBox;

/// Active guide lines, rebuilt on every drag-move tick.
///
/// Each line is `[x1, y1, x2, y2]` spanning the full stage extent; vertical
/// lines satisfy `x1 == x2`, horizontal lines `y1 == y2`. Duplicate
/// coincident lines are left as-is; snapping reads values, not identities.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GuideLines {
    pub vertical: Vec<[f64; 4]>,
    pub horizontal: Vec<[f64; 4]>,
}

impl GuideLines {
    pub fn is_empty(&self) -> bool {
        self.vertical.is_empty() && self.horizontal.is_empty()
    }

    pub fn clear(&mut self) {
        self.vertical.clear();
        self.horizontal.clear();
    }
}

/// The stage itself participates in alignment as a box.
pub fn stage_box(width: f64, height: f64) -> ShapeBox {
    ShapeBox::from_extents(0.0, 0.0, width, height)
}

fn x_keys(b: &ShapeBox) -> [f64; 3] {
    [b.left, b.center_x, b.right]
}

fn y_keys(b: &ShapeBox) -> [f64; 3] {
    [b.top, b.center_y, b.bottom]
}

/// Collects alignment candidates for one drag-move tick.
///
/// `statics` must exclude every shape that is currently moving. Comparison
/// is strictly `< threshold`: an edge exactly `threshold` away produces no
/// line. Lines span the full stage extent taken from `stage`.
pub fn collect_guide_lines<'a>(
    moving: &ShapeBox,
    statics: impl IntoIterator<Item = &'a ShapeBox>,
    stage: &ShapeBox,
    threshold: f64,
) -> GuideLines {
    let stage_width = stage.right;
    let stage_height = stage.bottom;
    let mut lines = GuideLines::default();

    let compare = |other: &ShapeBox, lines: &mut GuideLines| {
        for (moving_key, other_key) in x_keys(moving).into_iter().zip(x_keys(other)) {
            if (moving_key - other_key).abs() < threshold {
                lines.vertical.push([other_key, 0.0, other_key, stage_height]);
            }
        }
        for (moving_key, other_key) in y_keys(moving).into_iter().zip(y_keys(other)) {
            if (moving_key - other_key).abs() < threshold {
                lines
                    .horizontal
                    .push([0.0, other_key, stage_width, other_key]);
            }
        }
    };

    for other in statics {
        compare(other, &mut lines);
    }
    compare(stage, &mut lines);

    lines
}

/// Resolves the snap correction at drag end.
///
/// For every active vertical line, the three candidate deltas to the moving
/// box's left/centerX/right are examined; the smallest absolute delta below
/// the threshold wins (first found wins ties, in key order then line
/// order). Symmetric for horizontal lines. Returns `(0.0, 0.0)` when
/// nothing is in range.
pub fn snap_offset(moving: &ShapeBox, lines: &GuideLines, threshold: f64) -> (f64, f64) {
    let mut offset_x = 0.0;
    let mut offset_y = 0.0;
    let mut min_diff_x = threshold;
    let mut min_diff_y = threshold;

    for line in &lines.vertical {
        let x = line[0];
        for delta in [x - moving.left, x - moving.center_x, x - moving.right] {
            let abs = delta.abs();
            if abs < min_diff_x {
                min_diff_x = abs;
                offset_x = delta;
            }
        }
    }

    for line in &lines.horizontal {
        let y = line[1];
        for delta in [y - moving.top, y - moving.center_y, y - moving.bottom] {
            let abs = delta.abs();
            if abs < min_diff_y {
                min_diff_y = abs;
                offset_y = delta;
            }
        }
    }

    if offset_x != 0.0 || offset_y != 0.0 {
        debug!(offset_x, offset_y, "resolved snap offset");
    }
    (offset_x, offset_y)
}
