//! The shape data model.
//!
//! A [`Shape`] is a tagged variant over the sixteen annotation kinds, each
//! carrying the full [`Affine`] attribute set, styling, and an optional
//! derived bounding-box cache. Vertex-based kinds store their geometry as a
//! flat `[x0, y0, x1, y1, ...]` local-space list whose even length is a hard
//! contract.

use mapmark_core::error::{ensure_even, GeometryError};
use mapmark_core::geometry::Rect;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shape_box::ShapeBox;
use crate::transform::Affine;

/// Stable shape identifier, unique for the shape's lifetime.
pub type ShapeId = Uuid;

/// Identifier of a shape group.
pub type GroupId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

/// Stroke dash pattern family; the renderer maps these to dash arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    #[default]
    Top,
    Middle,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextWrap {
    #[default]
    Word,
    Char,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

/// Fill, stroke, opacity, and shadow styling shared by every shape kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    pub opacity: f64,
    pub fill_enabled: bool,
    pub fill: String,
    pub fill_opacity: f64,
    pub stroke_enabled: bool,
    pub stroke: String,
    pub stroke_opacity: f64,
    pub stroke_width: f64,
    /// When false the renderer keeps stroke width constant under scale.
    pub stroke_scale_enabled: bool,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
    pub line_style: LineStyle,
    pub shadow_enabled: bool,
    pub shadow_color: String,
    pub shadow_opacity: f64,
    pub shadow_blur: f64,
    pub shadow_offset_x: f64,
    pub shadow_offset_y: f64,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            fill_enabled: true,
            fill: "#000000".to_string(),
            fill_opacity: 1.0,
            stroke_enabled: true,
            stroke: "#000000".to_string(),
            stroke_opacity: 1.0,
            stroke_width: 1.0,
            stroke_scale_enabled: false,
            line_cap: LineCap::Butt,
            line_join: LineJoin::Miter,
            line_style: LineStyle::Solid,
            shadow_enabled: false,
            shadow_color: "#000000".to_string(),
            shadow_opacity: 0.5,
            shadow_blur: 0.0,
            shadow_offset_x: 0.0,
            shadow_offset_y: 15.0,
        }
    }
}

/// Pixel filter set carried by image shapes; applied by the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageFilters {
    pub grayscale: bool,
    pub invert: bool,
    pub sepia: bool,
    pub solarize: bool,
    pub pixel_size: f64,
    pub brightness: f64,
    pub contrast: f64,
    pub blur_radius: f64,
    pub enhance: f64,
    pub noise: f64,
}

impl Default for ImageFilters {
    fn default() -> Self {
        Self {
            grayscale: false,
            invert: false,
            sepia: false,
            solarize: false,
            pixel_size: 1.0,
            brightness: 0.0,
            contrast: 0.0,
            blur_radius: 0.0,
            enhance: 0.0,
            noise: 0.0,
        }
    }
}

/// The crop sub-rectangle of an image, expressed in the image's own local
/// coordinate system with its own placement attributes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub skew_x: f64,
    pub skew_y: f64,
}

impl Clip {
    /// Full-image crop covering `width` x `height`.
    pub fn full(width: f64, height: f64) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width,
            height,
            rotation: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            skew_x: 0.0,
            skew_y: 0.0,
        }
    }

    pub fn affine(&self) -> Affine {
        Affine {
            x: self.x,
            y: self.y,
            scale_x: self.scale_x,
            scale_y: self.scale_y,
            skew_x: self.skew_x,
            skew_y: self.skew_y,
            rotation: self.rotation,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

/// Playback attributes mirrored onto an external media element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackState {
    pub playing: bool,
    pub speed: f64,
    pub volume: f64,
    pub looping: bool,
    /// Reverse playback; the media element receives a negative rate.
    pub inverse: bool,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            playing: false,
            speed: 1.0,
            volume: 0.5,
            looping: false,
            inverse: false,
        }
    }
}

/// One stroke of a free drawing. The whole family shares the shape's
/// styling and placement; only the points differ per line.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FreeLine {
    pub points: Vec<f64>,
}

impl FreeLine {
    pub fn new(points: Vec<f64>) -> Self {
        Self { points }
    }
}

/// The per-kind payload of a shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ShapeKind {
    Image {
        width: f64,
        height: f64,
        /// Location of the backing bytes; downloading is external.
        source: Option<String>,
        corner_radius: f64,
        filters: ImageFilters,
        clip: Option<Clip>,
    },
    Video {
        width: f64,
        height: f64,
        source: Option<String>,
        corner_radius: f64,
        playback: PlaybackState,
    },
    Ellipse {
        radius_x: f64,
        radius_y: f64,
    },
    Circle {
        radius: f64,
    },
    Rectangle {
        width: f64,
        height: f64,
        corner_radius: f64,
    },
    ConvexPolygon {
        sides: u32,
        radius: f64,
    },
    ConcavePolygon {
        num_points: u32,
        inner_radius: f64,
        outer_radius: f64,
    },
    Text {
        width: f64,
        height: f64,
        text: String,
        font_family: String,
        font_size: f64,
        font_style: FontStyle,
        font_weight: FontWeight,
        line_height: f64,
        padding: f64,
        align: TextAlign,
        vertical_align: VerticalAlign,
        wrap: TextWrap,
    },
    #[serde(rename = "line")]
    Polyline {
        points: Vec<f64>,
    },
    FreeDrawing {
        lines: Vec<FreeLine>,
        tension: f64,
    },
    Path {
        width: f64,
        height: f64,
        corner_radius: f64,
        /// SVG path data strings, one per sub-path.
        paths: Vec<String>,
    },
    Arrow {
        points: Vec<f64>,
        pointer_length: f64,
        pointer_width: f64,
    },
    Ring {
        inner_radius: f64,
        outer_radius: f64,
    },
    Wedge {
        radius: f64,
        /// Sweep angle in degrees.
        angle: f64,
        clockwise: bool,
    },
    QuadraticCurve {
        /// Eight numbers: start, control, control (stored twice), end.
        points: Vec<f64>,
    },
    BezierCurve {
        /// Eight numbers: start, control1, control2, end.
        points: Vec<f64>,
    },
}

/// Coordinate count for a cubic rendering pipeline: four x,y pairs.
pub const CURVE_POINT_LEN: usize = 8;

impl ShapeKind {
    /// Human-readable kind label.
    pub fn label(&self) -> &'static str {
        match self {
            ShapeKind::Image { .. } => "Image",
            ShapeKind::Video { .. } => "Video",
            ShapeKind::Ellipse { .. } => "Ellipse",
            ShapeKind::Circle { .. } => "Circle",
            ShapeKind::Rectangle { .. } => "Rectangle",
            ShapeKind::ConvexPolygon { .. } => "Polygon",
            ShapeKind::ConcavePolygon { .. } => "Star",
            ShapeKind::Text { .. } => "Text",
            ShapeKind::Polyline { .. } => "Line",
            ShapeKind::FreeDrawing { .. } => "Free drawing",
            ShapeKind::Path { .. } => "Path",
            ShapeKind::Arrow { .. } => "Arrow",
            ShapeKind::Ring { .. } => "Ring",
            ShapeKind::Wedge { .. } => "Wedge",
            ShapeKind::QuadraticCurve { .. } => "Quadratic curve",
            ShapeKind::BezierCurve { .. } => "Bezier curve",
        }
    }
}

/// A shape on the stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub id: ShapeId,
    pub name: String,
    pub kind: ShapeKind,
    pub affine: Affine,
    pub style: ShapeStyle,
    /// Ancestor groups, immediate group first. Empty when ungrouped.
    pub group_ids: Vec<GroupId>,
    pub draggable: bool,
    /// Derived world-space bounding box; recomputed after every mutation
    /// that changes geometry or placement. Never hand-edited.
    #[serde(skip)]
    pub box_cache: Option<ShapeBox>,
}

impl Shape {
    /// Creates a shape of the given kind with the standard defaults for
    /// position, pivot, and styling.
    pub fn new(kind: ShapeKind) -> Self {
        let mut style = ShapeStyle::default();
        let mut affine = Affine::default();
        let random = random_hex_color();

        match &kind {
            ShapeKind::Arrow { .. } | ShapeKind::Polyline { .. } => {
                affine.x = 150.0;
                affine.y = 250.0;
                style.fill = random.clone();
                style.stroke = random;
                style.stroke_width = 10.0;
            }
            ShapeKind::Rectangle { width, height, .. } => {
                affine.x = 150.0;
                affine.y = 150.0;
                affine.offset_x = width / 2.0;
                affine.offset_y = height / 2.0;
                style.fill = random;
            }
            ShapeKind::Ellipse { .. }
            | ShapeKind::Circle { .. }
            | ShapeKind::ConvexPolygon { .. }
            | ShapeKind::ConcavePolygon { .. }
            | ShapeKind::Ring { .. }
            | ShapeKind::Wedge { .. } => {
                affine.x = 250.0;
                affine.y = 250.0;
                style.fill = random;
            }
            ShapeKind::Text { .. } => {
                affine.x = 150.0;
                affine.y = 150.0;
                style.stroke_enabled = false;
            }
            ShapeKind::FreeDrawing { .. } => {
                style.line_cap = LineCap::Round;
                style.line_join = LineJoin::Round;
                style.stroke_width = 5.0;
            }
            ShapeKind::Path { .. } => {
                affine.x = 150.0;
                affine.y = 150.0;
            }
            ShapeKind::Image { width, height, .. } => {
                affine.x = 150.0;
                affine.y = 150.0;
                affine.offset_x = width / 2.0;
                affine.offset_y = height / 2.0;
                style.fill = "#ffffff".to_string();
                style.fill_opacity = 0.0;
                style.stroke_enabled = false;
            }
            ShapeKind::Video { width, height, .. } => {
                affine.x = 150.0;
                affine.y = 150.0;
                affine.offset_x = width / 2.0;
                affine.offset_y = height / 2.0;
                style.stroke_enabled = false;
            }
            ShapeKind::QuadraticCurve { .. } | ShapeKind::BezierCurve { .. } => {
                affine.x = 150.0;
                affine.y = 250.0;
                style.fill_enabled = false;
                style.stroke = random;
                style.stroke_width = 6.0;
            }
        }

        let name = kind.label().to_string();
        Self {
            id: Uuid::new_v4(),
            name,
            kind,
            affine,
            style,
            group_ids: Vec::new(),
            draggable: true,
            box_cache: None,
        }
    }

    /// Standard arrow with the default two-vertex segment.
    pub fn arrow() -> Self {
        Self::new(ShapeKind::Arrow {
            points: vec![0.0, 0.0, 200.0, 0.0],
            pointer_length: 10.0,
            pointer_width: 10.0,
        })
    }

    /// Standard polyline with the default two-vertex segment.
    pub fn polyline() -> Self {
        Self::new(ShapeKind::Polyline {
            points: vec![0.0, 0.0, 200.0, 0.0],
        })
    }

    /// Standard quadratic curve. The middle control point is stored twice
    /// (indices 2-3 and 4-5) so the curve reuses the cubic rendering
    /// pipeline; the duplication is load-bearing.
    pub fn quadratic_curve() -> Self {
        Self::new(ShapeKind::QuadraticCurve {
            points: vec![0.0, 0.0, 100.0, -100.0, 100.0, -100.0, 200.0, 0.0],
        })
    }

    /// Standard bezier curve with four distinct vertices.
    pub fn bezier_curve() -> Self {
        Self::new(ShapeKind::BezierCurve {
            points: vec![0.0, 0.0, 66.0, -100.0, 133.0, 100.0, 200.0, 0.0],
        })
    }

    /// The shape's immediate group, if grouped.
    pub fn immediate_group(&self) -> Option<GroupId> {
        self.group_ids.first().copied()
    }

    /// Flat local-space point list for vertex-based kinds.
    pub fn points(&self) -> Option<&[f64]> {
        match &self.kind {
            ShapeKind::Polyline { points }
            | ShapeKind::Arrow { points, .. }
            | ShapeKind::QuadraticCurve { points }
            | ShapeKind::BezierCurve { points } => Some(points),
            _ => None,
        }
    }

    /// Mutable flat point list for vertex-based kinds.
    pub fn points_mut(&mut self) -> Option<&mut Vec<f64>> {
        match &mut self.kind {
            ShapeKind::Polyline { points }
            | ShapeKind::Arrow { points, .. }
            | ShapeKind::QuadraticCurve { points }
            | ShapeKind::BezierCurve { points } => Some(points),
            _ => None,
        }
    }

    /// Whether the kind exposes vertex handles at all.
    pub fn is_vertex_based(&self) -> bool {
        self.points().is_some()
    }

    /// Whether segments expose midpoint insertion handles. Fixed-arity
    /// curves never do.
    pub fn supports_midpoints(&self) -> bool {
        matches!(
            self.kind,
            ShapeKind::Arrow { .. } | ShapeKind::Polyline { .. }
        )
    }

    /// Required coordinate count for fixed-arity kinds.
    pub fn fixed_point_len(&self) -> Option<usize> {
        match self.kind {
            ShapeKind::QuadraticCurve { .. } | ShapeKind::BezierCurve { .. } => {
                Some(CURVE_POINT_LEN)
            }
            _ => None,
        }
    }

    /// Validates the point-list contract: even length always, and the exact
    /// coordinate count for fixed-arity kinds.
    pub fn validate_points(&self) -> Result<(), GeometryError> {
        let Some(points) = self.points() else {
            return Ok(());
        };
        ensure_even(points)?;
        if let Some(expected) = self.fixed_point_len() {
            if points.len() != expected {
                return Err(GeometryError::FixedArity {
                    expected,
                    actual: points.len(),
                });
            }
        }
        Ok(())
    }

    /// Local-space bounds of the shape's own geometry, before placement.
    ///
    /// Returns `None` when the shape has no geometry yet (an empty point
    /// list or an empty free-drawing family).
    pub fn local_bounds(&self) -> Option<Rect> {
        match &self.kind {
            ShapeKind::Image { width, height, .. }
            | ShapeKind::Video { width, height, .. }
            | ShapeKind::Rectangle { width, height, .. }
            | ShapeKind::Text { width, height, .. }
            | ShapeKind::Path { width, height, .. } => {
                Some(Rect::new(0.0, 0.0, *width, *height))
            }
            ShapeKind::Ellipse { radius_x, radius_y } => Some(Rect::new(
                -radius_x,
                -radius_y,
                radius_x * 2.0,
                radius_y * 2.0,
            )),
            ShapeKind::Circle { radius } => {
                Some(Rect::new(-radius, -radius, radius * 2.0, radius * 2.0))
            }
            ShapeKind::ConvexPolygon { sides, radius } => {
                Some(regular_polygon_bounds(*sides, *radius))
            }
            ShapeKind::ConcavePolygon { outer_radius, .. } | ShapeKind::Ring { outer_radius, .. } => {
                Some(Rect::new(
                    -outer_radius,
                    -outer_radius,
                    outer_radius * 2.0,
                    outer_radius * 2.0,
                ))
            }
            ShapeKind::Wedge {
                radius,
                angle,
                clockwise,
            } => Some(wedge_bounds(*radius, *angle, *clockwise)),
            ShapeKind::Polyline { points } | ShapeKind::Arrow { points, .. } => {
                flat_points_bounds(points)
            }
            ShapeKind::QuadraticCurve { points } | ShapeKind::BezierCurve { points } => {
                curve_bounds(points).or_else(|| flat_points_bounds(points))
            }
            ShapeKind::FreeDrawing { lines, .. } => {
                let mut bounds: Option<Rect> = None;
                for line in lines {
                    if let Some(b) = flat_points_bounds(&line.points) {
                        bounds = Some(match bounds {
                            Some(acc) => acc.union(&b),
                            None => b,
                        });
                    }
                }
                bounds
            }
        }
    }
}

/// Axis-aligned bounds of a flat coordinate list.
fn flat_points_bounds(points: &[f64]) -> Option<Rect> {
    let mut pairs = points.chunks_exact(2);
    let first = pairs.next()?;
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first[0], first[1], first[0], first[1]);
    for pair in pairs {
        min_x = min_x.min(pair[0]);
        min_y = min_y.min(pair[1]);
        max_x = max_x.max(pair[0]);
        max_y = max_y.max(pair[1]);
    }
    Some(Rect::from_extents(min_x, min_y, max_x, max_y))
}

/// Exact extents of the cubic segment described by four x,y pairs.
fn curve_bounds(points: &[f64]) -> Option<Rect> {
    if points.len() != CURVE_POINT_LEN {
        return None;
    }
    let segment = lyon::geom::CubicBezierSegment {
        from: lyon::geom::point(points[0], points[1]),
        ctrl1: lyon::geom::point(points[2], points[3]),
        ctrl2: lyon::geom::point(points[4], points[5]),
        to: lyon::geom::point(points[6], points[7]),
    };
    let bb = segment.bounding_box();
    Some(Rect::from_extents(bb.min.x, bb.min.y, bb.max.x, bb.max.y))
}

/// Bounds of a regular polygon whose first vertex points straight up.
fn regular_polygon_bounds(sides: u32, radius: f64) -> Rect {
    let sides = sides.max(3);
    let mut min_x = f64::MAX;
    let mut min_y = f64::MAX;
    let mut max_x = f64::MIN;
    let mut max_y = f64::MIN;
    for i in 0..sides {
        let theta = 2.0 * std::f64::consts::PI * f64::from(i) / f64::from(sides)
            - std::f64::consts::FRAC_PI_2;
        let x = radius * theta.cos();
        let y = radius * theta.sin();
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
    }
    Rect::from_extents(min_x, min_y, max_x, max_y)
}

/// Bounds of a circular wedge centered at the origin sweeping `angle_deg`
/// from the positive X axis. Includes the center, both arc endpoints, and
/// every axis extreme inside the sweep.
fn wedge_bounds(radius: f64, angle_deg: f64, clockwise: bool) -> Rect {
    let sweep = if clockwise { -angle_deg } else { angle_deg };
    if sweep.abs() >= 360.0 {
        return Rect::new(-radius, -radius, radius * 2.0, radius * 2.0);
    }
    let (start, end) = if sweep >= 0.0 {
        (0.0, sweep)
    } else {
        (sweep, 0.0)
    };

    let mut min_x: f64 = 0.0;
    let mut min_y: f64 = 0.0;
    let mut max_x: f64 = 0.0;
    let mut max_y: f64 = 0.0;
    let mut include = |deg: f64| {
        let rad = deg.to_radians();
        let x = radius * rad.cos();
        let y = radius * rad.sin();
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
    };

    include(start);
    include(end);
    let first_cardinal = (start / 90.0).ceil() as i64;
    let last_cardinal = (end / 90.0).floor() as i64;
    for k in first_cardinal..=last_cardinal {
        include(k as f64 * 90.0);
    }

    Rect::from_extents(min_x, min_y, max_x, max_y)
}

/// Random opaque hex color for newly added shapes.
pub fn random_hex_color() -> String {
    use rand::Rng;
    let value: u32 = rand::rng().random_range(0..0x100_0000);
    format!("#{value:06x}")
}
