use mapmark_editor::model::image::{begin_crop, calculate_crop, CropAnchor};
use mapmark_editor::model::radial::{normalize_transform_end, split_uniform_scale};
use mapmark_editor::model::NodeTransform;
use mapmark_editor::shapes::{
    Clip, FreeLine, ImageFilters, PlaybackState, Shape, ShapeKind,
};
use mapmark_editor::transform::Matrix;
use mapmark_core::geometry::{Rect, Size};

fn plain_transform(scale_x: f64, scale_y: f64) -> NodeTransform {
    NodeTransform {
        x: 0.0,
        y: 0.0,
        rotation: 0.0,
        scale_x,
        scale_y,
        skew_x: 0.0,
        skew_y: 0.0,
    }
}

#[test]
fn test_polygon_scale_normalization_scenario() {
    // scaleX=-2, scaleY=1.5 must leave scaleX=-1 (sign preserved),
    // scaleY=0.75 (ratio adjusted), radius doubled.
    let mut shape = Shape::new(ShapeKind::ConvexPolygon {
        sides: 6,
        radius: 50.0,
    });
    normalize_transform_end(&mut shape, &plain_transform(-2.0, 1.5));

    assert!(matches!(shape.kind, ShapeKind::ConvexPolygon { radius, .. } if radius == 100.0));
    assert_eq!(shape.affine.scale_x, -1.0);
    assert_eq!(shape.affine.scale_y, 0.75);
}

#[test]
fn test_split_uniform_scale_signs() {
    assert_eq!(split_uniform_scale(2.0, 2.0), (2.0, 1.0, 1.0));
    assert_eq!(split_uniform_scale(-3.0, -1.5), (3.0, -1.0, -0.5));
    let (abs, sx, sy) = split_uniform_scale(0.5, -4.0);
    assert_eq!(abs, 4.0);
    assert_eq!(sy, -1.0);
    assert!((sx - 0.125).abs() < 1e-9);
}

#[test]
fn test_wedge_rounds_radius() {
    let mut shape = Shape::new(ShapeKind::Wedge {
        radius: 33.0,
        angle: 60.0,
        clockwise: false,
    });
    normalize_transform_end(&mut shape, &plain_transform(1.1, 1.0));
    assert!(matches!(shape.kind, ShapeKind::Wedge { radius, .. } if radius == 36.0));
}

#[test]
fn test_free_drawing_bake_through_transform_end() {
    use mapmark_editor::model::free_drawing::bake_transform;

    let mut shape = Shape::new(ShapeKind::FreeDrawing {
        lines: vec![
            FreeLine::new(vec![0.0, 0.0, 50.0, 50.0]),
            FreeLine::new(vec![10.0, -10.0, 30.0, 5.0]),
        ],
        tension: 0.5,
    });
    shape.affine.x = 100.0;
    shape.affine.scale_x = 3.0;

    bake_transform(&mut shape).unwrap();

    // Identity placement, points now carry the transform.
    assert_eq!(shape.affine.x, 0.0);
    assert_eq!(shape.affine.scale_x, 1.0);
    let ShapeKind::FreeDrawing { lines, .. } = &shape.kind else {
        unreachable!()
    };
    assert_eq!(lines[0].points[0], 100.0);
    assert_eq!(lines[0].points[2], 250.0);
}

#[test]
fn test_crop_preserved_across_image_transform() {
    // The clip lives in the image's local system, so transforming the
    // image leaves the stored clip untouched and the crop node follows.
    let mut shape = Shape::new(ShapeKind::Image {
        width: 400.0,
        height: 300.0,
        source: None,
        corner_radius: 0.0,
        filters: ImageFilters::default(),
        clip: Some(Clip {
            x: 100.0,
            y: 50.0,
            width: 120.0,
            height: 90.0,
            rotation: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            skew_x: 0.0,
            skew_y: 0.0,
        }),
    });
    shape.affine.x = 10.0;
    shape.affine.y = 20.0;

    let before = begin_crop(&shape, &Matrix::identity()).unwrap();
    shape.affine.x = 500.0;
    let after = begin_crop(&shape, &Matrix::identity()).unwrap();

    assert_eq!(before.width, after.width);
    assert_eq!(before.height, after.height);
    assert!((after.affine.x - before.affine.x - 490.0).abs() < 1e-6);
}

#[test]
fn test_calculate_crop_vertical_narrow() {
    let last = Size::new(200.0, 200.0);
    let cur = Size::new(200.0, 100.0);
    let last_crop = Rect::new(0.0, 40.0, 200.0, 160.0);

    let crop = calculate_crop(cur, last, last_crop, CropAnchor::TopCenter);
    assert!((crop.height - 80.0).abs() < 1e-9);
    assert!((crop.y - 120.0).abs() < 1e-9);

    let crop = calculate_crop(cur, last, last_crop, CropAnchor::BottomCenter);
    assert!((crop.height - 80.0).abs() < 1e-9);
    assert_eq!(crop.y, 40.0);
}

#[test]
fn test_crop_anchor_names_match_renderer() {
    assert_eq!(
        CropAnchor::from_name("middle-left"),
        Some(CropAnchor::MiddleLeft)
    );
    assert_eq!(
        CropAnchor::from_name("bottom-center"),
        Some(CropAnchor::BottomCenter)
    );
    assert_eq!(CropAnchor::from_name("rotater"), None);
}

#[test]
fn test_video_defaults() {
    let playback = PlaybackState::default();
    assert!(!playback.playing);
    assert_eq!(playback.speed, 1.0);
    assert_eq!(playback.volume, 0.5);
    assert!(!playback.looping);
    assert!(!playback.inverse);
}
