use mapmark_editor::transform::{bake_points, invert_point, transform_point, Affine, Matrix};
use mapmark_core::error::GeometryError;
use mapmark_core::geometry::Point;
use proptest::prelude::*;

#[test]
fn test_identity_transform_is_noop() {
    let affine = Affine::default();
    let p = Point::new(12.5, -3.75);
    let world = transform_point(p, &affine);
    assert_eq!(world, p);
    assert_eq!(invert_point(world, &affine).unwrap(), p);
}

#[test]
fn test_offset_pivot_behaves_like_centered_shape() {
    // A 200x100 rectangle with a centered pivot: its local top-left maps to
    // position minus half the extent.
    let affine = Affine {
        x: 300.0,
        y: 200.0,
        offset_x: 100.0,
        offset_y: 50.0,
        ..Affine::default()
    };
    let world = transform_point(Point::new(0.0, 0.0), &affine);
    assert_eq!(world, Point::new(200.0, 150.0));
}

#[test]
fn test_zero_scale_is_rejected_not_divided() {
    let affine = Affine {
        scale_y: 0.0,
        ..Affine::default()
    };
    assert!(matches!(
        invert_point(Point::new(1.0, 1.0), &affine),
        Err(GeometryError::DegenerateScale { .. })
    ));
}

#[test]
fn test_bake_points_matches_matrix() {
    let affine = Affine {
        x: 10.0,
        y: 5.0,
        scale_x: 2.0,
        scale_y: 3.0,
        rotation: 90.0,
        ..Affine::default()
    };
    let mut points = vec![1.0, 0.0, 0.0, 1.0];
    bake_points(&mut points, &affine.matrix()).unwrap();

    let expected_a = transform_point(Point::new(1.0, 0.0), &affine);
    let expected_b = transform_point(Point::new(0.0, 1.0), &affine);
    assert!((points[0] - expected_a.x).abs() < 1e-9);
    assert!((points[1] - expected_a.y).abs() < 1e-9);
    assert!((points[2] - expected_b.x).abs() < 1e-9);
    assert!((points[3] - expected_b.y).abs() < 1e-9);
}

#[test]
fn test_matrix_multiply_then_invert() {
    let mut stack = Matrix::identity();
    stack.translate(50.0, -20.0).rotate(0.7).scale(1.5, 0.5);
    let inv = stack.inverted().unwrap();

    let mut round_trip = stack;
    round_trip.multiply(&inv);
    let p = round_trip.transform_point(Point::new(7.0, 9.0));
    assert!((p.x - 7.0).abs() < 1e-9);
    assert!((p.y - 9.0).abs() < 1e-9);
}

fn nonzero_scale() -> impl Strategy<Value = f64> {
    prop_oneof![-4.0..-0.05f64, 0.05..4.0f64]
}

proptest! {
    // Round-trip property: world-to-local inverts local-to-world exactly
    // for any finite placement with non-degenerate scale.
    #[test]
    fn prop_invert_round_trips(
        px in -1000.0..1000.0f64,
        py in -1000.0..1000.0f64,
        x in -500.0..500.0f64,
        y in -500.0..500.0f64,
        scale_x in nonzero_scale(),
        scale_y in nonzero_scale(),
        skew_x in -0.8..0.8f64,
        skew_y in -0.8..0.8f64,
        rotation in -360.0..360.0f64,
        offset_x in -100.0..100.0f64,
        offset_y in -100.0..100.0f64,
    ) {
        let affine = Affine {
            x, y, scale_x, scale_y, skew_x, skew_y, rotation, offset_x, offset_y,
        };
        let p = Point::new(px, py);
        let world = transform_point(p, &affine);
        let local = invert_point(world, &affine).unwrap();
        prop_assert!((local.x - p.x).abs() < 1e-6);
        prop_assert!((local.y - p.y).abs() < 1e-6);
    }

    // The composable matrix agrees with the point-by-point transform.
    #[test]
    fn prop_matrix_agrees_with_transform_point(
        px in -1000.0..1000.0f64,
        py in -1000.0..1000.0f64,
        scale_x in nonzero_scale(),
        scale_y in nonzero_scale(),
        rotation in -360.0..360.0f64,
        offset_x in -100.0..100.0f64,
        offset_y in -100.0..100.0f64,
    ) {
        let affine = Affine {
            x: 33.0,
            y: -7.0,
            scale_x,
            scale_y,
            skew_x: 0.25,
            skew_y: -0.1,
            rotation,
            offset_x,
            offset_y,
        };
        let p = Point::new(px, py);
        let direct = transform_point(p, &affine);
        let via_matrix = affine.matrix().transform_point(p);
        prop_assert!((direct.x - via_matrix.x).abs() < 1e-6);
        prop_assert!((direct.y - via_matrix.y).abs() < 1e-6);
    }
}
