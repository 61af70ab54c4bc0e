use mapmark_editor::shape_box::{create_shape_box, group_shape_box};
use mapmark_editor::shapes::{Shape, ShapeKind};

fn rect_at(x: f64, y: f64, width: f64, height: f64) -> Shape {
    let mut shape = Shape::new(ShapeKind::Rectangle {
        width,
        height,
        corner_radius: 0.0,
    });
    shape.affine.x = x;
    shape.affine.y = y;
    shape.affine.offset_x = 0.0;
    shape.affine.offset_y = 0.0;
    shape.box_cache = create_shape_box(&shape);
    shape
}

#[test]
fn test_box_monotonicity_over_groups() {
    let a = rect_at(10.0, 20.0, 50.0, 50.0);
    let b = rect_at(-30.0, 60.0, 20.0, 200.0);
    let group = group_shape_box([&a, &b]).unwrap();

    let (ab, bb) = (a.box_cache.unwrap(), b.box_cache.unwrap());
    assert_eq!(group.left, ab.left.min(bb.left));
    assert_eq!(group.right, ab.right.max(bb.right));
    assert_eq!(group.top, ab.top.min(bb.top));
    assert_eq!(group.bottom, ab.bottom.max(bb.bottom));
    assert_eq!(group.center_x, (group.left + group.right) / 2.0);
    assert_eq!(group.center_y, (group.top + group.bottom) / 2.0);
}

#[test]
fn test_box_invariants_hold_under_rotation() {
    for rotation in [0.0, 17.0, 45.0, 90.0, 133.0, 270.0, 359.0] {
        let mut shape = rect_at(100.0, 100.0, 80.0, 40.0);
        shape.affine.rotation = rotation;
        let b = create_shape_box(&shape).unwrap();
        assert!(b.left <= b.right, "left > right at rotation {rotation}");
        assert!(b.top <= b.bottom, "top > bottom at rotation {rotation}");
        assert!((b.center_x - (b.left + b.right) / 2.0).abs() < 1e-9);
        assert!((b.center_y - (b.top + b.bottom) / 2.0).abs() < 1e-9);
    }
}

#[test]
fn test_scaled_circle_box() {
    let mut shape = Shape::new(ShapeKind::Circle { radius: 10.0 });
    shape.affine.x = 50.0;
    shape.affine.y = 50.0;
    shape.affine.scale_x = 2.0;
    shape.affine.scale_y = 0.5;
    let b = create_shape_box(&shape).unwrap();
    assert_eq!(b.left, 30.0);
    assert_eq!(b.right, 70.0);
    assert_eq!(b.top, 45.0);
    assert_eq!(b.bottom, 55.0);
}

#[test]
fn test_polyline_box_follows_points() {
    let mut shape = Shape::polyline();
    shape.affine.x = 0.0;
    shape.affine.y = 0.0;
    if let ShapeKind::Polyline { points } = &mut shape.kind {
        *points = vec![0.0, 0.0, 120.0, -40.0, 60.0, 80.0];
    }
    let b = create_shape_box(&shape).unwrap();
    assert_eq!(b.left, 0.0);
    assert_eq!(b.right, 120.0);
    assert_eq!(b.top, -40.0);
    assert_eq!(b.bottom, 80.0);
}

#[test]
fn test_curve_box_tighter_than_control_hull() {
    let curve = Shape::quadratic_curve();
    let b = create_shape_box(&curve).unwrap();
    // Control point local y is -100 plus the default placement; the curve
    // itself only reaches halfway.
    let placed_control_y = curve.affine.y - 100.0;
    assert!(b.top > placed_control_y);
}
