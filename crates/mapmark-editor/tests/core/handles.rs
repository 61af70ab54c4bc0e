use mapmark_core::geometry::Point;
use mapmark_editor::handles::{
    apply_handle_drag, delete_vertex, promote_midpoint, shape_handles, HandleId, HandleRole,
};
use mapmark_editor::shapes::{Shape, ShapeKind};
use mapmark_editor::transform::transform_point;

#[test]
fn test_handles_render_at_transformed_positions() {
    let mut line = Shape::polyline();
    line.affine.x = 50.0;
    line.affine.y = 60.0;
    line.affine.scale_x = 2.0;

    let handles = shape_handles(&line, true);
    let points = line.points().unwrap();
    let first = handles
        .iter()
        .find(|h| h.id.role == HandleRole::Vertex(0))
        .unwrap();
    let expected = transform_point(Point::new(points[0], points[1]), &line.affine);
    assert_eq!(first.position, expected);
}

#[test]
fn test_visibility_gated_on_edit_flag() {
    let line = Shape::polyline();
    assert!(shape_handles(&line, true).iter().all(|h| h.visible));
    assert!(shape_handles(&line, false).iter().all(|h| !h.visible));
}

#[test]
fn test_quadratic_duplication_invariant_after_drag() {
    let mut curve = Shape::quadratic_curve();
    curve.affine.x = 0.0;
    curve.affine.y = 0.0;

    // Drag the middle handle through the generic dispatch several times;
    // the stored-twice control point must stay identical throughout.
    for (x, y) in [(10.0, 10.0), (-40.0, 80.0), (123.0, -45.5)] {
        apply_handle_drag(&mut curve, HandleRole::Vertex(4), Point::new(x, y)).unwrap();
        let points = curve.points().unwrap();
        assert_eq!(points[2], points[4]);
        assert_eq!(points[3], points[5]);
        assert_eq!(points[4], x);
        assert_eq!(points[5], y);
    }
}

#[test]
fn test_minimum_vertex_floor_end_to_end() {
    let mut line = Shape::polyline();
    line.affine.x = 0.0;
    line.affine.y = 0.0;

    // Grow to three vertices via midpoint promotion.
    let inserted = promote_midpoint(&mut line, 0, Point::new(100.0, 25.0))
        .unwrap()
        .unwrap();
    assert_eq!(line.points().unwrap().len(), 6);

    // Deleting back down to two vertices succeeds.
    assert!(delete_vertex(&mut line, inserted).unwrap());
    assert_eq!(line.points().unwrap().len(), 4);

    // The floor now rejects further deletion without mutating.
    let before = line.points().unwrap().to_vec();
    assert!(!delete_vertex(&mut line, 0).unwrap());
    assert_eq!(line.points().unwrap(), before.as_slice());
}

#[test]
fn test_promoted_midpoint_continues_as_vertex() {
    let mut line = Shape::polyline();
    line.affine.x = 0.0;
    line.affine.y = 0.0;

    let inserted = promote_midpoint(&mut line, 0, Point::new(90.0, 10.0))
        .unwrap()
        .unwrap();
    // Subsequent moves address the promoted vertex index directly.
    assert!(apply_handle_drag(&mut line, HandleRole::Vertex(inserted), Point::new(95.0, 20.0))
        .unwrap());
    let points = line.points().unwrap();
    assert_eq!(points[inserted], 95.0);
    assert_eq!(points[inserted + 1], 20.0);
}

#[test]
fn test_midpoint_identities_shift_after_insertion() {
    let mut line = Shape::polyline();
    line.affine.x = 0.0;
    line.affine.y = 0.0;
    promote_midpoint(&mut line, 0, Point::new(100.0, 0.0)).unwrap();

    // Three vertices now expose two midpoints, recomputed from the array.
    let midpoints: Vec<_> = shape_handles(&line, true)
        .iter()
        .filter_map(|h| match h.id.role {
            HandleRole::Midpoint(idx) => Some(idx),
            _ => None,
        })
        .collect();
    assert_eq!(midpoints, vec![0, 2]);
}

#[test]
fn test_arrow_scalar_handles_via_dispatch() {
    let mut arrow = Shape::arrow();
    arrow.affine.x = 0.0;
    arrow.affine.y = 0.0;
    if let ShapeKind::Arrow { points, .. } = &mut arrow.kind {
        *points = vec![0.0, 0.0, 10.0, 0.0];
    }

    apply_handle_drag(&mut arrow, HandleRole::PointerLength, Point::new(4.0, 0.0)).unwrap();
    if let ShapeKind::Arrow { pointer_length, .. } = arrow.kind {
        assert!((pointer_length - 4.0).abs() < 1e-9);
    }

    apply_handle_drag(&mut arrow, HandleRole::TailWidth, Point::new(0.0, 6.0)).unwrap();
    assert!((arrow.style.stroke_width - 12.0).abs() < 1e-9);
}

#[test]
fn test_handle_id_round_trip_for_renderer_interop() {
    let arrow = Shape::arrow();
    for handle in shape_handles(&arrow, true) {
        let parsed: HandleId = handle.id.to_string().parse().unwrap();
        assert_eq!(parsed, handle.id);
    }
}
