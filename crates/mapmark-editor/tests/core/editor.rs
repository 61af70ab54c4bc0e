use std::cell::RefCell;
use std::rc::Rc;

use mapmark_core::geometry::Point;
use mapmark_editor::events::{AppliedReason, ClickModifiers, EditorCallbacks};
use mapmark_editor::handles::{HandleId, HandleRole};
use mapmark_editor::shapes::{Shape, ShapeId, ShapeKind};
use mapmark_editor::Editor;
use mapmark_settings::EditorConfig;

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
    shape
}

fn editor() -> Editor {
    Editor::new(EditorConfig::default())
}

#[test]
fn test_mount_computes_box() {
    let mut editor = editor();
    let api = editor.add_shape(rect_at(10.0, 20.0, 100.0, 50.0));
    let shape = api.get_shape().unwrap();
    let b = shape.box_cache.unwrap();
    assert_eq!(b.left, 10.0);
    assert_eq!(b.right, 110.0);
}

#[test]
fn test_drag_emits_guides_and_snaps_on_release() {
    let mut editor = editor();
    let static_shape = rect_at(100.0, 50.0, 100.0, 100.0);
    editor.add_shape(static_shape);

    let moving = rect_at(500.0, 348.0, 100.0, 100.0);
    let moving_id = moving.id;
    let api = editor.add_shape(moving);

    // Drag the shape to x=98: 2px from the static box's left edge.
    editor.drag_move(moving_id, Point::new(98.0, 348.0));
    assert!(!editor.guide_lines().is_empty());
    assert!(editor
        .guide_lines()
        .vertical
        .iter()
        .any(|l| l[0] == 100.0));

    editor.drag_end(moving_id);

    // Snapped flush to the static edge, guides discarded.
    let shape = api.get_shape().unwrap();
    assert_eq!(shape.affine.x, 100.0);
    assert_eq!(shape.box_cache.unwrap().left, 100.0);
    assert!(editor.guide_lines().is_empty());
}

#[test]
fn test_snap_disabled_when_stick_off() {
    let mut config = EditorConfig::default();
    config.guides.stick = false;
    let mut editor = Editor::new(config);

    editor.add_shape(rect_at(100.0, 50.0, 100.0, 100.0));
    let moving = rect_at(500.0, 348.0, 100.0, 100.0);
    let moving_id = moving.id;
    let api = editor.add_shape(moving);

    editor.drag_move(moving_id, Point::new(98.0, 348.0));
    editor.drag_end(moving_id);

    assert_eq!(api.get_shape().unwrap().affine.x, 98.0);
}

#[test]
fn test_group_selection_snaps_together() {
    let mut editor = editor();
    editor.add_shape(rect_at(300.0, 50.0, 100.0, 100.0));

    let a = rect_at(97.0, 300.0, 50.0, 50.0);
    let b = rect_at(167.0, 300.0, 50.0, 50.0);
    let (a_id, b_id) = (a.id, b.id);
    let a_api = editor.add_shape(a);
    let b_api = editor.add_shape(b);

    // Select both, then drag one member; the union box spans 97..217,
    // nowhere near the static box at 300..400.
    editor.click(a_id, ClickModifiers { ctrl: false });
    editor.click(b_id, ClickModifiers { ctrl: true });
    editor.drag_move(a_id, Point::new(97.0, 300.0));
    editor.drag_end(a_id);

    // Nothing within threshold: no movement for either member.
    assert_eq!(a_api.get_shape().unwrap().affine.x, 97.0);
    assert_eq!(b_api.get_shape().unwrap().affine.x, 167.0);
}

#[test]
fn test_group_snap_moves_all_members_equally() {
    let mut editor = editor();
    editor.add_shape(rect_at(100.0, 500.0, 80.0, 80.0));

    let a = rect_at(97.0, 100.0, 50.0, 50.0);
    let b = rect_at(200.0, 100.0, 50.0, 50.0);
    let (a_id, b_id) = (a.id, b.id);
    let a_api = editor.add_shape(a);
    let b_api = editor.add_shape(b);

    editor.click(a_id, ClickModifiers { ctrl: false });
    editor.click(b_id, ClickModifiers { ctrl: true });

    // Tick once so the guide against the static left edge (x=100) exists:
    // the union box left sits at 97, 3px away.
    editor.drag_move(a_id, Point::new(97.0, 100.0));
    editor.drag_end(a_id);

    // Both members moved by exactly +3; their relative offset is intact.
    assert_eq!(a_api.get_shape().unwrap().affine.x, 100.0);
    assert_eq!(b_api.get_shape().unwrap().affine.x, 203.0);
}

#[test]
fn test_applied_prop_reasons_flow_to_callback() {
    let reasons: Rc<RefCell<Vec<AppliedReason>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = reasons.clone();

    let mut editor = editor();
    let mut callbacks = EditorCallbacks::default();
    callbacks.on_applied_prop = Some(Box::new(move |_, reason| {
        sink.borrow_mut().push(reason);
    }));
    editor.set_callbacks(callbacks);

    let shape = rect_at(10.0, 10.0, 50.0, 50.0);
    let id = shape.id;
    editor.add_shape(shape);
    editor.drag_move(id, Point::new(400.0, 400.0));
    editor.drag_end(id);

    let seen = reasons.borrow();
    assert_eq!(seen[0], AppliedReason::ApplyProp);
    assert!(seen.contains(&AppliedReason::DragEnd));
}

#[test]
fn test_mounted_and_unmounted_callbacks() {
    let mounted: Rc<RefCell<Vec<ShapeId>>> = Rc::new(RefCell::new(Vec::new()));
    let unmounted: Rc<RefCell<Vec<ShapeId>>> = Rc::new(RefCell::new(Vec::new()));

    let mut editor = editor();
    let mut callbacks = EditorCallbacks::default();
    let sink = mounted.clone();
    callbacks.on_mounted = Some(Box::new(move |id, _| sink.borrow_mut().push(id)));
    let sink = unmounted.clone();
    callbacks.on_un_mounted = Some(Box::new(move |id| sink.borrow_mut().push(id)));
    editor.set_callbacks(callbacks);

    let shape = rect_at(0.0, 0.0, 10.0, 10.0);
    let id = shape.id;
    let api = editor.add_shape(shape);
    editor.remove_shape(id);

    assert_eq!(mounted.borrow().as_slice(), &[id]);
    assert_eq!(unmounted.borrow().as_slice(), &[id]);
    // The API object is dead after unmount.
    assert!(api.get_shape().is_none());
}

#[test]
fn test_stale_handle_strings_are_ignored() {
    let mut editor = editor();
    let line = Shape::polyline();
    let id = line.id;
    let api = editor.add_shape(line);

    // Unknown role suffix, foreign shape id, malformed index: all no-ops.
    assert!(editor
        .control_drag_start("not-a-handle", Point::new(0.0, 0.0))
        .unwrap()
        .is_none());
    let foreign = HandleId::new(ShapeId::new_v4(), HandleRole::Vertex(0));
    editor
        .control_drag_move(foreign, Point::new(9.0, 9.0))
        .unwrap();
    assert!(!editor
        .control_dbl_click(&format!("{id}-mid-x"))
        .unwrap());

    // The real shape never moved.
    let shape = api.get_shape().unwrap();
    assert_eq!(shape.points().unwrap(), &[0.0, 0.0, 200.0, 0.0]);
}

#[test]
fn test_control_drag_updates_node_mirror_immediately() {
    let mut editor = editor();
    let mut line = Shape::polyline();
    line.affine.x = 0.0;
    line.affine.y = 0.0;
    let id = line.id;
    let api = editor.add_shape(line);

    let handle = HandleId::new(id, HandleRole::Vertex(2));
    let started = editor
        .control_drag_start(&handle.to_string(), Point::new(0.0, 0.0))
        .unwrap()
        .unwrap();
    editor
        .control_drag_move(started, Point::new(150.0, 75.0))
        .unwrap();

    // The node mirror already carries the new points before drag end.
    let node = api.get_node().unwrap();
    assert_eq!(node.points[2], 150.0);
    assert_eq!(node.points[3], 75.0);

    editor.control_drag_end(id);
    let shape = api.get_shape().unwrap();
    assert_eq!(shape.points().unwrap()[2], 150.0);
}

#[test]
fn test_midpoint_promotion_through_editor() {
    let mut editor = editor();
    let mut line = Shape::polyline();
    line.affine.x = 0.0;
    line.affine.y = 0.0;
    let id = line.id;
    let api = editor.add_shape(line);

    let mid = HandleId::new(id, HandleRole::Midpoint(0));
    let promoted = editor
        .control_drag_start(&mid.to_string(), Point::new(100.0, 30.0))
        .unwrap()
        .unwrap();
    assert_eq!(promoted.role, HandleRole::Vertex(2));
    assert_eq!(api.get_shape().unwrap().points().unwrap().len(), 6);
}

#[test]
fn test_vertex_delete_commit_resets_edit_mode() {
    let mut editor = editor();
    let mut line = Shape::polyline();
    line.affine.x = 0.0;
    line.affine.y = 0.0;
    if let ShapeKind::Polyline { points } = &mut line.kind {
        points.extend_from_slice(&[300.0, 100.0]);
    }
    let id = line.id;
    editor.add_shape(line);

    editor.dbl_click(id);
    assert_eq!(editor.selection().edited(), Some(id));

    let handle = HandleId::new(id, HandleRole::Vertex(2));
    assert!(editor.control_dbl_click(&handle.to_string()).unwrap());
    assert_eq!(editor.selection().edited(), None);
}

#[test]
fn test_transform_end_normalizes_polygon() {
    use mapmark_editor::model::NodeTransform;

    let mut editor = editor();
    let shape = Shape::new(ShapeKind::ConvexPolygon {
        sides: 5,
        radius: 100.0,
    });
    let id = shape.id;
    let api = editor.add_shape(shape);

    let t = NodeTransform {
        x: 250.0,
        y: 250.0,
        rotation: 10.0,
        scale_x: -2.0,
        scale_y: 1.5,
        skew_x: 0.0,
        skew_y: 0.0,
    };
    editor.transform_end(id, &t).unwrap();

    let shape = api.get_shape().unwrap();
    assert!(matches!(shape.kind, ShapeKind::ConvexPolygon { radius, .. } if radius == 200.0));
    assert_eq!(shape.affine.scale_x, -1.0);
    assert_eq!(shape.affine.scale_y, 0.75);
}

#[test]
fn test_stage_auto_expands_when_shape_crosses_edge() {
    let mut editor = editor();
    let stage = editor.stage();
    let shape = rect_at(stage.width() - 50.0, 100.0, 200.0, 50.0);
    editor.add_shape(shape);

    let expanded = editor.stage();
    let expected = (stage.width() + 150.0) * editor.config().stage.expand_ratio;
    assert!((expanded.width() - expected).abs() < 1e-6);
    assert_eq!(expanded.height(), stage.height());
}

#[test]
fn test_selection_gates_node_draggable() {
    let mut editor = editor();
    let shape = rect_at(0.0, 0.0, 10.0, 10.0);
    let id = shape.id;
    let api = editor.add_shape(shape);
    assert!(!api.get_node().unwrap().draggable);

    editor.click(id, ClickModifiers::default());
    assert!(api.get_node().unwrap().draggable);
}
