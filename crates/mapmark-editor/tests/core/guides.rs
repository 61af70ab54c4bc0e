use mapmark_editor::guides::{collect_guide_lines, snap_offset, stage_box, GuideLines};
use mapmark_editor::shape_box::ShapeBox;

fn make_box(left: f64, top: f64, right: f64, bottom: f64) -> ShapeBox {
    ShapeBox::from_extents(left, top, right, bottom)
}

#[test]
fn test_rectangle_scenario_guide_then_snap() {
    // Static box {left:100, right:200, top:50, bottom:150}; moving box
    // dragged to {left:98, right:198}; threshold 10.
    let stage = stage_box(1000.0, 800.0);
    let fixed = make_box(100.0, 50.0, 200.0, 150.0);
    let moving = make_box(98.0, 348.0, 198.0, 448.0);

    let lines = collect_guide_lines(&moving, [&fixed], &stage, 10.0);
    assert!(lines.vertical.contains(&[100.0, 0.0, 100.0, 800.0]));

    let (dx, dy) = snap_offset(&moving, &lines, 10.0);
    assert_eq!(dx, 2.0);
    assert_eq!(dy, 0.0);
    assert_eq!(moving.translated(dx, dy).left, 100.0);
}

#[test]
fn test_center_alignment_emits_guides() {
    let stage = stage_box(1000.0, 800.0);
    let fixed = make_box(100.0, 100.0, 200.0, 200.0); // center (150, 150)
    let moving = make_box(104.0, 300.0, 204.0, 400.0); // center x 154

    let lines = collect_guide_lines(&moving, [&fixed], &stage, 10.0);
    assert!(lines.vertical.contains(&[150.0, 0.0, 150.0, 800.0]));
}

#[test]
fn test_duplicate_lines_are_harmless() {
    // Two static boxes sharing an edge produce coincident lines; snapping
    // only reads values so the result is identical.
    let stage = stage_box(1000.0, 800.0);
    let fixed_a = make_box(100.0, 0.0, 200.0, 100.0);
    let fixed_b = make_box(100.0, 600.0, 300.0, 700.0);
    let moving = make_box(97.0, 300.0, 197.0, 400.0);

    let lines = collect_guide_lines(&moving, [&fixed_a, &fixed_b], &stage, 10.0);
    let coincident = lines
        .vertical
        .iter()
        .filter(|l| l[0] == 100.0)
        .count();
    assert!(coincident >= 2);

    let (dx, _) = snap_offset(&moving, &lines, 10.0);
    assert_eq!(dx, 3.0);
}

#[test]
fn test_tie_break_keeps_first_found() {
    // Two lines at equal distance on both sides: the first line in order
    // wins, and its first matching key decides the sign.
    let moving = make_box(100.0, 100.0, 200.0, 200.0);
    let lines = GuideLines {
        vertical: vec![[95.0, 0.0, 95.0, 800.0], [105.0, 0.0, 105.0, 800.0]],
        horizontal: vec![],
    };
    let (dx, _) = snap_offset(&moving, &lines, 10.0);
    assert_eq!(dx, -5.0);
}

#[test]
fn test_group_box_snaps_as_one() {
    // The selection snaps by its union box: a guide near the union's right
    // edge moves every member by the same delta.
    let union = make_box(10.0, 10.0, 207.0, 110.0);
    let lines = GuideLines {
        vertical: vec![[210.0, 0.0, 210.0, 800.0]],
        horizontal: vec![],
    };
    let (dx, dy) = snap_offset(&union, &lines, 10.0);
    assert_eq!((dx, dy), (3.0, 0.0));
}

#[test]
fn test_empty_lines_mean_zero_offset() {
    let moving = make_box(0.0, 0.0, 10.0, 10.0);
    assert_eq!(
        snap_offset(&moving, &GuideLines::default(), 10.0),
        (0.0, 0.0)
    );
}
