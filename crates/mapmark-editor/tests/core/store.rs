use mapmark_editor::shape_store::{LayerAction, ShapeStore};
use mapmark_editor::shapes::{Shape, ShapeId};

fn filled_store(n: usize) -> (ShapeStore, Vec<ShapeId>) {
    let mut store = ShapeStore::new();
    let ids = (0..n)
        .map(|_| {
            let shape = Shape::polyline();
            let id = shape.id;
            store.insert(shape);
            id
        })
        .collect();
    (store, ids)
}

#[test]
fn test_draw_order_ops_preserve_id_set() {
    let (mut store, ids) = filled_store(5);
    let mut expected = ids.clone();
    expected.sort();

    for (id, action) in [
        (ids[0], LayerAction::Front),
        (ids[4], LayerAction::Back),
        (ids[2], LayerAction::Forward),
        (ids[3], LayerAction::Backward),
    ] {
        assert!(store.move_layer(id, action));
        let mut current: Vec<ShapeId> = store.ids().collect();
        current.sort();
        assert_eq!(current, expected);
    }
}

#[test]
fn test_forward_moves_exactly_one_step() {
    let (mut store, ids) = filled_store(3);
    store.move_layer(ids[0], LayerAction::Forward);
    assert_eq!(store.ids().collect::<Vec<_>>(), vec![ids[1], ids[0], ids[2]]);
}

#[test]
fn test_cells_survive_reorder() {
    let (mut store, ids) = filled_store(2);
    store.get(ids[0]).unwrap().shape.borrow_mut().affine.x = 77.0;
    store.move_layer(ids[0], LayerAction::Front);
    assert_eq!(store.get(ids[0]).unwrap().shape.borrow().affine.x, 77.0);
}
