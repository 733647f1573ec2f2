mod common;

use common::{CANVAS, sample_store, v};
use label_editor::config::EditorConfig;
use label_editor::drawable::{Handle, Label2DHandler};

fn handler_for(store: &label_editor::state::Store) -> Label2DHandler {
    let mut handler = Label2DHandler::new(&EditorConfig::default());
    handler.update_state(&store.state());
    handler
}

#[test]
fn hover_highlights_handle_under_pointer() {
    let store = sample_store();
    let mut handler = handler_for(&store);

    assert!(handler.on_mouse_move(v(752.0, 401.0), CANVAS));
    let label = handler.labels().get(1).unwrap();
    assert_eq!(label.highlighted_handle(), Some(Handle::BottomRight));

    // Same spot again: nothing to redraw.
    assert!(!handler.on_mouse_move(v(752.0, 401.0), CANVAS));

    assert!(handler.on_mouse_move(v(600.0, 330.0), CANVAS));
    assert_eq!(
        handler.labels().get(1).unwrap().highlighted_handle(),
        Some(Handle::Edge)
    );

    assert!(handler.on_mouse_move(v(5.0, 5.0), CANVAS));
    assert!(handler.labels().iter().all(|l| !l.is_highlighted()));
}

#[test]
fn drag_on_empty_canvas_creates_selected_box() {
    let mut store = sample_store();
    let mut handler = handler_for(&store);

    assert!(handler.on_mouse_down(&mut store, v(20.0, 500.0), false).unwrap());
    assert!(handler.is_editing());
    handler.on_mouse_move(v(80.0, 560.0), CANVAS);
    assert!(handler.on_mouse_up(&mut store, v(80.0, 560.0)).unwrap());

    let state = store.state();
    assert_eq!(state.task.items[0].labels.len(), 4);
    let selected = state.selected_labels();
    assert_eq!(selected.len(), 1);
    let rect = state.task.items[0].rect_of(&selected[0]).unwrap();
    assert_eq!((rect.x1, rect.y1, rect.x2, rect.y2), (20.0, 500.0, 80.0, 560.0));
    assert_eq!(handler.labels().len(), 4);
    assert!(!handler.is_editing());
}

#[test]
fn click_without_drag_adds_nothing() {
    let mut store = sample_store();
    let mut handler = handler_for(&store);

    handler.on_mouse_down(&mut store, v(20.0, 500.0), false).unwrap();
    handler.on_mouse_up(&mut store, v(20.0, 500.0)).unwrap();

    assert_eq!(store.state().task.items[0].labels.len(), 3);
    assert_eq!(handler.labels().len(), 3);
}

#[test]
fn press_on_label_selects_and_resizes_it() {
    let mut store = sample_store();
    let mut handler = handler_for(&store);

    handler.on_mouse_down(&mut store, v(459.0, 276.0), false).unwrap();
    assert_eq!(store.state().selected_labels(), ["1".to_string()]);
    handler.on_mouse_move(v(400.0, 200.0), CANVAS);
    handler.on_mouse_up(&mut store, v(400.0, 200.0)).unwrap();

    let state = store.state();
    let rect = state.task.items[0].rect_of("1").unwrap();
    assert_eq!((rect.x1, rect.y1, rect.x2, rect.y2), (400.0, 200.0, 752.0, 400.0));
    assert_eq!(state.selected_labels(), ["1".to_string()]);
}

#[test]
fn body_drag_moves_label() {
    let mut store = sample_store();
    let mut handler = handler_for(&store);

    handler.on_mouse_down(&mut store, v(200.0, 190.0), false).unwrap();
    handler.on_mouse_move(v(210.0, 200.0), CANVAS);
    handler.on_mouse_up(&mut store, v(210.0, 200.0)).unwrap();

    let rect = store.state().task.items[0].rect_of("0").unwrap().clone();
    assert_eq!((rect.x1, rect.y1, rect.x2, rect.y2), (110.0, 130.0, 310.0, 270.0));
}

#[test]
fn ctrl_click_toggles_selection() {
    let mut store = sample_store();
    let mut handler = handler_for(&store);

    handler.on_mouse_down(&mut store, v(200.0, 190.0), false).unwrap();
    handler.on_mouse_up(&mut store, v(200.0, 190.0)).unwrap();
    handler.on_mouse_down(&mut store, v(600.0, 330.0), true).unwrap();
    handler.on_mouse_up(&mut store, v(600.0, 330.0)).unwrap();
    assert_eq!(store.state().selected_labels().len(), 2);

    handler.on_mouse_down(&mut store, v(200.0, 190.0), true).unwrap();
    assert!(!handler.is_editing());
    assert_eq!(store.state().selected_labels(), ["1".to_string()]);
    assert_eq!(handler.labels().selected().count(), 1);
}

#[test]
fn delete_key_removes_selection_and_escape_clears_it() {
    let mut store = sample_store();
    let mut handler = handler_for(&store);

    assert!(!handler.on_key_down(&mut store, "Delete").unwrap());

    handler.on_mouse_down(&mut store, v(900.0, 600.0), false).unwrap();
    handler.on_mouse_up(&mut store, v(900.0, 600.0)).unwrap();
    assert!(handler.on_key_down(&mut store, "Delete").unwrap());
    let state = store.state();
    assert!(!state.task.items[0].labels.contains_key("2"));
    assert!(state.selected_labels().is_empty());
    assert_eq!(handler.labels().len(), 2);

    handler.on_mouse_down(&mut store, v(200.0, 190.0), false).unwrap();
    handler.on_mouse_up(&mut store, v(200.0, 190.0)).unwrap();
    assert!(handler.on_key_down(&mut store, "Escape").unwrap());
    assert!(store.state().selected_labels().is_empty());
    assert!(store.state().task.items[0].labels.contains_key("0"));
}

#[test]
fn pressing_empty_canvas_clears_selection() {
    let mut store = sample_store();
    let mut handler = handler_for(&store);

    handler.on_mouse_down(&mut store, v(200.0, 190.0), false).unwrap();
    handler.on_mouse_up(&mut store, v(200.0, 190.0)).unwrap();
    assert_eq!(store.state().selected_labels().len(), 1);

    handler.on_mouse_down(&mut store, v(20.0, 900.0), false).unwrap();
    assert!(store.state().selected_labels().is_empty());
    handler.on_mouse_up(&mut store, v(20.0, 900.0)).unwrap();
}
