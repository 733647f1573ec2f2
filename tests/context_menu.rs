mod common;

use common::sample_store;
use label_editor::EditorError;
use label_editor::menu::ContextMenu;
use label_editor::state::action::select_labels;
use label_editor::state::{AttributeTool, Store};

fn select(store: &mut Store, ids: &[&str]) {
    let state = store.state();
    store
        .dispatch(select_labels(&state, ids.iter().map(|s| s.to_string()).collect()))
        .unwrap();
}

#[test]
fn menu_is_disabled_without_selection() {
    let mut store = sample_store();
    let state = store.state();
    assert!(!ContextMenu::is_enabled(&state));
    assert_eq!(ContextMenu::current_category(&state), None);
    assert_eq!(ContextMenu::categories(&state).len(), 4);

    select(&mut store, &["1"]);
    let state = store.state();
    assert!(ContextMenu::is_enabled(&state));
    assert_eq!(ContextMenu::current_category(&state), Some("person"));
}

#[test]
fn choosing_category_updates_selected_labels() {
    let mut store = sample_store();
    select(&mut store, &["0", "2"]);

    ContextMenu::on_category_selected(&mut store, "truck").unwrap();

    let state = store.state();
    assert_eq!(state.user.select.category, 3);
    let labels = &state.task.items[0].labels;
    assert_eq!(labels["0"].category, vec![3]);
    assert_eq!(labels["2"].category, vec![3]);
    assert_eq!(labels["1"].category, vec![0]);
    assert!(store.can_undo());
}

#[test]
fn choosing_category_without_selection_sets_default_only() {
    let mut store = sample_store();
    ContextMenu::on_category_selected(&mut store, "rider").unwrap();

    let state = store.state();
    assert_eq!(state.user.select.category, 1);
    assert_eq!(state.task.items[0].labels["1"].category, vec![0]);
    assert!(!store.can_undo());
}

#[test]
fn unknown_category_is_rejected() {
    let mut store = sample_store();
    let result = ContextMenu::on_category_selected(&mut store, "bus");
    assert!(matches!(result, Err(EditorError::UnknownCategory(name)) if name == "bus"));
}

#[test]
fn switch_attribute_toggles_on_selected_label() {
    let mut store = sample_store();
    select(&mut store, &["1"]);

    let rows = ContextMenu::attribute_rows(&store.state());
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].tool, AttributeTool::Switch);
    assert!(!rows[0].is_on());

    ContextMenu::toggle_switch(&mut store, 0).unwrap();
    let state = store.state();
    assert_eq!(state.task.items[0].labels["1"].attributes.get(&0), Some(&vec![1]));
    assert!(ContextMenu::attribute_rows(&state)[0].is_on());

    ContextMenu::toggle_switch(&mut store, 0).unwrap();
    assert!(!ContextMenu::attribute_rows(&store.state())[0].is_on());
}

#[test]
fn list_attribute_value_is_kept_alongside_others() {
    let mut store = sample_store();
    select(&mut store, &["1"]);
    ContextMenu::toggle_switch(&mut store, 1).unwrap();
    ContextMenu::select_value(&mut store, 2, 2).unwrap();

    let state = store.state();
    let attributes = &state.task.items[0].labels["1"].attributes;
    assert_eq!(attributes.get(&1), Some(&vec![1]));
    assert_eq!(attributes.get(&2), Some(&vec![2]));
    assert_eq!(ContextMenu::attribute_rows(&state)[2].current_value(), Some("yellow"));
}

#[test]
fn attribute_misuse_is_rejected() {
    let mut store = sample_store();
    assert!(ContextMenu::toggle_switch(&mut store, 2).is_err());
    assert!(ContextMenu::select_value(&mut store, 0, 1).is_err());
    assert!(ContextMenu::select_value(&mut store, 2, 9).is_err());
    assert!(ContextMenu::toggle_switch(&mut store, 7).is_err());
}

#[test]
fn attributes_without_selection_become_defaults() {
    let mut store = sample_store();
    ContextMenu::toggle_switch(&mut store, 0).unwrap();
    let state = store.state();
    assert_eq!(state.user.select.attributes.get(&0), Some(&vec![1]));
    assert!(ContextMenu::attribute_rows(&state)[0].is_on());
}

#[test]
fn attribute_panel_expands_and_collapses() {
    let mut menu = ContextMenu::new();
    assert!(!menu.is_attributes_expanded());
    menu.toggle_attributes_panel();
    assert!(menu.is_attributes_expanded());
    menu.toggle_attributes_panel();
    assert!(!menu.is_attributes_expanded());
}
