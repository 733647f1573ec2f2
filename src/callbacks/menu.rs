//! Context menu callbacks.
//!
//! Handles: category_selected, category_shortcut, toggle_attributes, attribute_toggled,
//! attribute_value_selected

use crate::callbacks::report_error;
use crate::session::{Session, SharedSession};
use crate::{AppWindow, view};
use label_editor::Result;
use label_editor::menu::ContextMenu;
use slint::ComponentHandle;

/// Sets up all context menu callbacks on the UI.
pub fn setup_menu_callbacks(ui: &AppWindow, session: SharedSession) {
    setup_category_selected(ui, session.clone());
    setup_category_shortcut(ui, session.clone());
    setup_toggle_attributes(ui, session.clone());
    setup_attribute_toggled(ui, session.clone());
    setup_attribute_value_selected(ui, session);
}

/// Run a menu edit, then reload the canvas labels so captions follow the new state.
fn apply(ui: &AppWindow, session: &SharedSession, what: &str, edit: impl FnOnce(&mut Session) -> Result<()>) {
    let Ok(mut guard) = session.try_borrow_mut() else {
        return;
    };
    let s = &mut *guard;
    if let Err(e) = edit(s) {
        report_error(ui, what, &e);
    }
    s.handler.update_state(&s.store.state());
    view::refresh(ui, s);
}

fn setup_category_selected(ui: &AppWindow, session: SharedSession) {
    let ui_weak = ui.as_weak();
    ui.on_category_selected(move |name| {
        let Some(ui) = ui_weak.upgrade() else {
            return;
        };
        apply(&ui, &session, "Category change", |s| {
            ContextMenu::on_category_selected(&mut s.store, name.as_str())
        });
    });
}

fn setup_category_shortcut(ui: &AppWindow, session: SharedSession) {
    let ui_weak = ui.as_weak();
    ui.on_category_shortcut(move |key| {
        let Some(ui) = ui_weak.upgrade() else {
            return;
        };
        let name = {
            let Ok(s) = session.try_borrow() else {
                return;
            };
            let state = s.store.state();
            let categories = &state.task.config.categories;
            match s.schema.category_for_shortcut(key.as_str(), categories) {
                Some(index) => categories[index].clone(),
                None => return,
            }
        };
        apply(&ui, &session, "Category change", |s| {
            ContextMenu::on_category_selected(&mut s.store, &name)
        });
    });
}

fn setup_toggle_attributes(ui: &AppWindow, session: SharedSession) {
    let ui_weak = ui.as_weak();
    ui.on_toggle_attributes(move || {
        let (Some(ui), Ok(mut s)) = (ui_weak.upgrade(), session.try_borrow_mut()) else {
            return;
        };
        s.menu.toggle_attributes_panel();
        ui.set_attributes_expanded(s.menu.is_attributes_expanded());
    });
}

fn setup_attribute_toggled(ui: &AppWindow, session: SharedSession) {
    let ui_weak = ui.as_weak();
    ui.on_attribute_toggled(move |index| {
        let Some(ui) = ui_weak.upgrade() else {
            return;
        };
        apply(&ui, &session, "Attribute change", |s| {
            ContextMenu::toggle_switch(&mut s.store, index as usize)
        });
    });
}

fn setup_attribute_value_selected(ui: &AppWindow, session: SharedSession) {
    let ui_weak = ui.as_weak();
    ui.on_attribute_value_selected(move |index, value| {
        let Some(ui) = ui_weak.upgrade() else {
            return;
        };
        apply(&ui, &session, "Attribute change", |s| {
            let state = s.store.state();
            let value_index = state
                .task
                .config
                .attributes
                .get(index as usize)
                .and_then(|a| a.values.iter().position(|v| v.as_str() == value.as_str()))
                .ok_or(label_editor::EditorError::UnknownAttribute(index as usize))?;
            ContextMenu::select_value(&mut s.store, index as usize, value_index)
        });
    });
}
