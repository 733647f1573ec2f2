//! Undo/redo callbacks.

use crate::session::SharedSession;
use crate::{AppWindow, view};
use slint::ComponentHandle;

/// Sets up undo and redo on the UI.
pub fn setup_history_callbacks(ui: &AppWindow, session: SharedSession) {
    let ui_weak = ui.as_weak();
    let undo_session = session.clone();
    ui.on_undo(move || {
        let (Some(ui), Ok(mut guard)) = (ui_weak.upgrade(), undo_session.try_borrow_mut()) else {
            return;
        };
        let s = &mut *guard;
        if s.handler.is_editing() {
            return;
        }
        let status = if s.store.undo() { "Undone" } else { "Nothing to undo" };
        s.handler.update_state(&s.store.state());
        view::refresh(&ui, s);
        ui.set_status_text(status.into());
    });

    let ui_weak = ui.as_weak();
    ui.on_redo(move || {
        let (Some(ui), Ok(mut guard)) = (ui_weak.upgrade(), session.try_borrow_mut()) else {
            return;
        };
        let s = &mut *guard;
        if s.handler.is_editing() {
            return;
        }
        let status = if s.store.redo() { "Redone" } else { "Nothing to redo" };
        s.handler.update_state(&s.store.state());
        view::refresh(&ui, s);
        ui.set_status_text(status.into());
    });
}
