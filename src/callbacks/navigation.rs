//! Item navigation callbacks.
//!
//! Handles: next_item, prev_item

use crate::callbacks::report_error;
use crate::session::SharedSession;
use crate::{AppWindow, view};
use label_editor::state::Action;
use slint::ComponentHandle;

/// Sets up all navigation callbacks on the UI.
pub fn setup_navigation_callbacks(ui: &AppWindow, session: SharedSession) {
    setup_step(ui, session.clone(), Step::Next);
    setup_step(ui, session, Step::Prev);
}

#[derive(Clone, Copy)]
enum Step {
    Next,
    Prev,
}

/// Index after stepping, clamped to the task. `None` when there is nowhere to go.
fn target_index(current: usize, count: usize, step: Step) -> Option<usize> {
    match step {
        Step::Next if current + 1 < count => Some(current + 1),
        Step::Prev if current > 0 && count > 0 => Some(current - 1),
        _ => None,
    }
}

fn setup_step(ui: &AppWindow, session: SharedSession, step: Step) {
    let ui_weak = ui.as_weak();
    let callback = move || {
        let (Some(ui), Ok(mut guard)) = (ui_weak.upgrade(), session.try_borrow_mut()) else {
            return;
        };
        let s = &mut *guard;
        // Leave the item alone mid-drag; the release would commit into the wrong item.
        if s.handler.is_editing() {
            return;
        }
        let state = s.store.state();
        let Some(target) = target_index(state.user.select.item, state.task.items.len(), step)
        else {
            return;
        };
        match s.store.dispatch(Action::GoToItem { item: target }) {
            Ok(()) => view::show_item(&ui, s),
            Err(e) => report_error(&ui, "Navigation", &e),
        }
    };
    match step {
        Step::Next => ui.on_next_item(callback),
        Step::Prev => ui.on_prev_item(callback),
    }
}
