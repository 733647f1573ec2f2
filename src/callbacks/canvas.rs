//! Canvas callbacks.
//!
//! Handles: canvas_mouse_down, canvas_mouse_move, canvas_mouse_up, canvas_key

use crate::callbacks::report_error;
use crate::session::SharedSession;
use crate::{AppWindow, view};
use label_editor::math::Vector2D;
use slint::ComponentHandle;

/// Sets up all canvas callbacks on the UI.
pub fn setup_canvas_callbacks(ui: &AppWindow, session: SharedSession) {
    setup_mouse_down(ui, session.clone());
    setup_mouse_move(ui, session.clone());
    setup_mouse_up(ui, session.clone());
    setup_canvas_key(ui, session);
}

fn setup_mouse_down(ui: &AppWindow, session: SharedSession) {
    let ui_weak = ui.as_weak();
    ui.on_canvas_mouse_down(move |x, y, multi| {
        let (Some(ui), Ok(mut guard)) = (ui_weak.upgrade(), session.try_borrow_mut()) else {
            return;
        };
        let s = &mut *guard;
        match s.handler.on_mouse_down(&mut s.store, Vector2D::new(x, y), multi) {
            Ok(true) => view::refresh(&ui, s),
            Ok(false) => {}
            Err(e) => report_error(&ui, "Selection", &e),
        }
    });
}

fn setup_mouse_move(ui: &AppWindow, session: SharedSession) {
    let ui_weak = ui.as_weak();
    ui.on_canvas_mouse_move(move |x, y| {
        let (Some(ui), Ok(mut guard)) = (ui_weak.upgrade(), session.try_borrow_mut()) else {
            return;
        };
        let s = &mut *guard;
        if s.handler.on_mouse_move(Vector2D::new(x, y), s.image_size) {
            view::refresh(&ui, s);
        }
    });
}

fn setup_mouse_up(ui: &AppWindow, session: SharedSession) {
    let ui_weak = ui.as_weak();
    ui.on_canvas_mouse_up(move |x, y| {
        let (Some(ui), Ok(mut guard)) = (ui_weak.upgrade(), session.try_borrow_mut()) else {
            return;
        };
        let s = &mut *guard;
        match s.handler.on_mouse_up(&mut s.store, Vector2D::new(x, y)) {
            Ok(true) => view::refresh(&ui, s),
            Ok(false) => {}
            Err(e) => {
                report_error(&ui, "Commit", &e);
                view::refresh(&ui, s);
            }
        }
    });
}

fn setup_canvas_key(ui: &AppWindow, session: SharedSession) {
    let ui_weak = ui.as_weak();
    ui.on_canvas_key(move |key| {
        let (Some(ui), Ok(mut guard)) = (ui_weak.upgrade(), session.try_borrow_mut()) else {
            return;
        };
        let s = &mut *guard;
        match s.handler.on_key_down(&mut s.store, key.as_str()) {
            Ok(true) => view::refresh(&ui, s),
            Ok(false) => {}
            Err(e) => report_error(&ui, "Delete", &e),
        }
    });
}
