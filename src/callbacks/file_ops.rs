//! File operation callbacks.
//!
//! Handles: save_task

use crate::callbacks::report_error;
use crate::session::SharedSession;
use crate::AppWindow;
use label_editor::config;
use slint::ComponentHandle;
use tracing::warn;

/// Sets up all file operation callbacks on the UI.
pub fn setup_file_callbacks(ui: &AppWindow, session: SharedSession) {
    let ui_weak = ui.as_weak();
    ui.on_save_task(move || {
        let (Some(ui), Ok(mut s)) = (ui_weak.upgrade(), session.try_borrow_mut()) else {
            return;
        };
        match s.save() {
            Ok(Some(path)) => {
                config::add_recent_task(&mut s.config, path.display().to_string());
                if let Err(e) = config::save_config(&s.config) {
                    warn!(error = %e, "failed to save config");
                }
                ui.set_modified(false);
                ui.set_status_text(format!("Saved {}", path.display()).into());
            }
            Ok(None) => ui.set_status_text("No task file to save to".into()),
            Err(e) => report_error(&ui, "Save", &e),
        }
    });
}
