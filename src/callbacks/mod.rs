//! Callback handlers for the editor window.
//!
//! - `canvas` - pointer and key events on the image canvas
//! - `menu` - category and attribute selection
//! - `navigation` - moving between items
//! - `history` - undo/redo
//! - `file_ops` - saving the task

pub mod canvas;
pub mod file_ops;
pub mod history;
pub mod menu;
pub mod navigation;

use crate::AppWindow;
use label_editor::EditorError;
use tracing::warn;

/// Show a failed operation in the status line.
pub(crate) fn report_error(ui: &AppWindow, what: &str, err: &EditorError) {
    warn!(error = %err, "{what} failed");
    ui.set_status_text(format!("{what} failed: {err}").into());
}
