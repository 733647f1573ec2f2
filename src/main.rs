slint::include_modules!();

mod callbacks;
mod session;
mod utils;
mod view;

use label_editor::classes::load_schema;
use label_editor::config::load_config;
use label_editor::state::State;
use session::{Session, open_task};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), slint::PlatformError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = load_config();
    let schema = load_schema(config.classes.schema_file.as_deref());

    let ui = AppWindow::new()?;
    ui.set_sidebar_width(config.appearance.sidebar_width as f32);
    ui.set_show_captions(config.appearance.show_label_captions);

    let (state, task_path, status) = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => match open_task(&path, &schema) {
            Ok((state, task_path)) => {
                info!(path = %task_path.display(), items = state.task.items.len(), "opened task");
                let status = format!("Opened {}", task_path.display());
                (state, Some(task_path), status)
            }
            Err(e) => {
                warn!(error = %e, "failed to open task");
                (State::default(), None, format!("Failed to open {}: {e}", path.display()))
            }
        },
        None => (
            State::default(),
            None,
            "No task loaded. Usage: label_editor <task.json | image folder>".to_string(),
        ),
    };

    let session = Rc::new(RefCell::new(Session::new(state, task_path, schema, config)));

    callbacks::canvas::setup_canvas_callbacks(&ui, session.clone());
    callbacks::menu::setup_menu_callbacks(&ui, session.clone());
    callbacks::navigation::setup_navigation_callbacks(&ui, session.clone());
    callbacks::history::setup_history_callbacks(&ui, session.clone());
    callbacks::file_ops::setup_file_callbacks(&ui, session.clone());

    view::show_item(&ui, &mut session.borrow_mut());
    ui.set_status_text(status.into());

    ui.run()
}
