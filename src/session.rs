//! Everything the window callbacks share: the store, the canvas handler and the open task.

use label_editor::classes::LabelSchema;
use label_editor::config::AppConfig;
use label_editor::drawable::Label2DHandler;
use label_editor::math::Size2D;
use label_editor::menu::ContextMenu;
use label_editor::state::{State, Store, io};
use label_editor::Result;
use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};
use std::rc::Rc;

pub type SharedSession = Rc<RefCell<Session>>;

pub struct Session {
    pub store: Store,
    pub handler: Label2DHandler,
    pub menu: ContextMenu,
    pub schema: LabelSchema,
    pub config: AppConfig,
    pub task_path: Option<PathBuf>,
    pub image_size: Size2D,
    /// Set by the store subscriber when annotations change; cleared on save.
    pub modified: Rc<Cell<bool>>,
}

impl Session {
    pub fn new(state: State, task_path: Option<PathBuf>, schema: LabelSchema, config: AppConfig) -> Self {
        let mut store = Store::with_undo_depth(state, config.editor.undo_depth);
        let modified = Rc::new(Cell::new(false));
        let flag = Rc::clone(&modified);
        store.subscribe(move |_, change| {
            if change.is_edit() {
                flag.set(true);
            }
        });

        let mut handler = Label2DHandler::new(&config.editor);
        handler.update_state(&store.state());

        Self {
            store,
            handler,
            menu: ContextMenu::new(),
            schema,
            config,
            task_path,
            image_size: Size2D::default(),
            modified,
        }
    }

    /// Image file of an item, relative urls taken from the task's directory.
    pub fn image_path(&self, url: &str) -> PathBuf {
        match &self.task_path {
            Some(task) => io::resolve_url(task, url),
            None => PathBuf::from(url),
        }
    }

    pub fn save(&mut self) -> Result<Option<PathBuf>> {
        let Some(path) = self.task_path.clone() else {
            return Ok(None);
        };
        io::save_state(&self.store.state(), &path)?;
        self.modified.set(false);
        Ok(Some(path))
    }
}

/// Open a task file, or a folder of images (reusing its saved task if there is one).
pub fn open_task(path: &Path, schema: &LabelSchema) -> Result<(State, PathBuf)> {
    if path.is_dir() {
        let task_path = io::task_path_for(path);
        if task_path.exists() {
            return Ok((io::load_state(&task_path)?, task_path));
        }
        return Ok((io::task_from_folder(path, schema)?, task_path));
    }
    Ok((io::load_state(path)?, path.to_path_buf()))
}
