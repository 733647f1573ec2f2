//! Loading and saving task state, and creating a task from a folder of images.

use crate::classes::LabelSchema;
use crate::error::{EditorError, Result};
use crate::state::types::{ItemType, State, TaskConfig, TaskState};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "gif"];

/// Load a task state from JSON. Item urls are kept as written; see [`resolve_url`].
pub fn load_state(path: &Path) -> Result<State> {
    let content = fs::read_to_string(path).map_err(|source| EditorError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let state: State = serde_json::from_str(&content)?;

    let problems = state.check_integrity();
    if !problems.is_empty() {
        warn!(path = %path.display(), count = problems.len(), first = %problems[0], "task has broken label links");
    }
    info!(path = %path.display(), items = state.task.items.len(), "loaded task");
    Ok(state)
}

/// Where the image of an item lives. Relative urls are relative to the task file's directory.
pub fn resolve_url(task_path: &Path, url: &str) -> PathBuf {
    let url = Path::new(url);
    if url.is_absolute() {
        return url.to_path_buf();
    }
    match task_path.parent() {
        Some(dir) => dir.join(url),
        None => url.to_path_buf(),
    }
}

pub fn save_state(state: &State, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| EditorError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let json = serde_json::to_string_pretty(state)?;
    fs::write(path, json).map_err(|source| EditorError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "saved task");
    Ok(())
}

/// Build a fresh task with one item per image in `folder`, sorted by file name. Item urls are
/// file names, so the task resolves them when saved at [`task_path_for`].
pub fn task_from_folder(folder: &Path, schema: &LabelSchema) -> Result<State> {
    let entries = fs::read_dir(folder).map_err(|source| EditorError::Read {
        path: folder.to_path_buf(),
        source,
    })?;

    let mut images: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && is_image(p))
        .collect();
    if images.is_empty() {
        return Err(EditorError::EmptyFolder(folder.to_path_buf()));
    }
    images.sort();

    let items = images
        .iter()
        .enumerate()
        .filter_map(|(i, p)| p.file_name().map(|name| ItemType::new(i, name.to_string_lossy())))
        .collect();

    Ok(State {
        task: TaskState {
            config: TaskConfig {
                categories: schema.category_names(),
                attributes: schema.attributes.clone(),
                ..TaskConfig::default()
            },
            items,
            ..TaskState::default()
        },
        ..State::default()
    })
}

/// Where a task created from `folder` is saved.
pub fn task_path_for(folder: &Path) -> PathBuf {
    folder.join("task.json")
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| IMAGE_EXTENSIONS.contains(&e.to_lowercase().as_str()))
}
