use crate::error::{EditorError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub appearance: AppearanceConfig,
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub tasks: TasksConfig,
    #[serde(default)]
    pub classes: ClassesConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppearanceConfig {
    #[serde(default = "default_sidebar_width")]
    pub sidebar_width: i32,
    #[serde(default = "default_true")]
    pub show_label_captions: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Boxes smaller than this many square pixels are discarded on commit.
    #[serde(default = "default_min_box_area")]
    pub min_box_area: f32,
    /// Pointer distance within which a handle is grabbed.
    #[serde(default = "default_handle_radius")]
    pub handle_radius: f32,
    #[serde(default = "default_undo_depth")]
    pub undo_depth: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TasksConfig {
    #[serde(default)]
    pub recent_tasks: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassesConfig {
    pub schema_file: Option<String>,
}

fn default_sidebar_width() -> i32 {
    260
}

fn default_true() -> bool {
    true
}

fn default_min_box_area() -> f32 {
    10.0
}

fn default_handle_radius() -> f32 {
    6.0
}

fn default_undo_depth() -> usize {
    crate::state::store::DEFAULT_UNDO_DEPTH
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            sidebar_width: default_sidebar_width(),
            show_label_captions: true,
        }
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            min_box_area: default_min_box_area(),
            handle_radius: default_handle_radius(),
            undo_depth: default_undo_depth(),
        }
    }
}

/// Get the path to the config file
pub fn config_path() -> Result<PathBuf> {
    let dirs =
        directories::ProjectDirs::from("", "", "label_editor").ok_or(EditorError::NoConfigDir)?;
    Ok(dirs.config_dir().join("config.toml"))
}

/// Load configuration from file, or return default if it is missing or unreadable
pub fn load_config() -> AppConfig {
    let path = match config_path() {
        Ok(path) => path,
        Err(e) => {
            warn!(error = %e, "using default config");
            return AppConfig::default();
        }
    };
    if !path.exists() {
        return AppConfig::default();
    }
    match std::fs::read_to_string(&path) {
        Ok(content) => parse_config(&content).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "failed to parse config; using defaults");
            AppConfig::default()
        }),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read config; using defaults");
            AppConfig::default()
        }
    }
}

pub fn parse_config(content: &str) -> Result<AppConfig> {
    Ok(toml::from_str(content)?)
}

/// Save configuration to file
pub fn save_config(config: &AppConfig) -> Result<()> {
    let path = config_path()?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| EditorError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let toml = toml::to_string_pretty(config)?;
    std::fs::write(&path, toml).map_err(|source| EditorError::Write { path, source })
}

/// Add a task path to the recent tasks list
pub fn add_recent_task(config: &mut AppConfig, path: String) {
    config.tasks.recent_tasks.retain(|p| p != &path);
    config.tasks.recent_tasks.insert(0, path);
    // Keep only last 10
    config.tasks.recent_tasks.truncate(10);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_sections_take_defaults() {
        let config = parse_config("[editor]\nmin_box_area = 25.0\n").unwrap();
        assert_eq!(config.editor.min_box_area, 25.0);
        assert_eq!(config.editor.handle_radius, 6.0);
        assert_eq!(config.appearance, AppearanceConfig::default());
    }

    #[test]
    fn recent_tasks_are_deduplicated_and_capped() {
        let mut config = AppConfig::default();
        for i in 0..12 {
            add_recent_task(&mut config, format!("task{i}.json"));
        }
        add_recent_task(&mut config, "task5.json".into());
        assert_eq!(config.tasks.recent_tasks.len(), 10);
        assert_eq!(config.tasks.recent_tasks[0], "task5.json");
        assert_eq!(
            config.tasks.recent_tasks.iter().filter(|p| *p == "task5.json").count(),
            1
        );
    }
}
