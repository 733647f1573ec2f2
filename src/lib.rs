//! Core of the 2D box label editor.
//!
//! - `state` - the state tree, actions, reducer and the store that owns them
//! - `drawable` - box2d drawable labels, the label list, canvas handler and commit
//! - `menu` - context menu view-model (category and attribute selection)
//! - `config` / `classes` - user config (TOML) and label schema (YAML)

pub mod classes;
pub mod config;
pub mod drawable;
pub mod error;
pub mod math;
pub mod menu;
pub mod state;

pub use error::{EditorError, Result};
