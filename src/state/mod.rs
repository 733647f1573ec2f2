//! State management for the editor.
//!
//! This module contains:
//! - The state tree (task config, items, labels, shapes, selection)
//! - Actions and the reducer that applies them
//! - The store with undo/redo history and subscribers
//! - Task JSON loading and saving

mod types;
pub mod action;
pub mod io;
pub mod reducer;
pub mod store;

pub use action::{Action, LabelChange, NewLabel, SelectChange};
pub use store::{Change, Store};
pub use types::*;
