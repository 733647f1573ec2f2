//! Error type shared by the editor core.

use crate::state::IntegrityViolation;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EditorError>;

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("item index {0} out of range")]
    ItemOutOfRange(usize),

    #[error("label {label} not found in item {item}")]
    UnknownLabel { item: usize, label: String },

    #[error("shape {shape} not found in item {item}")]
    UnknownShape { item: usize, shape: String },

    #[error("label {label} references missing shape {shape}")]
    DanglingShape { label: String, shape: String },

    #[error("inconsistent state: {0}")]
    Inconsistent(IntegrityViolation),

    #[error("label {0} already exists")]
    DuplicateLabel(String),

    #[error("add-track got {items} items but {labels} labels")]
    TrackShapeMismatch { items: usize, labels: usize },

    #[error("category {0} is not configured")]
    UnknownCategory(String),

    #[error("attribute {0} is not configured")]
    UnknownAttribute(usize),

    #[error("no images found in {}", .0.display())]
    EmptyFolder(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid task JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid label schema: {0}")]
    Schema(#[from] serde_yaml::Error),

    #[error("invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("could not determine the config directory")]
    NoConfigDir,
}

impl From<IntegrityViolation> for EditorError {
    fn from(violation: IntegrityViolation) -> Self {
        match violation {
            IntegrityViolation::MissingShape { label, shape, .. } => {
                EditorError::DanglingShape { label, shape }
            }
            other => EditorError::Inconsistent(other),
        }
    }
}
