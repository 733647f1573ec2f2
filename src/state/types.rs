//! The state tree: task config, items with their labels and shapes, and the user's selection.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

pub type LabelId = String;
pub type ShapeId = String;
pub type TrackId = String;

/// Generate a fresh opaque id for labels, shapes and tracks.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelKind {
    Box2d,
    Tag,
}

impl LabelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LabelKind::Box2d => "box2d",
            LabelKind::Tag => "tag",
        }
    }
}

/// Axis-aligned rectangle shape. `label` back-references the labels that use it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectType {
    pub id: ShapeId,
    #[serde(default)]
    pub label: Vec<LabelId>,
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl RectType {
    pub fn new(id: impl Into<ShapeId>, x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            id: id.into(),
            label: Vec::new(),
            x1,
            y1,
            x2,
            y2,
        }
    }

    pub fn width(&self) -> f32 {
        (self.x2 - self.x1).abs()
    }

    pub fn height(&self) -> f32 {
        (self.y2 - self.y1).abs()
    }

    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    /// Same geometry, ignoring ids and back references.
    pub fn same_geometry(&self, other: &RectType) -> bool {
        self.x1 == other.x1 && self.y1 == other.y1 && self.x2 == other.x2 && self.y2 == other.y2
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelType {
    pub id: LabelId,
    pub item: usize,
    #[serde(rename = "type")]
    pub kind: LabelKind,
    #[serde(default)]
    pub category: Vec<usize>,
    /// Attribute index -> selected value indices.
    #[serde(default)]
    pub attributes: BTreeMap<usize, Vec<usize>>,
    #[serde(default)]
    pub shapes: Vec<ShapeId>,
    #[serde(default)]
    pub track: Option<TrackId>,
    #[serde(default)]
    pub order: u64,
    #[serde(default = "default_manual")]
    pub manual: bool,
}

fn default_manual() -> bool {
    true
}

impl LabelType {
    pub fn new(id: impl Into<LabelId>, item: usize, kind: LabelKind) -> Self {
        Self {
            id: id.into(),
            item,
            kind,
            category: Vec::new(),
            attributes: BTreeMap::new(),
            shapes: Vec::new(),
            track: None,
            order: 0,
            manual: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemType {
    pub index: usize,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub loaded: bool,
    #[serde(default)]
    pub labels: BTreeMap<LabelId, LabelType>,
    #[serde(default)]
    pub shapes: BTreeMap<ShapeId, RectType>,
}

impl ItemType {
    pub fn new(index: usize, url: impl Into<String>) -> Self {
        Self {
            index,
            url: url.into(),
            ..Default::default()
        }
    }

    /// First rectangle of a label, if it has one.
    pub fn rect_of(&self, label_id: &str) -> Option<&RectType> {
        self.labels
            .get(label_id)
            .and_then(|l| l.shapes.first())
            .and_then(|sid| self.shapes.get(sid))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeTool {
    Switch,
    List,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    #[serde(rename = "toolType")]
    pub tool: AttributeTool,
    /// Values for list attributes; switches use `[off, on]` when empty.
    #[serde(default)]
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskConfig {
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default = "default_label_kinds")]
    pub label_kinds: Vec<LabelKind>,
    #[serde(default)]
    pub tracking: bool,
}

fn default_label_kinds() -> Vec<LabelKind> {
    vec![LabelKind::Box2d]
}

impl Default for TaskConfig {
    fn default() -> Self {
        Self {
            categories: Vec::new(),
            attributes: Vec::new(),
            label_kinds: default_label_kinds(),
            tracking: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskStatus {
    /// Highest `order` handed out so far.
    #[serde(default)]
    pub max_order: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskState {
    #[serde(default)]
    pub config: TaskConfig,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub items: Vec<ItemType>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Select {
    #[serde(default)]
    pub item: usize,
    /// Item index -> selected label ids.
    #[serde(default)]
    pub labels: BTreeMap<usize, Vec<LabelId>>,
    #[serde(default)]
    pub category: usize,
    #[serde(default)]
    pub attributes: BTreeMap<usize, Vec<usize>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserState {
    #[serde(default)]
    pub select: Select,
}

/// A broken link between labels and shapes, as found by [`State::check_integrity`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IntegrityViolation {
    #[error("label {label} in item {item} claims item {claimed}")]
    WrongItem {
        item: usize,
        label: LabelId,
        claimed: usize,
    },
    #[error("label {label} in item {item} references missing shape {shape}")]
    MissingShape {
        item: usize,
        label: LabelId,
        shape: ShapeId,
    },
    #[error("shape {shape} in item {item} does not list label {label}")]
    MissingBackReference {
        item: usize,
        label: LabelId,
        shape: ShapeId,
    },
    #[error("shape {shape} in item {item} lists missing label {label}")]
    MissingLabel {
        item: usize,
        shape: ShapeId,
        label: LabelId,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct State {
    pub task: TaskState,
    #[serde(default)]
    pub user: UserState,
}

impl State {
    pub fn current_item(&self) -> Option<&ItemType> {
        self.task.items.get(self.user.select.item)
    }

    /// Selected label ids in the current item.
    pub fn selected_labels(&self) -> &[LabelId] {
        self.user
            .select
            .labels
            .get(&self.user.select.item)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Check that labels and shapes reference each other consistently.
    /// Returns one entry per violation.
    pub fn check_integrity(&self) -> Vec<IntegrityViolation> {
        let mut problems = Vec::new();
        for item in &self.task.items {
            for label in item.labels.values() {
                if label.item != item.index {
                    problems.push(IntegrityViolation::WrongItem {
                        item: item.index,
                        label: label.id.clone(),
                        claimed: label.item,
                    });
                }
                for sid in &label.shapes {
                    match item.shapes.get(sid) {
                        None => problems.push(IntegrityViolation::MissingShape {
                            item: item.index,
                            label: label.id.clone(),
                            shape: sid.clone(),
                        }),
                        Some(shape) if !shape.label.contains(&label.id) => {
                            problems.push(IntegrityViolation::MissingBackReference {
                                item: item.index,
                                label: label.id.clone(),
                                shape: sid.clone(),
                            })
                        }
                        Some(_) => {}
                    }
                }
            }
            for shape in item.shapes.values() {
                for lid in &shape.label {
                    if !item.labels.contains_key(lid) {
                        problems.push(IntegrityViolation::MissingLabel {
                            item: item.index,
                            shape: shape.id.clone(),
                            label: lid.clone(),
                        });
                    }
                }
            }
        }
        problems
    }
}
