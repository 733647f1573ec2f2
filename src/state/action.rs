//! Actions understood by the reducer, plus builders for the common selection edits.

use crate::state::types::{LabelId, LabelType, RectType, State, TrackId};
use std::collections::BTreeMap;

/// A label to insert together with the shapes it owns.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLabel {
    pub label: LabelType,
    pub shapes: Vec<RectType>,
}

/// Category / attribute update for one label. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelChange {
    pub id: LabelId,
    pub category: Option<Vec<usize>>,
    pub attributes: Option<BTreeMap<usize, Vec<usize>>>,
}

/// Partial update of the user selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectChange {
    pub item: Option<usize>,
    pub labels: Option<BTreeMap<usize, Vec<LabelId>>>,
    pub category: Option<usize>,
    pub attributes: Option<BTreeMap<usize, Vec<usize>>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    LoadItem {
        item: usize,
    },
    GoToItem {
        item: usize,
    },
    AddLabels {
        item: usize,
        labels: Vec<NewLabel>,
    },
    /// `labels[i]` goes into `items[i]`, all sharing `track`.
    AddTrack {
        track: TrackId,
        items: Vec<usize>,
        labels: Vec<NewLabel>,
    },
    ChangeShapes {
        item: usize,
        shapes: Vec<RectType>,
    },
    ChangeLabels {
        item: usize,
        changes: Vec<LabelChange>,
    },
    DeleteLabels {
        item: usize,
        ids: Vec<LabelId>,
    },
    /// Remove the track labels in `item` and every later item.
    TerminateTracks {
        item: usize,
        tracks: Vec<TrackId>,
    },
    ChangeSelect(SelectChange),
    Sequential(Vec<Action>),
}

impl Action {
    /// Whether the action edits annotations (and so belongs in undo history).
    pub fn is_edit(&self) -> bool {
        match self {
            Action::LoadItem { .. } | Action::GoToItem { .. } | Action::ChangeSelect(_) => false,
            Action::Sequential(actions) => actions.iter().any(Action::is_edit),
            _ => true,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Action::LoadItem { .. } => "load_item",
            Action::GoToItem { .. } => "go_to_item",
            Action::AddLabels { .. } => "add_labels",
            Action::AddTrack { .. } => "add_track",
            Action::ChangeShapes { .. } => "change_shapes",
            Action::ChangeLabels { .. } => "change_labels",
            Action::DeleteLabels { .. } => "delete_labels",
            Action::TerminateTracks { .. } => "terminate_tracks",
            Action::ChangeSelect(_) => "change_select",
            Action::Sequential(_) => "sequential",
        }
    }
}

pub fn change_select(change: SelectChange) -> Action {
    Action::ChangeSelect(change)
}

/// Select exactly `ids` in the current item.
pub fn select_labels(state: &State, ids: Vec<LabelId>) -> Action {
    let mut labels = BTreeMap::new();
    if !ids.is_empty() {
        labels.insert(state.user.select.item, ids);
    }
    Action::ChangeSelect(SelectChange {
        labels: Some(labels),
        ..Default::default()
    })
}

/// Set `categories` on every selected label of the current item.
pub fn change_selected_labels_categories(state: &State, categories: Vec<usize>) -> Action {
    let changes = state
        .selected_labels()
        .iter()
        .map(|id| LabelChange {
            id: id.clone(),
            category: Some(categories.clone()),
            attributes: None,
        })
        .collect();
    Action::ChangeLabels {
        item: state.user.select.item,
        changes,
    }
}

/// Set one attribute on every selected label of the current item, keeping their other
/// attributes.
pub fn change_selected_labels_attribute(state: &State, attribute: usize, values: Vec<usize>) -> Action {
    let item = state.current_item();
    let changes = state
        .selected_labels()
        .iter()
        .map(|id| {
            let mut attributes = item
                .and_then(|i| i.labels.get(id))
                .map(|l| l.attributes.clone())
                .unwrap_or_default();
            attributes.insert(attribute, values.clone());
            LabelChange {
                id: id.clone(),
                category: None,
                attributes: Some(attributes),
            }
        })
        .collect();
    Action::ChangeLabels {
        item: state.user.select.item,
        changes,
    }
}

/// Delete the selected labels of the current item.
pub fn delete_selected_labels(state: &State) -> Action {
    Action::DeleteLabels {
        item: state.user.select.item,
        ids: state.selected_labels().to_vec(),
    }
}
