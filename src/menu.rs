//! Context menu view-model: category selection and the attribute panel.
//!
//! The menu acts on the selected labels of the current item. Choosing a category or attribute
//! value also becomes the default for boxes drawn afterwards.

use crate::error::{EditorError, Result};
use crate::state::action::{change_selected_labels_attribute, change_selected_labels_categories};
use crate::state::{Action, AttributeTool, LabelType, SelectChange, State, Store};
use std::collections::BTreeMap;
use tracing::debug;

/// One row of the attribute panel.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeRow {
    pub index: usize,
    pub name: String,
    pub tool: AttributeTool,
    pub values: Vec<String>,
    pub selected: Vec<usize>,
}

impl AttributeRow {
    pub fn is_on(&self) -> bool {
        self.selected.first().is_some_and(|v| *v > 0)
    }

    pub fn current_value(&self) -> Option<&str> {
        self.selected
            .first()
            .and_then(|v| self.values.get(*v))
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ContextMenu {
    attributes_expanded: bool,
}

impl ContextMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn categories(state: &State) -> &[String] {
        &state.task.config.categories
    }

    /// The category menu only works on a selection.
    pub fn is_enabled(state: &State) -> bool {
        !state.selected_labels().is_empty()
    }

    pub fn selected_label(state: &State) -> Option<&LabelType> {
        let item = state.current_item()?;
        state
            .selected_labels()
            .iter()
            .find_map(|id| item.labels.get(id))
    }

    /// Category shown in the menu: the selected label's first category.
    pub fn current_category(state: &State) -> Option<&str> {
        let label = Self::selected_label(state)?;
        let index = *label.category.first()?;
        state.task.config.categories.get(index).map(String::as_str)
    }

    pub fn on_category_selected(store: &mut Store, name: &str) -> Result<()> {
        let state = store.state();
        let category = state
            .task
            .config
            .categories
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| EditorError::UnknownCategory(name.to_string()))?;
        debug!(category = name, "category selected");

        let select = Action::ChangeSelect(SelectChange {
            category: Some(category),
            ..Default::default()
        });
        if state.selected_labels().is_empty() {
            store.dispatch(select)
        } else {
            store.dispatch(Action::Sequential(vec![
                select,
                change_selected_labels_categories(&state, vec![category]),
            ]))
        }
    }

    /// Rows for every configured attribute. Values come from the selected label, or from the
    /// defaults for new labels when nothing is selected.
    pub fn attribute_rows(state: &State) -> Vec<AttributeRow> {
        let current = Self::current_attributes(state);
        state
            .task
            .config
            .attributes
            .iter()
            .enumerate()
            .map(|(index, attribute)| AttributeRow {
                index,
                name: attribute.name.clone(),
                tool: attribute.tool,
                values: attribute.values.clone(),
                selected: current.get(&index).cloned().unwrap_or_default(),
            })
            .collect()
    }

    pub fn toggle_switch(store: &mut Store, attribute: usize) -> Result<()> {
        let state = store.state();
        let on = Self::attribute_rows(&state)
            .get(attribute)
            .filter(|row| row.tool == AttributeTool::Switch)
            .ok_or(EditorError::UnknownAttribute(attribute))?
            .is_on();
        Self::set_attribute(store, &state, attribute, if on { 0 } else { 1 })
    }

    pub fn select_value(store: &mut Store, attribute: usize, value: usize) -> Result<()> {
        let state = store.state();
        let row = Self::attribute_rows(&state)
            .into_iter()
            .nth(attribute)
            .ok_or(EditorError::UnknownAttribute(attribute))?;
        if row.tool != AttributeTool::List || value >= row.values.len() {
            return Err(EditorError::UnknownAttribute(attribute));
        }
        Self::set_attribute(store, &state, attribute, value)
    }

    pub fn is_attributes_expanded(&self) -> bool {
        self.attributes_expanded
    }

    pub fn toggle_attributes_panel(&mut self) {
        self.attributes_expanded = !self.attributes_expanded;
    }

    fn current_attributes(state: &State) -> BTreeMap<usize, Vec<usize>> {
        match Self::selected_label(state) {
            Some(label) => label.attributes.clone(),
            None => state.user.select.attributes.clone(),
        }
    }

    fn set_attribute(store: &mut Store, state: &State, attribute: usize, value: usize) -> Result<()> {
        let mut defaults = state.user.select.attributes.clone();
        defaults.insert(attribute, vec![value]);
        let select = Action::ChangeSelect(SelectChange {
            attributes: Some(defaults),
            ..Default::default()
        });
        if state.selected_labels().is_empty() {
            store.dispatch(select)
        } else {
            store.dispatch(Action::Sequential(vec![
                select,
                change_selected_labels_attribute(state, attribute, vec![value]),
            ]))
        }
    }
}
