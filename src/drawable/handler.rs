//! Canvas-level input handling: turns pointer and key events into label edits.

use crate::config::EditorConfig;
use crate::drawable::box2d::Handle;
use crate::drawable::commit::commit_2d_labels;
use crate::drawable::list::Label2DList;
use crate::error::Result;
use crate::math::{Size2D, Vector2D};
use crate::state::action::{delete_selected_labels, select_labels};
use crate::state::{LabelKind, State, Store};
use tracing::debug;

pub struct Label2DHandler {
    list: Label2DList,
    /// Index into `list` of the label being dragged.
    editing: Option<usize>,
    highlighted: Option<(usize, Handle)>,
    min_area: f32,
    handle_radius: f32,
}

impl Label2DHandler {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            list: Label2DList::new(),
            editing: None,
            highlighted: None,
            min_area: config.min_box_area,
            handle_radius: config.handle_radius,
        }
    }

    pub fn labels(&self) -> &Label2DList {
        &self.list
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Re-read the current item. Ignored mid-drag so the edited label is not lost.
    pub fn update_state(&mut self, state: &State) {
        if self.editing.is_some() {
            return;
        }
        self.list.update_state(state);
        self.highlighted = None;
    }

    /// Press on the canvas. A highlighted label gets selected (`multi` toggles it instead) and
    /// starts a drag; empty canvas clears the selection and starts a new box.
    pub fn on_mouse_down(&mut self, store: &mut Store, coord: Vector2D, multi: bool) -> Result<bool> {
        if self.editing.is_some() {
            return Ok(false);
        }
        self.set_highlight(self.list.label_at(coord, self.handle_radius));

        let state = store.state();
        match self.highlighted {
            Some((index, handle)) => {
                let Some(label) = self.list.get(index) else {
                    return Ok(false);
                };
                let id = label.label_id().clone();
                let mut selection = state.selected_labels().to_vec();
                let was_selected = selection.contains(&id);
                if multi {
                    if was_selected {
                        selection.retain(|l| l != &id);
                    } else {
                        selection.push(id.clone());
                    }
                } else if !was_selected {
                    selection = vec![id.clone()];
                }
                store.dispatch(select_labels(&state, selection))?;
                self.list.update_state(&store.state());

                if multi && was_selected {
                    self.highlighted = None;
                    return Ok(true);
                }
                let Some(index) = self.list.position(&id) else {
                    return Ok(true);
                };
                self.set_highlight(Some((index, handle)));
                if let Some(label) = self.list.get_mut(index) {
                    label.on_mouse_down(coord, handle.index());
                    self.editing = Some(index);
                }
                Ok(true)
            }
            None => {
                if !state.task.config.label_kinds.contains(&LabelKind::Box2d) {
                    return Ok(false);
                }
                if !state.selected_labels().is_empty() {
                    store.dispatch(select_labels(&state, Vec::new()))?;
                    self.list.update_state(&store.state());
                }
                let Some(mut label) = self.list.make_drawable(LabelKind::Box2d) else {
                    return Ok(false);
                };
                label.init_temp(&store.state(), coord);
                label.on_mouse_down(coord, Handle::BottomRight.index());
                debug!(label = %label.label_id(), x = coord.x, y = coord.y, "start new box");
                let index = self.list.push(label);
                self.highlighted = Some((index, Handle::BottomRight));
                self.editing = Some(index);
                Ok(true)
            }
        }
    }

    /// Pointer moved. Drags the edited label, otherwise updates the hover highlight.
    /// Returns whether anything visible changed.
    pub fn on_mouse_move(&mut self, coord: Vector2D, limit: Size2D) -> bool {
        if let Some(index) = self.editing {
            return self
                .list
                .get_mut(index)
                .is_some_and(|l| l.on_mouse_move(coord, limit));
        }
        let hit = self.list.label_at(coord, self.handle_radius);
        if hit == self.highlighted {
            return false;
        }
        self.set_highlight(hit);
        true
    }

    /// Release. Commits the edited label and reloads the list from the store.
    pub fn on_mouse_up(&mut self, store: &mut Store, coord: Vector2D) -> Result<bool> {
        let Some(index) = self.editing.take() else {
            return Ok(false);
        };
        let tracking = store.state().task.config.tracking;
        let mut added = None;
        if let Some(label) = self.list.get_mut(index) {
            label.on_mouse_up(coord);
            if label.is_temp() && label.is_dirty() && label.is_valid(self.min_area) {
                added = Some(label.label_id().clone());
            }
        }

        let result = commit_2d_labels(
            store,
            &mut self.list.labels_mut()[index..=index],
            tracking,
            self.min_area,
        );
        if result.is_ok() {
            if let Some(id) = added {
                let state = store.state();
                store.dispatch(select_labels(&state, vec![id]))?;
            }
        }
        self.list.update_state(&store.state());
        self.highlighted = None;
        result.map(|_| true)
    }

    /// Key press on the canvas: Delete/Backspace removes the selection, Escape clears it.
    pub fn on_key_down(&mut self, store: &mut Store, key: &str) -> Result<bool> {
        if self.editing.is_some() {
            return Ok(false);
        }
        let state = store.state();
        if state.selected_labels().is_empty() {
            return Ok(false);
        }
        match key {
            "Delete" | "Backspace" => store.dispatch(delete_selected_labels(&state))?,
            "Escape" => store.dispatch(select_labels(&state, Vec::new()))?,
            _ => return Ok(false),
        }
        self.list.update_state(&store.state());
        self.highlighted = None;
        Ok(true)
    }

    fn set_highlight(&mut self, hit: Option<(usize, Handle)>) {
        if let Some((old, _)) = self.highlighted.take() {
            if let Some(label) = self.list.get_mut(old) {
                label.set_highlighted(false, 0);
            }
        }
        if let Some((index, handle)) = hit {
            if let Some(label) = self.list.get_mut(index) {
                label.set_highlighted(true, handle.index());
                self.highlighted = hit;
            }
        }
    }
}
