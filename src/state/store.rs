//! The store owning the current state snapshot, its undo history and subscribers.

use crate::error::Result;
use crate::state::action::Action;
use crate::state::reducer::reduce;
use crate::state::types::State;
use std::collections::VecDeque;
use std::rc::Rc;
use tracing::{debug, warn};

/// What produced a new snapshot, as told to subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    /// A dispatched action that edits annotations.
    Edit,
    /// A dispatched action that only moves the user around (selection, navigation, loading).
    Navigation,
    Undo,
    Redo,
}

impl Change {
    /// Whether the annotations may differ from the previous snapshot.
    pub fn is_edit(self) -> bool {
        self != Change::Navigation
    }
}

pub type Listener = Box<dyn Fn(&State, Change)>;

pub const DEFAULT_UNDO_DEPTH: usize = 50;

pub struct Store {
    state: Rc<State>,
    undo: VecDeque<Rc<State>>,
    redo: Vec<Rc<State>>,
    undo_depth: usize,
    listeners: Vec<Listener>,
}

impl Store {
    pub fn new(state: State) -> Self {
        Self::with_undo_depth(state, DEFAULT_UNDO_DEPTH)
    }

    pub fn with_undo_depth(state: State, undo_depth: usize) -> Self {
        Self {
            state: Rc::new(state),
            undo: VecDeque::new(),
            redo: Vec::new(),
            undo_depth,
            listeners: Vec::new(),
        }
    }

    /// Current snapshot. Later dispatches never mutate a returned snapshot.
    pub fn state(&self) -> Rc<State> {
        Rc::clone(&self.state)
    }

    pub fn dispatch(&mut self, action: Action) -> Result<()> {
        let next = match reduce(&self.state, &action) {
            Ok(next) => next,
            Err(e) => {
                warn!(action = action.name(), error = %e, "action rejected");
                return Err(e);
            }
        };
        debug!(action = action.name(), "dispatched");

        let previous = std::mem::replace(&mut self.state, Rc::new(next));
        let change = if action.is_edit() {
            self.push_undo(previous);
            self.redo.clear();
            Change::Edit
        } else {
            Change::Navigation
        };
        self.notify(change);
        Ok(())
    }

    pub fn subscribe(&mut self, listener: impl Fn(&State, Change) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Restore the annotations from before the last edit. Returns false if there is nothing
    /// to undo. The user's position in the task is kept.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.undo.pop_back() else {
            return false;
        };
        let restored = self.restore(&previous);
        let current = std::mem::replace(&mut self.state, restored);
        self.redo.push(current);
        self.notify(Change::Undo);
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(next) = self.redo.pop() else {
            return false;
        };
        let restored = self.restore(&next);
        let current = std::mem::replace(&mut self.state, restored);
        self.push_undo(current);
        self.notify(Change::Redo);
        true
    }

    fn push_undo(&mut self, snapshot: Rc<State>) {
        self.undo.push_back(snapshot);
        while self.undo.len() > self.undo_depth {
            self.undo.pop_front();
        }
    }

    /// Take the task from `snapshot` and the user state from the current snapshot, dropping
    /// selections of labels that no longer exist.
    fn restore(&self, snapshot: &State) -> Rc<State> {
        let mut restored = State {
            task: snapshot.task.clone(),
            user: self.state.user.clone(),
        };
        let items = &restored.task.items;
        restored.user.select.labels.retain(|item, ids| {
            if let Some(item) = items.get(*item) {
                ids.retain(|id| item.labels.contains_key(id));
                !ids.is_empty()
            } else {
                false
            }
        });
        Rc::new(restored)
    }

    fn notify(&self, change: Change) {
        for listener in &self.listeners {
            listener(&self.state, change);
        }
    }
}
