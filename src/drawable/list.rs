use crate::drawable::box2d::{Box2DLabel, Handle};
use crate::math::Vector2D;
use crate::state::{LabelKind, State};

/// Drawables for the labels of the current item, in drawing order.
#[derive(Debug, Clone, Default)]
pub struct Label2DList {
    labels: Vec<Box2DLabel>,
}

impl Label2DList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from the current item of `state`. Uncommitted labels are dropped.
    pub fn update_state(&mut self, state: &State) {
        self.labels.clear();
        let Some(item) = state.current_item() else {
            return;
        };
        let selected = state.selected_labels();

        let mut stored: Vec<_> = item.labels.values().collect();
        stored.sort_by_key(|l| l.order);
        for label in stored {
            if let Some(mut drawable) = Box2DLabel::from_state(item, label) {
                drawable.set_selected(selected.contains(&label.id));
                self.labels.push(drawable);
            }
        }
    }

    /// New drawable of `kind` for this list, or `None` for kinds that are not drawn in 2D.
    pub fn make_drawable(&self, kind: LabelKind) -> Option<Box2DLabel> {
        match kind {
            LabelKind::Box2d => Some(Box2DLabel::empty()),
            LabelKind::Tag => None,
        }
    }

    pub fn push(&mut self, label: Box2DLabel) -> usize {
        self.labels.push(label);
        self.labels.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&Box2DLabel> {
        self.labels.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Box2DLabel> {
        self.labels.get_mut(index)
    }

    pub fn position(&self, label_id: &str) -> Option<usize> {
        self.labels.iter().position(|l| l.label_id() == label_id)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Box2DLabel> {
        self.labels.iter()
    }

    pub fn labels_mut(&mut self) -> &mut [Box2DLabel] {
        &mut self.labels
    }

    pub fn selected(&self) -> impl Iterator<Item = &Box2DLabel> {
        self.labels.iter().filter(|l| l.is_selected())
    }

    /// Topmost label with a handle under `point`. Selected labels win over the rest so their
    /// handles stay reachable when boxes overlap.
    pub fn label_at(&self, point: Vector2D, radius: f32) -> Option<(usize, Handle)> {
        let hit = |selected: bool| {
            self.labels
                .iter()
                .enumerate()
                .rev()
                .filter(|(_, l)| l.is_selected() == selected)
                .find_map(|(i, l)| l.handle_at(point, radius).map(|h| (i, h)))
        };
        hit(true).or_else(|| hit(false))
    }
}
