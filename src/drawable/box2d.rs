//! Drawable 2D bounding box label and its mouse interaction.

use crate::math::{Size2D, Vector2D};
use crate::state::{ItemType, LabelId, LabelKind, LabelType, NewLabel, RectType, State, TrackId, new_id};

/// Box handles, numbered the way the canvas reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    /// The box body; dragging it moves the whole box.
    Edge = 0,
    TopLeft = 1,
    TopMiddle = 2,
    TopRight = 3,
    RightMiddle = 4,
    BottomRight = 5,
    BottomMiddle = 6,
    BottomLeft = 7,
    LeftMiddle = 8,
}

impl Handle {
    /// Resize handles in hit-test order: corners before edge midpoints.
    pub const RESIZE: [Handle; 8] = [
        Handle::TopLeft,
        Handle::TopRight,
        Handle::BottomRight,
        Handle::BottomLeft,
        Handle::TopMiddle,
        Handle::RightMiddle,
        Handle::BottomMiddle,
        Handle::LeftMiddle,
    ];

    pub fn from_index(index: usize) -> Option<Handle> {
        match index {
            0 => Some(Handle::Edge),
            1 => Some(Handle::TopLeft),
            2 => Some(Handle::TopMiddle),
            3 => Some(Handle::TopRight),
            4 => Some(Handle::RightMiddle),
            5 => Some(Handle::BottomRight),
            6 => Some(Handle::BottomMiddle),
            7 => Some(Handle::BottomLeft),
            8 => Some(Handle::LeftMiddle),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    fn mirror_x(self) -> Handle {
        match self {
            Handle::TopLeft => Handle::TopRight,
            Handle::TopRight => Handle::TopLeft,
            Handle::BottomLeft => Handle::BottomRight,
            Handle::BottomRight => Handle::BottomLeft,
            Handle::LeftMiddle => Handle::RightMiddle,
            Handle::RightMiddle => Handle::LeftMiddle,
            other => other,
        }
    }

    fn mirror_y(self) -> Handle {
        match self {
            Handle::TopLeft => Handle::BottomLeft,
            Handle::BottomLeft => Handle::TopLeft,
            Handle::TopRight => Handle::BottomRight,
            Handle::BottomRight => Handle::TopRight,
            Handle::TopMiddle => Handle::BottomMiddle,
            Handle::BottomMiddle => Handle::TopMiddle,
            other => other,
        }
    }
}

/// Where a drag started.
#[derive(Debug, Clone)]
struct DragStart {
    coord: Vector2D,
    rect: RectType,
}

/// A box2d label as the canvas sees it: the stored label plus interaction state.
#[derive(Debug, Clone)]
pub struct Box2DLabel {
    label: LabelType,
    rect: RectType,
    temp: bool,
    selected: bool,
    highlighted: bool,
    handle: Handle,
    drag: Option<DragStart>,
    dirty: bool,
}

impl Box2DLabel {
    pub(crate) fn empty() -> Self {
        Self {
            label: LabelType::new(String::new(), 0, LabelKind::Box2d),
            rect: RectType::new(String::new(), 0.0, 0.0, 0.0, 0.0),
            temp: false,
            selected: false,
            highlighted: false,
            handle: Handle::Edge,
            drag: None,
            dirty: false,
        }
    }

    /// Drawable for a stored label. `None` if the label is not a box or its rect is missing.
    pub fn from_state(item: &ItemType, label: &LabelType) -> Option<Self> {
        if label.kind != LabelKind::Box2d {
            return None;
        }
        let rect = item.rect_of(&label.id)?.clone();
        Some(Self {
            label: label.clone(),
            rect,
            ..Self::empty()
        })
    }

    /// Turn this into a new, uncommitted label anchored at `start` in the selected item, using
    /// the selected category and attributes.
    pub fn init_temp(&mut self, state: &State, start: Vector2D) {
        let select = &state.user.select;
        let mut label = LabelType::new(new_id(), select.item, LabelKind::Box2d);
        if !state.task.config.categories.is_empty() {
            label.category = vec![select.category];
        }
        label.attributes = select.attributes.clone();
        label.order = state.task.status.max_order + 1;

        let rect = RectType::new(new_id(), start.x, start.y, start.x, start.y);
        label.shapes = vec![rect.id.clone()];

        self.label = label;
        self.rect = rect;
        self.temp = true;
        self.selected = true;
        self.highlighted = true;
        self.handle = Handle::BottomRight;
        self.drag = None;
        self.dirty = false;
    }

    pub fn label_id(&self) -> &LabelId {
        &self.label.id
    }

    pub fn label(&self) -> &LabelType {
        &self.label
    }

    pub fn item(&self) -> usize {
        self.label.item
    }

    pub fn track(&self) -> Option<&TrackId> {
        self.label.track.as_ref()
    }

    pub fn rect(&self) -> &RectType {
        &self.rect
    }

    pub fn is_temp(&self) -> bool {
        self.temp
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    pub fn highlighted_handle(&self) -> Option<Handle> {
        self.highlighted.then_some(self.handle)
    }

    /// Geometry changed since the last commit.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_editing(&self) -> bool {
        self.drag.is_some()
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    /// Highlight (or clear) the label; `handle_index` picks the handle that a drag will move.
    pub fn set_highlighted(&mut self, highlighted: bool, handle_index: usize) {
        self.highlighted = highlighted;
        self.handle = if highlighted {
            Handle::from_index(handle_index).unwrap_or(Handle::Edge)
        } else {
            Handle::Edge
        };
    }

    /// Start an edit on the handle at `handle_index`. Only a highlighted label reacts; an
    /// index that names no handle keeps the highlighted one.
    pub fn on_mouse_down(&mut self, coord: Vector2D, handle_index: usize) -> bool {
        if !self.highlighted {
            return false;
        }
        if let Some(handle) = Handle::from_index(handle_index) {
            self.handle = handle;
        }
        self.drag = Some(DragStart {
            coord,
            rect: self.rect.clone(),
        });
        true
    }

    /// Move the highlighted handle (or the whole box) while the mouse is down. The pointer is
    /// kept inside `limit`.
    pub fn on_mouse_move(&mut self, coord: Vector2D, limit: Size2D) -> bool {
        let Some(drag) = &self.drag else {
            return false;
        };
        let coord = coord.clamp_to(limit);
        let before = self.rect.clone();

        if self.handle == Handle::Edge {
            let start = &drag.rect;
            let delta = coord - drag.coord;
            let dx = delta.x.clamp(-start.x1, (limit.width - start.x2).max(-start.x1));
            let dy = delta.y.clamp(-start.y1, (limit.height - start.y2).max(-start.y1));
            self.rect.x1 = start.x1 + dx;
            self.rect.x2 = start.x2 + dx;
            self.rect.y1 = start.y1 + dy;
            self.rect.y2 = start.y2 + dy;
        } else {
            self.resize(coord);
        }

        if !self.rect.same_geometry(&before) {
            self.dirty = true;
        }
        true
    }

    fn resize(&mut self, coord: Vector2D) {
        let rect = &mut self.rect;
        match self.handle {
            Handle::TopLeft => {
                rect.x1 = coord.x;
                rect.y1 = coord.y;
            }
            Handle::TopMiddle => rect.y1 = coord.y,
            Handle::TopRight => {
                rect.x2 = coord.x;
                rect.y1 = coord.y;
            }
            Handle::RightMiddle => rect.x2 = coord.x,
            Handle::BottomRight => {
                rect.x2 = coord.x;
                rect.y2 = coord.y;
            }
            Handle::BottomMiddle => rect.y2 = coord.y,
            Handle::BottomLeft => {
                rect.x1 = coord.x;
                rect.y2 = coord.y;
            }
            Handle::LeftMiddle => rect.x1 = coord.x,
            Handle::Edge => {}
        }

        // Dragging past the opposite side flips the box; keep following the pointer
        // with the mirrored handle.
        if rect.x1 > rect.x2 {
            std::mem::swap(&mut rect.x1, &mut rect.x2);
            self.handle = self.handle.mirror_x();
        }
        if rect.y1 > rect.y2 {
            std::mem::swap(&mut rect.y1, &mut rect.y2);
            self.handle = self.handle.mirror_y();
        }
    }

    pub fn on_mouse_up(&mut self, _coord: Vector2D) -> bool {
        self.drag.take().is_some()
    }

    pub fn is_valid(&self, min_area: f32) -> bool {
        self.rect.area() >= min_area
    }

    pub fn handle_position(&self, handle: Handle) -> Vector2D {
        let r = &self.rect;
        let mid_x = (r.x1 + r.x2) / 2.0;
        let mid_y = (r.y1 + r.y2) / 2.0;
        match handle {
            Handle::Edge => Vector2D::new(mid_x, mid_y),
            Handle::TopLeft => Vector2D::new(r.x1, r.y1),
            Handle::TopMiddle => Vector2D::new(mid_x, r.y1),
            Handle::TopRight => Vector2D::new(r.x2, r.y1),
            Handle::RightMiddle => Vector2D::new(r.x2, mid_y),
            Handle::BottomRight => Vector2D::new(r.x2, r.y2),
            Handle::BottomMiddle => Vector2D::new(mid_x, r.y2),
            Handle::BottomLeft => Vector2D::new(r.x1, r.y2),
            Handle::LeftMiddle => Vector2D::new(r.x1, mid_y),
        }
    }

    /// Handle under `point`, falling back to the body when the point is inside the box.
    pub fn handle_at(&self, point: Vector2D, radius: f32) -> Option<Handle> {
        if let Some(handle) = Handle::RESIZE
            .iter()
            .copied()
            .find(|h| self.handle_position(*h).distance_to(point) <= radius)
        {
            return Some(handle);
        }
        let r = &self.rect;
        let inside = point.x >= r.x1 && point.x <= r.x2 && point.y >= r.y1 && point.y <= r.y2;
        inside.then_some(Handle::Edge)
    }

    pub(crate) fn to_new_label(&self) -> NewLabel {
        NewLabel {
            label: self.label.clone(),
            shapes: vec![self.rect.clone()],
        }
    }

    /// Copy for another item of the same track, with fresh label and shape ids.
    pub(crate) fn to_track_copy(&self, item: usize) -> NewLabel {
        let mut label = self.label.clone();
        label.id = new_id();
        label.item = item;
        let mut rect = self.rect.clone();
        rect.id = new_id();
        rect.label = vec![label.id.clone()];
        label.shapes = vec![rect.id.clone()];
        NewLabel {
            label,
            shapes: vec![rect],
        }
    }

    pub(crate) fn mark_committed(&mut self) {
        self.temp = false;
        self.dirty = false;
    }
}
