// Shared fixtures for integration tests
#![allow(dead_code)]

use label_editor::math::{Size2D, Vector2D};
use label_editor::state::{
    Attribute, AttributeTool, ItemType, LabelKind, LabelType, RectType, State, Store,
};

pub const MIN_AREA: f32 = 10.0;
pub const CANVAS: Size2D = Size2D {
    width: 1000.0,
    height: 1000.0,
};

pub fn v(x: f32, y: f32) -> Vector2D {
    Vector2D::new(x, y)
}

fn boxed(item: &mut ItemType, id: &str, order: u64, category: usize, corners: [f32; 4]) {
    let shape_id = format!("{id}-shape");
    let mut label = LabelType::new(id, item.index, LabelKind::Box2d);
    label.category = vec![category];
    label.order = order;
    label.shapes = vec![shape_id.clone()];
    let mut rect = RectType::new(shape_id.clone(), corners[0], corners[1], corners[2], corners[3]);
    rect.label = vec![id.to_string()];
    item.labels.insert(id.to_string(), label);
    item.shapes.insert(shape_id, rect);
}

/// Three items; the first holds three boxes, label "1" spans [459, 276] to [752, 400].
pub fn sample_state() -> State {
    let mut state = State::default();
    state.task.config.categories = vec![
        "person".into(),
        "rider".into(),
        "car".into(),
        "truck".into(),
    ];
    state.task.config.attributes = vec![
        Attribute {
            name: "Occluded".into(),
            tool: AttributeTool::Switch,
            values: Vec::new(),
        },
        Attribute {
            name: "Truncated".into(),
            tool: AttributeTool::Switch,
            values: Vec::new(),
        },
        Attribute {
            name: "Traffic Light Color".into(),
            tool: AttributeTool::List,
            values: vec!["N/A".into(), "red".into(), "yellow".into(), "green".into()],
        },
    ];

    let mut first = ItemType::new(0, "frame-0.jpg");
    boxed(&mut first, "0", 0, 2, [100.0, 120.0, 300.0, 260.0]);
    boxed(&mut first, "1", 1, 0, [459.0, 276.0, 752.0, 400.0]);
    boxed(&mut first, "2", 2, 3, [800.0, 500.0, 950.0, 640.0]);
    first.loaded = true;

    state.task.items = vec![
        first,
        ItemType::new(1, "frame-1.jpg"),
        ItemType::new(2, "frame-2.jpg"),
    ];
    state.task.status.max_order = 2;
    state
}

pub fn sample_store() -> Store {
    Store::new(sample_state())
}
