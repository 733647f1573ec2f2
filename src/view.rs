//! Pushes the session's state into the window properties.

use crate::session::Session;
use crate::utils::{parse_color, placeholder_image};
use crate::{AppWindow, AttributeItem, LabelBox};
use label_editor::menu::ContextMenu;
use label_editor::math::Size2D;
use label_editor::state::{Action, AttributeTool};
use slint::{ModelRc, SharedString, VecModel};
use std::path::Path;
use tracing::warn;

fn string_model(values: &[String]) -> ModelRc<SharedString> {
    let items: Vec<SharedString> = values.iter().map(|v| SharedString::from(v.as_str())).collect();
    ModelRc::new(VecModel::from(items))
}

/// Re-render labels, the context menu and the status line.
pub fn refresh(ui: &AppWindow, session: &Session) {
    let state = session.store.state();
    let categories = &state.task.config.categories;

    let boxes: Vec<LabelBox> = session
        .handler
        .labels()
        .iter()
        .map(|label| {
            let rect = label.rect();
            let category = label.label().category.first().copied();
            let name = category
                .and_then(|c| categories.get(c))
                .cloned()
                .unwrap_or_default();
            let color = parse_color(&session.schema.category_color(&name, category.unwrap_or(0)))
                .unwrap_or_else(|| slint::Color::from_rgb_u8(255, 255, 255));
            LabelBox {
                id: label.label_id().as_str().into(),
                x: rect.x1.min(rect.x2),
                y: rect.y1.min(rect.y2),
                width: rect.width(),
                height: rect.height(),
                selected: label.is_selected(),
                highlighted: label.is_highlighted(),
                color,
                caption: name.into(),
            }
        })
        .collect();
    ui.set_labels(ModelRc::new(VecModel::from(boxes)));

    ui.set_categories(string_model(categories));
    let current = ContextMenu::current_category(&state)
        .or_else(|| categories.get(state.user.select.category).map(String::as_str))
        .unwrap_or("");
    ui.set_current_category(current.into());
    ui.set_category_enabled(ContextMenu::is_enabled(&state));

    let rows: Vec<AttributeItem> = ContextMenu::attribute_rows(&state)
        .iter()
        .map(|row| AttributeItem {
            index: row.index as i32,
            name: row.name.as_str().into(),
            is_switch: row.tool == AttributeTool::Switch,
            on: row.is_on(),
            values: string_model(&row.values),
            current_value: row.current_value().unwrap_or("").into(),
        })
        .collect();
    ui.set_attributes(ModelRc::new(VecModel::from(rows)));
    ui.set_attributes_expanded(session.menu.is_attributes_expanded());

    let position = match state.current_item() {
        Some(item) => {
            let name = Path::new(&item.url)
                .file_name()
                .and_then(|f| f.to_str())
                .unwrap_or("?");
            format!("{} / {}  {}", item.index + 1, state.task.items.len(), name)
        }
        None => "No items".to_string(),
    };
    ui.set_item_position(position.into());
    ui.set_modified(session.modified.get());
}

/// Display the current item: load its image, mark it loaded and redraw.
pub fn show_item(ui: &AppWindow, session: &mut Session) {
    let state = session.store.state();
    let Some(item) = state.current_item() else {
        ui.set_image_source(placeholder_image());
        session.image_size = Size2D::new(640.0, 480.0);
        refresh(ui, session);
        return;
    };

    let path = session.image_path(&item.url);
    let image = match slint::Image::load_from_path(&path) {
        Ok(image) => {
            ui.set_status_text(format!("Loaded {}", path.display()).into());
            image
        }
        Err(_) => {
            warn!(path = %path.display(), "image not found");
            ui.set_status_text(format!("Image not found: {}", path.display()).into());
            placeholder_image()
        }
    };
    let size = image.size();
    session.image_size = Size2D::new(size.width as f32, size.height as f32);
    ui.set_image_source(image);

    if !item.loaded {
        if let Err(e) = session.store.dispatch(Action::LoadItem { item: item.index }) {
            warn!(error = %e, "failed to mark item loaded");
        }
    }
    session.handler.update_state(&session.store.state());
    refresh(ui, session);
}
