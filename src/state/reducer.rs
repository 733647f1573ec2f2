//! Applies actions to a state snapshot.
//!
//! The reducer never mutates its input: it works on a copy and only returns it when every
//! step succeeded and labels and shapes still reference each other, so a failed `Sequential`
//! leaves nothing half-applied.

use crate::error::{EditorError, Result};
use crate::state::action::{Action, LabelChange, NewLabel, SelectChange};
use crate::state::types::{ItemType, LabelId, RectType, State, TrackId};
use tracing::trace;

pub fn reduce(state: &State, action: &Action) -> Result<State> {
    let mut next = state.clone();
    apply(&mut next, action)?;
    if let Some(violation) = next.check_integrity().into_iter().next() {
        return Err(violation.into());
    }
    Ok(next)
}

fn apply(state: &mut State, action: &Action) -> Result<()> {
    trace!(action = action.name(), "apply");
    match action {
        Action::LoadItem { item } => {
            item_mut(state, *item)?.loaded = true;
            Ok(())
        }
        Action::GoToItem { item } => {
            item_mut(state, *item)?;
            state.user.select.item = *item;
            state.user.select.labels.clear();
            Ok(())
        }
        Action::AddLabels { item, labels } => {
            for new_label in labels {
                add_label(state, *item, new_label, None)?;
            }
            Ok(())
        }
        Action::AddTrack {
            track,
            items,
            labels,
        } => {
            if items.len() != labels.len() {
                return Err(EditorError::TrackShapeMismatch {
                    items: items.len(),
                    labels: labels.len(),
                });
            }
            for (item, new_label) in items.iter().zip(labels) {
                add_label(state, *item, new_label, Some(track))?;
            }
            Ok(())
        }
        Action::ChangeShapes { item, shapes } => change_shapes(item_mut(state, *item)?, shapes),
        Action::ChangeLabels { item, changes } => change_labels(item_mut(state, *item)?, changes),
        Action::DeleteLabels { item, ids } => {
            delete_labels(item_mut(state, *item)?, ids)?;
            deselect(state, *item, ids);
            Ok(())
        }
        Action::TerminateTracks { item, tracks } => terminate_tracks(state, *item, tracks),
        Action::ChangeSelect(change) => change_select(state, change),
        Action::Sequential(actions) => {
            for action in actions {
                apply(state, action)?;
            }
            Ok(())
        }
    }
}

fn item_mut(state: &mut State, index: usize) -> Result<&mut ItemType> {
    state
        .task
        .items
        .get_mut(index)
        .ok_or(EditorError::ItemOutOfRange(index))
}

fn add_label(
    state: &mut State,
    item_index: usize,
    new_label: &NewLabel,
    track: Option<&TrackId>,
) -> Result<()> {
    let order = state.task.status.max_order + 1;
    let item = item_mut(state, item_index)?;
    if item.labels.contains_key(&new_label.label.id) {
        return Err(EditorError::DuplicateLabel(new_label.label.id.clone()));
    }

    let mut label = new_label.label.clone();
    label.item = item_index;
    label.order = order;
    if let Some(track) = track {
        label.track = Some(track.clone());
    }
    label.shapes = new_label.shapes.iter().map(|s| s.id.clone()).collect();

    for shape in &new_label.shapes {
        let mut shape = normalized(shape);
        shape.label = vec![label.id.clone()];
        item.shapes.insert(shape.id.clone(), shape);
    }
    item.labels.insert(label.id.clone(), label);
    state.task.status.max_order = order;
    Ok(())
}

fn normalized(shape: &RectType) -> RectType {
    let mut shape = shape.clone();
    if shape.x1 > shape.x2 {
        std::mem::swap(&mut shape.x1, &mut shape.x2);
    }
    if shape.y1 > shape.y2 {
        std::mem::swap(&mut shape.y1, &mut shape.y2);
    }
    shape
}

fn change_shapes(item: &mut ItemType, shapes: &[RectType]) -> Result<()> {
    for shape in shapes {
        let index = item.index;
        let existing = item
            .shapes
            .get_mut(&shape.id)
            .ok_or_else(|| EditorError::UnknownShape {
                item: index,
                shape: shape.id.clone(),
            })?;
        let shape = normalized(shape);
        existing.x1 = shape.x1;
        existing.y1 = shape.y1;
        existing.x2 = shape.x2;
        existing.y2 = shape.y2;
    }
    Ok(())
}

fn change_labels(item: &mut ItemType, changes: &[LabelChange]) -> Result<()> {
    for change in changes {
        let index = item.index;
        let label = item
            .labels
            .get_mut(&change.id)
            .ok_or_else(|| EditorError::UnknownLabel {
                item: index,
                label: change.id.clone(),
            })?;
        if let Some(category) = &change.category {
            label.category = category.clone();
        }
        if let Some(attributes) = &change.attributes {
            label.attributes = attributes.clone();
        }
    }
    Ok(())
}

fn delete_labels(item: &mut ItemType, ids: &[LabelId]) -> Result<()> {
    for id in ids {
        let label = item
            .labels
            .remove(id)
            .ok_or_else(|| EditorError::UnknownLabel {
                item: item.index,
                label: id.clone(),
            })?;
        for sid in &label.shapes {
            let orphaned = match item.shapes.get_mut(sid) {
                Some(shape) => {
                    shape.label.retain(|l| l != id);
                    shape.label.is_empty()
                }
                None => false,
            };
            if orphaned {
                item.shapes.remove(sid);
            }
        }
    }
    Ok(())
}

fn deselect(state: &mut State, item: usize, ids: &[LabelId]) {
    if let Some(selected) = state.user.select.labels.get_mut(&item) {
        selected.retain(|id| !ids.contains(id));
        if selected.is_empty() {
            state.user.select.labels.remove(&item);
        }
    }
}

fn terminate_tracks(state: &mut State, from_item: usize, tracks: &[TrackId]) -> Result<()> {
    if from_item >= state.task.items.len() {
        return Err(EditorError::ItemOutOfRange(from_item));
    }
    for index in from_item..state.task.items.len() {
        let item = &mut state.task.items[index];
        let ids: Vec<LabelId> = item
            .labels
            .values()
            .filter(|l| l.track.as_ref().is_some_and(|t| tracks.contains(t)))
            .map(|l| l.id.clone())
            .collect();
        delete_labels(item, &ids)?;
        deselect(state, index, &ids);
    }
    Ok(())
}

fn change_select(state: &mut State, change: &SelectChange) -> Result<()> {
    if let Some(item) = change.item {
        item_mut(state, item)?;
        state.user.select.item = item;
    }
    if let Some(labels) = &change.labels {
        for (index, ids) in labels {
            let item = state
                .task
                .items
                .get(*index)
                .ok_or(EditorError::ItemOutOfRange(*index))?;
            if let Some(missing) = ids.iter().find(|id| !item.labels.contains_key(*id)) {
                return Err(EditorError::UnknownLabel {
                    item: *index,
                    label: missing.clone(),
                });
            }
        }
        state.user.select.labels = labels.clone();
    }
    if let Some(category) = change.category {
        if category >= state.task.config.categories.len() {
            return Err(EditorError::UnknownCategory(category.to_string()));
        }
        state.user.select.category = category;
    }
    if let Some(attributes) = &change.attributes {
        if let Some(bad) = attributes
            .keys()
            .find(|a| **a >= state.task.config.attributes.len())
        {
            return Err(EditorError::UnknownAttribute(*bad));
        }
        state.user.select.attributes = attributes.clone();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::types::{LabelKind, LabelType};

    fn two_items() -> State {
        let mut state = State::default();
        state.task.items = vec![ItemType::new(0, "a.jpg"), ItemType::new(1, "b.jpg")];
        state
    }

    fn boxed(id: &str, shape: &str) -> NewLabel {
        NewLabel {
            label: LabelType::new(id, 0, LabelKind::Box2d),
            shapes: vec![RectType::new(shape, 30.0, 40.0, 10.0, 20.0)],
        }
    }

    #[test]
    fn add_labels_normalizes_and_links_shapes() {
        let state = two_items();
        let next = reduce(
            &state,
            &Action::AddLabels {
                item: 0,
                labels: vec![boxed("a", "s")],
            },
        )
        .unwrap();
        let rect = next.task.items[0].rect_of("a").unwrap();
        assert_eq!((rect.x1, rect.y1, rect.x2, rect.y2), (10.0, 20.0, 30.0, 40.0));
        assert_eq!(rect.label, vec!["a".to_string()]);
        assert_eq!(next.task.items[0].labels["a"].order, 1);
        assert!(next.check_integrity().is_empty());
        // input untouched
        assert!(state.task.items[0].labels.is_empty());
    }

    #[test]
    fn failed_sequence_applies_nothing() {
        let state = two_items();
        let result = reduce(
            &state,
            &Action::Sequential(vec![
                Action::AddLabels {
                    item: 0,
                    labels: vec![boxed("a", "s")],
                },
                Action::DeleteLabels {
                    item: 0,
                    ids: vec!["missing".into()],
                },
            ]),
        );
        assert!(matches!(result, Err(EditorError::UnknownLabel { .. })));
    }

    #[test]
    fn go_to_item_checks_range_and_clears_selection() {
        let mut state = two_items();
        state.user.select.labels.insert(0, vec!["x".into()]);
        let next = reduce(&state, &Action::GoToItem { item: 1 }).unwrap();
        assert_eq!(next.user.select.item, 1);
        assert!(next.user.select.labels.is_empty());
        assert!(matches!(
            reduce(&state, &Action::GoToItem { item: 5 }),
            Err(EditorError::ItemOutOfRange(5))
        ));
    }

    #[test]
    fn broken_shape_link_is_rejected() {
        let mut state = two_items();
        let mut label = LabelType::new("a", 0, LabelKind::Box2d);
        label.shapes = vec!["gone".into()];
        state.task.items[0].labels.insert("a".into(), label);

        let result = reduce(&state, &Action::LoadItem { item: 1 });
        assert!(matches!(
            result,
            Err(EditorError::DanglingShape { label, shape }) if label == "a" && shape == "gone"
        ));
    }

    #[test]
    fn reusing_a_shape_id_is_rejected() {
        let state = reduce(
            &two_items(),
            &Action::AddLabels {
                item: 0,
                labels: vec![boxed("a", "s")],
            },
        )
        .unwrap();
        // "b" would take over shape "s" and leave "a" pointing at a shape that no longer
        // lists it.
        let result = reduce(
            &state,
            &Action::AddLabels {
                item: 0,
                labels: vec![boxed("b", "s")],
            },
        );
        assert!(matches!(result, Err(EditorError::Inconsistent(_))));
    }

    #[test]
    fn select_rejects_unknown_labels_and_categories() {
        let state = reduce(
            &two_items(),
            &Action::AddLabels {
                item: 0,
                labels: vec![boxed("a", "s")],
            },
        )
        .unwrap();
        let select = |labels: Vec<(usize, &str)>| {
            let mut map = std::collections::BTreeMap::new();
            for (item, id) in labels {
                map.entry(item).or_insert_with(Vec::new).push(id.to_string());
            }
            Action::ChangeSelect(SelectChange {
                labels: Some(map),
                ..Default::default()
            })
        };

        assert!(reduce(&state, &select(vec![(0, "a")])).is_ok());
        assert!(matches!(
            reduce(&state, &select(vec![(0, "nope")])),
            Err(EditorError::UnknownLabel { item: 0, .. })
        ));
        assert!(matches!(
            reduce(&state, &select(vec![(7, "a")])),
            Err(EditorError::ItemOutOfRange(7))
        ));
        // no categories configured
        let category = Action::ChangeSelect(SelectChange {
            category: Some(0),
            ..Default::default()
        });
        assert!(matches!(
            reduce(&state, &category),
            Err(EditorError::UnknownCategory(_))
        ));
    }
}
