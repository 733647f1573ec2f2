//! Writes finished label edits into the store.

use crate::drawable::box2d::Box2DLabel;
use crate::error::Result;
use crate::state::{Action, Store, new_id};
use tracing::debug;

/// Commit every dirty label in one undoable step.
///
/// Valid new labels are added (as a track across the remaining items when `tracking` is on),
/// valid existing labels get their shape updated, invalid new labels are dropped and invalid
/// existing labels are deleted.
pub fn commit_2d_labels(
    store: &mut Store,
    labels: &mut [Box2DLabel],
    tracking: bool,
    min_area: f32,
) -> Result<()> {
    let state = store.state();
    let item_count = state.task.items.len();
    let mut actions = Vec::new();
    let mut committed = Vec::new();

    for (index, label) in labels.iter().enumerate() {
        if !label.is_dirty() {
            continue;
        }
        committed.push(index);
        let item = label.item();

        match (label.is_valid(min_area), label.is_temp()) {
            (true, true) if tracking => {
                let items: Vec<usize> = (item..item_count).collect();
                let labels = items
                    .iter()
                    .map(|i| {
                        if *i == item {
                            label.to_new_label()
                        } else {
                            label.to_track_copy(*i)
                        }
                    })
                    .collect();
                actions.push(Action::AddTrack {
                    track: new_id(),
                    items,
                    labels,
                });
            }
            (true, true) => actions.push(Action::AddLabels {
                item,
                labels: vec![label.to_new_label()],
            }),
            (true, false) => actions.push(Action::ChangeShapes {
                item,
                shapes: vec![label.rect().clone()],
            }),
            (false, true) => {
                debug!(label = %label.label_id(), area = label.rect().area(), "discarding box below minimum area");
            }
            (false, false) => match label.track() {
                Some(track) if tracking => actions.push(Action::TerminateTracks {
                    item,
                    tracks: vec![track.clone()],
                }),
                _ => actions.push(Action::DeleteLabels {
                    item,
                    ids: vec![label.label_id().clone()],
                }),
            },
        }
    }

    if !actions.is_empty() {
        store.dispatch(Action::Sequential(actions))?;
    }
    for index in committed {
        labels[index].mark_committed();
    }
    Ok(())
}
