use chrono::{DateTime, Utc};

use crate::commands::helpers::{log_event_order, owner_of, stage_events};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{CategoryId, Event, EventDraft, EventId, EventPatch};
use crate::notify::ModelChange;
use crate::ordering;
use crate::store::DataStore;

/// Create an Event in `category` at `at_index` (default: the end of that Category).
pub fn create<S: DataStore>(
    store: &mut S,
    category: CategoryId,
    draft: EventDraft,
    at_index: Option<usize>,
) -> Result<CmdResult> {
    let owner = store.get_category(&category)?;
    let mut siblings = store.list_events_in(&category)?;

    let mut event = Event::new(draft.title, category);
    event.notes = draft.notes;
    event.last_date = draft.last_date;
    event.next_date = draft.next_date;
    let id = event.id;
    let position = ordering::insert(&mut siblings, event, at_index)?;

    stage_events(store, &siblings)?;
    store.commit()?;
    log_event_order("create", &owner, &siblings);

    let created = store.get_event(&id)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Event created in {}: {}",
        owner.name, created.title
    )));
    result.add_change(ModelChange::EventCreated {
        event: id,
        category,
    });
    if position + 1 < siblings.len() {
        result.add_change(ModelChange::EventsReordered { category });
    }
    Ok(result.with_event(created))
}

/// Delete an Event and close the gap in its Category.
pub fn delete<S: DataStore>(store: &mut S, id: EventId) -> Result<CmdResult> {
    let event = store.get_event(&id)?;
    let owner = owner_of(store, &event)?;
    let mut siblings = store.list_events_in(&owner.id)?;
    ordering::remove(&mut siblings, id)?;

    store.delete_event(&id)?;
    stage_events(store, &siblings)?;
    store.commit()?;
    log_event_order("delete", &owner, &siblings);

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Event deleted from {}: {}",
        owner.name, event.title
    )));
    result.add_change(ModelChange::EventDeleted {
        event: id,
        category: owner.id,
    });
    if event.order_index < siblings.len() {
        result.add_change(ModelChange::EventsReordered { category: owner.id });
    }
    Ok(result.with_event(event))
}

/// Move an Event to `to_index` within its own Category.
pub fn move_within<S: DataStore>(store: &mut S, id: EventId, to_index: usize) -> Result<CmdResult> {
    let event = store.get_event(&id)?;
    let owner = owner_of(store, &event)?;
    let mut siblings = store.list_events_in(&owner.id)?;
    ordering::move_to_index(&mut siblings, id, to_index)?;

    stage_events(store, &siblings)?;
    store.commit()?;
    log_event_order("move", &owner, &siblings);

    let mut result = CmdResult::default();
    if event.order_index == to_index {
        result.add_message(CmdMessage::info(format!(
            "{} is already at position {}",
            event.title,
            to_index + 1
        )));
    } else {
        result.add_message(CmdMessage::success(format!(
            "Moved {} to position {} in {}",
            event.title,
            to_index + 1,
            owner.name
        )));
        result.add_change(ModelChange::EventsReordered { category: owner.id });
    }
    let moved = store.get_event(&id)?;
    Ok(result.with_event(moved))
}

/// Re-parent an Event into `destination` at `at_index` (default: the end).
///
/// Both Categories are renumbered in the same commit. Naming the Event's own
/// Category turns this into [`move_within`], where the default is the last position.
pub fn move_to_category<S: DataStore>(
    store: &mut S,
    id: EventId,
    destination: CategoryId,
    at_index: Option<usize>,
) -> Result<CmdResult> {
    let event = store.get_event(&id)?;
    let source = owner_of(store, &event)?;
    let target = store.get_category(&destination)?;

    if source.id == target.id {
        let len = store.list_events_in(&source.id)?.len();
        return move_within(store, id, at_index.unwrap_or(len.saturating_sub(1)));
    }

    let mut source_siblings = store.list_events_in(&source.id)?;
    let mut moving = ordering::remove(&mut source_siblings, id)?;
    let mut target_siblings = store.list_events_in(&target.id)?;
    moving.category_id = target.id;
    let position = ordering::insert(&mut target_siblings, moving, at_index)?;

    stage_events(store, &source_siblings)?;
    stage_events(store, &target_siblings)?;
    store.commit()?;
    log_event_order("move out", &source, &source_siblings);
    log_event_order("move in", &target, &target_siblings);

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Moved {} from {} to {} (position {})",
        event.title,
        source.name,
        target.name,
        position + 1
    )));
    result.add_change(ModelChange::EventMoved {
        event: id,
        from: source.id,
        to: target.id,
    });
    if event.order_index < source_siblings.len() {
        result.add_change(ModelChange::EventsReordered {
            category: source.id,
        });
    }
    if position + 1 < target_siblings.len() {
        result.add_change(ModelChange::EventsReordered {
            category: target.id,
        });
    }
    let moved = store.get_event(&id)?;
    Ok(result.with_event(moved))
}

/// Edit an Event's own fields. Ordering and ownership are not touched.
pub fn update<S: DataStore>(store: &mut S, id: EventId, patch: EventPatch) -> Result<CmdResult> {
    let mut event = store.get_event(&id)?;
    owner_of(store, &event)?;

    let mut result = CmdResult::default();
    if !patch.apply(&mut event) {
        result.add_message(CmdMessage::info(format!("No changes to {}", event.title)));
        return Ok(result.with_event(event));
    }

    store.save_event(&event)?;
    store.commit()?;

    let updated = store.get_event(&id)?;
    result.add_message(CmdMessage::success(format!("Event updated: {}", updated.title)));
    result.add_change(ModelChange::EventUpdated { event: id });
    Ok(result.with_event(updated))
}

/// Record that the chore was performed `on` the given date.
pub fn mark_done<S: DataStore>(store: &mut S, id: EventId, on: DateTime<Utc>) -> Result<CmdResult> {
    let patch = EventPatch {
        last_date: Some(Some(on)),
        ..Default::default()
    };
    update(store, id, patch)
}
