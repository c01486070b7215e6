use crate::commands::helpers::owner_of;
use crate::error::{ChronitonError, Result};
use crate::model::{Category, CategoryId, Event, EventId};
use crate::store::DataStore;

/// A Category with its Events, both in display order.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct CategoryOutline {
    pub category: Category,
    pub events: Vec<Event>,
}

pub fn categories<S: DataStore>(store: &S) -> Result<Vec<Category>> {
    store.list_categories()
}

/// Every Event, sorted by `order_index` alone.
///
/// Events from different Categories share position values, so this interleaves them;
/// ties follow Category order.
pub fn events<S: DataStore>(store: &S) -> Result<Vec<Event>> {
    store.list_events()
}

pub fn events_in<S: DataStore>(store: &S, category: CategoryId) -> Result<Vec<Event>> {
    store.get_category(&category)?;
    store.list_events_in(&category)
}

/// The full tree, Category by Category.
pub fn outline<S: DataStore>(store: &S) -> Result<Vec<CategoryOutline>> {
    store
        .list_categories()?
        .into_iter()
        .map(|category| {
            let events = store.list_events_in(&category.id)?;
            Ok(CategoryOutline { category, events })
        })
        .collect()
}

/// The Event at position 0 of the first Category that has any Events.
pub fn first_event<S: DataStore>(store: &S) -> Result<Option<Event>> {
    for category in store.list_categories()? {
        if let Some(event) = store.list_events_in(&category.id)?.into_iter().next() {
            return Ok(Some(event));
        }
    }
    Ok(None)
}

/// `(category position, event position)` of an Event, both 0-based.
pub fn event_path<S: DataStore>(store: &S, id: EventId) -> Result<(usize, usize)> {
    let event = store.get_event(&id)?;
    let owner = owner_of(store, &event)?;
    let row = store
        .list_events_in(&owner.id)?
        .iter()
        .position(|e| e.id == id)
        .ok_or_else(|| {
            ChronitonError::Consistency(format!("Event {} missing from its category", id))
        })?;
    Ok((owner.order_index, row))
}

/// Resolve a 0-based `(category, event)` path back to an Event.
pub fn event_at<S: DataStore>(store: &S, category: usize, event: usize) -> Result<Event> {
    let categories = store.list_categories()?;
    let owner = categories
        .get(category)
        .ok_or(ChronitonError::IndexOutOfRange {
            index: category,
            len: categories.len(),
        })?;
    let events = store.list_events_in(&owner.id)?;
    let len = events.len();
    events
        .into_iter()
        .nth(event)
        .ok_or(ChronitonError::IndexOutOfRange { index: event, len })
}
