use chrono::{DateTime, TimeZone};

use crate::due::is_due_at;
use crate::error::Result;
use crate::model::{Category, Event};
use crate::store::DataStore;

/// How many Events across all Categories are due within `within_days` of `now`.
/// Events whose Category is missing are not counted, matching [`list`].
pub fn count<S: DataStore, Tz: TimeZone>(
    store: &S,
    within_days: u32,
    now: &DateTime<Tz>,
) -> Result<usize> {
    let mut total = 0;
    for category in store.list_categories()? {
        total += store
            .list_events_in(&category.id)?
            .iter()
            .filter(|e| is_due_at(e, within_days, now))
            .count();
    }
    Ok(total)
}

/// The due Events with their Categories, in display order.
pub fn list<S: DataStore, Tz: TimeZone>(
    store: &S,
    within_days: u32,
    now: &DateTime<Tz>,
) -> Result<Vec<(Category, Event)>> {
    let mut due = Vec::new();
    for category in store.list_categories()? {
        for event in store.list_events_in(&category.id)? {
            if is_due_at(&event, within_days, now) {
                due.push((category.clone(), event));
            }
        }
    }
    Ok(due)
}
