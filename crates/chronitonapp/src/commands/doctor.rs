//! Verify and repair stored ordering.
//!
//! Data written by chroniton is always dense, but `data.json` can be edited by hand or
//! synced from elsewhere. `doctor` walks everything and fixes what it finds:
//!
//! - Events whose Category no longer exists are dropped.
//! - Category positions are renumbered to `0..N-1`, keeping their current order.
//! - Each Category's Event positions are renumbered the same way.
//!
//! Duplicate positions keep creation order, which is how the store lists them.

use std::collections::HashSet;

use serde::Serialize;

use crate::commands::helpers::{stage_categories, stage_events};
use crate::commands::CmdMessage;
use crate::error::Result;
use crate::model::CategoryId;
use crate::ordering::renumber;
use crate::store::DataStore;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DoctorReport {
    pub orphaned_events_removed: usize,
    pub categories_renumbered: usize,
    pub events_renumbered: usize,
}

impl DoctorReport {
    pub fn is_clean(&self) -> bool {
        *self == Self::default()
    }

    pub fn messages(&self) -> Vec<CmdMessage> {
        if self.is_clean() {
            return vec![CmdMessage::success("No inconsistencies found")];
        }
        let mut messages = Vec::new();
        if self.orphaned_events_removed > 0 {
            messages.push(CmdMessage::warning(format!(
                "Removed {} event(s) whose category no longer exists",
                self.orphaned_events_removed
            )));
        }
        if self.categories_renumbered > 0 {
            messages.push(CmdMessage::info(format!(
                "Renumbered {} category position(s)",
                self.categories_renumbered
            )));
        }
        if self.events_renumbered > 0 {
            messages.push(CmdMessage::info(format!(
                "Renumbered {} event position(s)",
                self.events_renumbered
            )));
        }
        messages
    }
}

pub fn run<S: DataStore>(store: &mut S) -> Result<DoctorReport> {
    let mut report = DoctorReport::default();

    let mut categories = store.list_categories()?;
    let known: HashSet<CategoryId> = categories.iter().map(|c| c.id).collect();

    for event in store.list_events()? {
        if !known.contains(&event.category_id) {
            tracing::warn!(event = %event.id, title = %event.title, "dropping orphaned event");
            store.delete_event(&event.id)?;
            report.orphaned_events_removed += 1;
        }
    }

    report.categories_renumbered = renumber(&mut categories);
    stage_categories(store, &categories)?;

    for category in &categories {
        let mut events = store.list_events_in(&category.id)?;
        let changed = renumber(&mut events);
        if changed > 0 {
            report.events_renumbered += changed;
            stage_events(store, &events)?;
        }
    }

    store.commit()?;
    tracing::info!(?report, "doctor finished");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, Event};
    use crate::ordering::is_dense;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;
    use crate::store::Snapshot;
    use uuid::Uuid;

    #[test]
    fn test_clean_store_reports_nothing() {
        let mut fixture = StoreFixture::new().with_category("Car", &["Oil", "Tires"]);
        let report = run(&mut fixture.store).unwrap();

        assert!(report.is_clean());
        assert_eq!(report.messages().len(), 1);
        assert_eq!(fixture.store.backend().save_count(), 1);
    }

    #[test]
    fn test_repairs_gaps_duplicates_and_orphans() {
        let mut car = Category::new("Car");
        car.order_index = 3;
        let mut house = Category::new("House");
        house.order_index = 7;

        let mut oil = Event::new("Oil", car.id);
        oil.order_index = 2;
        let mut tires = Event::new("Tires", car.id);
        tires.order_index = 2;
        let orphan = Event::new("Orphan", Uuid::new_v4());

        let mut snapshot = Snapshot::default();
        for c in [&car, &house] {
            snapshot.categories.insert(c.id, c.clone());
        }
        for e in [&oil, &tires, &orphan] {
            snapshot.events.insert(e.id, e.clone());
        }
        let mut store = InMemoryStore::from_snapshot(snapshot);

        let report = run(&mut store).unwrap();

        assert_eq!(report.orphaned_events_removed, 1);
        assert_eq!(report.categories_renumbered, 2);
        assert_eq!(report.events_renumbered, 2);
        assert!(is_dense(&store.list_categories().unwrap()));
        let events = store.list_events_in(&car.id).unwrap();
        assert!(is_dense(&events));
        assert_eq!(events.len(), 2);
        assert!(store.get_event(&orphan.id).is_err());
        assert!(!store.has_changes());

        assert!(run(&mut store).unwrap().is_clean());
    }
}
