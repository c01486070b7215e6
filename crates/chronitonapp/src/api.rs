//! # API Facade
//!
//! [`ReminderModel`] is the single entry point for reading and changing reminder data,
//! whatever the UI. It is a **thin facade** over the command layer.
//!
//! ## Role and Responsibilities
//!
//! - **Dispatches** to the command functions in [`crate::commands`]
//! - **Rolls back** the store when a command fails, so a failed call never leaves
//!   staged changes behind for the next commit to pick up
//! - **Publishes** [`ModelChange`]s on its [`ChangeBus`] after a command succeeded
//! - **Resolves selectors** (`"2"`, `"Car"`, `"2.3"`) to ids for text-driven UIs
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: That belongs in `commands/*.rs`
//! - **I/O operations**: No stdout, stderr, or file formatting
//! - **Selection state**: See [`crate::session::Session`]
//!
//! ## Generic Over DataStore
//!
//! `ReminderModel<S: DataStore>` is generic over the storage backend:
//! - Production: `ReminderModel<FileStore>`
//! - Testing: `ReminderModel<InMemoryStore>`
//!
//! ```
//! use chronitonapp::api::ReminderModel;
//! use chronitonapp::store::memory::InMemoryStore;
//!
//! let mut model = ReminderModel::new(InMemoryStore::new());
//! let car = model.create_category("Car", None).unwrap();
//! model.create_event("Oil change", car, None).unwrap();
//! assert_eq!(model.first_event().unwrap().unwrap().title, "Oil change");
//! ```

use std::sync::mpsc::Receiver;

use chrono::{DateTime, Local, TimeZone, Utc};

use crate::commands::{self, doctor::DoctorReport, list::CategoryOutline, CmdResult};
use crate::error::{ChronitonError, Result};
use crate::index::{parse_category_selector, parse_event_path, CategorySelector};
use crate::model::{Category, CategoryId, Event, EventDraft, EventId, EventPatch};
use crate::notify::{ChangeBus, ModelChange};
use crate::store::DataStore;

pub struct ReminderModel<S: DataStore> {
    store: S,
    bus: ChangeBus,
}

impl<S: DataStore> ReminderModel<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            bus: ChangeBus::new(),
        }
    }

    /// Receive every change committed through this model from now on.
    pub fn subscribe(&mut self) -> Receiver<ModelChange> {
        self.bus.subscribe()
    }

    /// Read-only access to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    fn apply<F>(&mut self, command: F) -> Result<CmdResult>
    where
        F: FnOnce(&mut S) -> Result<CmdResult>,
    {
        match command(&mut self.store) {
            Ok(result) => {
                self.bus.publish_all(result.changes.iter().cloned());
                Ok(result)
            }
            Err(e) => {
                if self.store.has_changes() {
                    tracing::debug!(error = %e, "command failed, rolling back staged changes");
                    self.store.rollback();
                }
                Err(e)
            }
        }
    }

    // --- Queries ---

    pub fn all_categories(&self) -> Result<Vec<Category>> {
        commands::list::categories(&self.store)
    }

    pub fn all_events(&self) -> Result<Vec<Event>> {
        commands::list::events(&self.store)
    }

    pub fn ordered_events(&self, category: CategoryId) -> Result<Vec<Event>> {
        commands::list::events_in(&self.store, category)
    }

    pub fn outline(&self) -> Result<Vec<CategoryOutline>> {
        commands::list::outline(&self.store)
    }

    pub fn get_category(&self, id: CategoryId) -> Result<Category> {
        self.store.get_category(&id)
    }

    pub fn get_event(&self, id: EventId) -> Result<Event> {
        self.store.get_event(&id)
    }

    pub fn first_event(&self) -> Result<Option<Event>> {
        commands::list::first_event(&self.store)
    }

    pub fn event_path(&self, id: EventId) -> Result<(usize, usize)> {
        commands::list::event_path(&self.store, id)
    }

    /// Number of Events due within `within_days`, using the local calendar.
    pub fn count_due_events(&self, within_days: u32) -> Result<usize> {
        self.count_due_events_at(within_days, &Local::now())
    }

    pub fn count_due_events_at<Tz: TimeZone>(
        &self,
        within_days: u32,
        now: &DateTime<Tz>,
    ) -> Result<usize> {
        commands::due::count(&self.store, within_days, now)
    }

    pub fn due_events_at<Tz: TimeZone>(
        &self,
        within_days: u32,
        now: &DateTime<Tz>,
    ) -> Result<Vec<(Category, Event)>> {
        commands::due::list(&self.store, within_days, now)
    }

    // --- Category mutations ---

    /// Create a Category and return its id.
    pub fn create_category(&mut self, name: &str, at_index: Option<usize>) -> Result<CategoryId> {
        let result = self.create_category_with_result(name, at_index)?;
        created_category(&result)
    }

    pub fn create_category_with_result(
        &mut self,
        name: &str,
        at_index: Option<usize>,
    ) -> Result<CmdResult> {
        self.apply(|store| commands::categories::create(store, name, at_index))
    }

    /// Delete a Category and every Event it owns.
    pub fn delete_category(&mut self, id: CategoryId) -> Result<CmdResult> {
        self.apply(|store| commands::categories::delete(store, id))
    }

    pub fn move_category(&mut self, id: CategoryId, to_index: usize) -> Result<CmdResult> {
        self.apply(|store| commands::categories::move_to(store, id, to_index))
    }

    pub fn rename_category(&mut self, id: CategoryId, name: &str) -> Result<CmdResult> {
        self.apply(|store| commands::categories::rename(store, id, name))
    }

    // --- Event mutations ---

    /// Create an Event with just a title and return its id.
    pub fn create_event(
        &mut self,
        title: &str,
        category: CategoryId,
        at_index: Option<usize>,
    ) -> Result<EventId> {
        let result = self.create_event_with(EventDraft::new(title), category, at_index)?;
        created_event(&result)
    }

    pub fn create_event_with(
        &mut self,
        draft: EventDraft,
        category: CategoryId,
        at_index: Option<usize>,
    ) -> Result<CmdResult> {
        self.apply(|store| commands::events::create(store, category, draft, at_index))
    }

    pub fn delete_event(&mut self, id: EventId) -> Result<CmdResult> {
        self.apply(|store| commands::events::delete(store, id))
    }

    /// Move an Event within its own Category.
    pub fn move_event(&mut self, id: EventId, to_index: usize) -> Result<CmdResult> {
        self.apply(|store| commands::events::move_within(store, id, to_index))
    }

    pub fn move_event_to_category(
        &mut self,
        id: EventId,
        to_category: CategoryId,
        at_index: Option<usize>,
    ) -> Result<CmdResult> {
        self.apply(|store| commands::events::move_to_category(store, id, to_category, at_index))
    }

    pub fn update_event(&mut self, id: EventId, patch: EventPatch) -> Result<CmdResult> {
        self.apply(|store| commands::events::update(store, id, patch))
    }

    pub fn mark_done(&mut self, id: EventId, on: DateTime<Utc>) -> Result<CmdResult> {
        self.apply(|store| commands::events::mark_done(store, id, on))
    }

    // --- Maintenance ---

    pub fn doctor(&mut self) -> Result<DoctorReport> {
        match commands::doctor::run(&mut self.store) {
            Ok(report) => {
                if !report.is_clean() {
                    self.bus.publish(ModelChange::Repaired);
                }
                Ok(report)
            }
            Err(e) => {
                self.store.rollback();
                Err(e)
            }
        }
    }

    // --- Selectors ---

    /// Resolve `"2"` (1-based position) or a Category name to an id.
    ///
    /// Names match exactly first, then case-insensitively; the first Category in
    /// display order wins.
    pub fn resolve_category(&self, selector: &str) -> Result<CategoryId> {
        let categories = self.store.list_categories()?;
        match parse_category_selector(selector)? {
            CategorySelector::Position(position) => categories
                .get(position - 1)
                .map(|c| c.id)
                .ok_or_else(|| {
                    ChronitonError::Api(format!("No category at position {}", position))
                }),
            CategorySelector::Name(name) => categories
                .iter()
                .find(|c| c.name == name)
                .or_else(|| {
                    categories
                        .iter()
                        .find(|c| c.name.to_lowercase() == name.to_lowercase())
                })
                .map(|c| c.id)
                .ok_or_else(|| ChronitonError::Api(format!("No category named '{}'", name))),
        }
    }

    /// Resolve a `"2.3"` path (1-based) to an Event id.
    pub fn resolve_event(&self, selector: &str) -> Result<EventId> {
        let path = parse_event_path(selector)?;
        let (category, event) = path.to_zero_based();
        commands::list::event_at(&self.store, category, event)
            .map(|e| e.id)
            .map_err(|_| ChronitonError::Api(format!("No event at {}", path)))
    }
}

fn created_category(result: &CmdResult) -> Result<CategoryId> {
    result
        .category()
        .map(|c| c.id)
        .ok_or_else(|| ChronitonError::Api("create returned no category".to_string()))
}

fn created_event(result: &CmdResult) -> Result<EventId> {
    result
        .event()
        .map(|e| e.id)
        .ok_or_else(|| ChronitonError::Api("create returned no event".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ordering::is_dense;
    use crate::store::memory::InMemoryStore;
    use crate::store::Snapshot;
    use chrono::Duration;

    fn make_model() -> ReminderModel<InMemoryStore> {
        ReminderModel::new(InMemoryStore::new())
    }

    fn category_names(model: &ReminderModel<InMemoryStore>) -> Vec<String> {
        model
            .all_categories()
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect()
    }

    #[test]
    fn test_insert_at_front_then_delete() {
        let mut model = make_model();
        let a = model.create_category("A", None).unwrap();
        let b = model.create_category("B", Some(0)).unwrap();

        assert_eq!(model.get_category(b).unwrap().order_index, 0);
        assert_eq!(model.get_category(a).unwrap().order_index, 1);

        model.delete_category(b).unwrap();
        assert_eq!(model.get_category(a).unwrap().order_index, 0);
        assert_eq!(category_names(&model), vec!["A"]);
    }

    #[test]
    fn test_count_due_events_example() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 15, 0, 0).unwrap();
        let mut model = make_model();
        let car = model.create_category("Car", None).unwrap();

        // never done: due
        model
            .create_event_with(
                EventDraft::new("Oil").with_next_date(now + Duration::days(30)),
                car,
                None,
            )
            .unwrap();
        // due tomorrow
        model
            .create_event_with(
                EventDraft::new("Tires")
                    .with_last_date(now - Duration::days(180))
                    .with_next_date(now + Duration::days(1)),
                car,
                None,
            )
            .unwrap();
        // done after the due date
        model
            .create_event_with(
                EventDraft::new("Wash")
                    .with_last_date(now - Duration::days(1))
                    .with_next_date(now - Duration::days(3)),
                car,
                None,
            )
            .unwrap();
        // nothing scheduled
        model.create_event("Paint", car, None).unwrap();

        assert_eq!(model.count_due_events_at(1, &now).unwrap(), 2);
    }

    #[test]
    fn test_count_due_events_across_categories() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 15, 0, 0).unwrap();
        let mut model = make_model();
        let car = model.create_category("Car", None).unwrap();
        let house = model.create_category("House", None).unwrap();

        // overdue
        model
            .create_event_with(
                EventDraft::new("Inspection")
                    .with_last_date(now - Duration::days(40))
                    .with_next_date(now - Duration::days(2)),
                car,
                None,
            )
            .unwrap();
        // ten days out
        model
            .create_event_with(
                EventDraft::new("Tires")
                    .with_last_date(now - Duration::days(20))
                    .with_next_date(now + Duration::days(10)),
                car,
                None,
            )
            .unwrap();
        // due today
        model
            .create_event_with(
                EventDraft::new("Filters")
                    .with_last_date(now - Duration::days(30))
                    .with_next_date(now - Duration::hours(1)),
                house,
                None,
            )
            .unwrap();

        assert_eq!(model.count_due_events_at(0, &now).unwrap(), 2);
        assert_eq!(model.count_due_events_at(7, &now).unwrap(), 2);
        assert_eq!(model.count_due_events_at(10, &now).unwrap(), 3);
    }

    #[test]
    fn test_mutations_publish_changes() {
        let mut model = make_model();
        let rx = model.subscribe();

        let car = model.create_category("Car", None).unwrap();
        let oil = model.create_event("Oil", car, None).unwrap();

        let changes: Vec<ModelChange> = rx.try_iter().collect();
        assert_eq!(
            changes,
            vec![
                ModelChange::CategoryCreated { category: car },
                ModelChange::EventCreated {
                    event: oil,
                    category: car
                },
            ]
        );
    }

    #[test]
    fn test_failed_mutation_publishes_nothing() {
        let mut model = make_model();
        let car = model.create_category("Car", None).unwrap();
        let rx = model.subscribe();

        assert!(model.create_event("Oil", car, Some(4)).is_err());
        assert!(rx.try_recv().is_err());
        assert!(!model.store().has_changes());
    }

    #[test]
    fn test_commit_failure_rolls_back_and_stays_dense() {
        let mut model = make_model();
        let a = model.create_category("A", None).unwrap();
        model.create_category("B", None).unwrap();
        let rx = model.subscribe();

        model.store().backend().set_simulate_write_error(true);
        let err = model.create_category("C", Some(0)).unwrap_err();
        assert!(matches!(err, ChronitonError::Store(_)));
        assert!(rx.try_recv().is_err());

        assert_eq!(category_names(&model), vec!["A", "B"]);
        assert_eq!(model.get_category(a).unwrap().order_index, 0);

        model.store().backend().set_simulate_write_error(false);
        model.create_category("C", Some(0)).unwrap();
        assert_eq!(category_names(&model), vec!["C", "A", "B"]);
        assert!(is_dense(&model.all_categories().unwrap()));
    }

    #[test]
    fn test_move_event_across_categories() {
        let mut model = make_model();
        let car = model.create_category("Car", None).unwrap();
        let house = model.create_category("House", None).unwrap();
        let oil = model.create_event("Oil", car, None).unwrap();
        let tires = model.create_event("Tires", car, None).unwrap();
        model.create_event("Filters", house, None).unwrap();

        model.move_event_to_category(oil, house, Some(0)).unwrap();

        assert_eq!(model.event_path(oil).unwrap(), (1, 0));
        assert_eq!(model.event_path(tires).unwrap(), (0, 0));
        assert!(is_dense(&model.ordered_events(house).unwrap()));
    }

    #[test]
    fn test_first_event_follows_category_order() {
        let mut model = make_model();
        let car = model.create_category("Car", None).unwrap();
        let house = model.create_category("House", None).unwrap();
        model.create_event("Oil", car, None).unwrap();
        model.create_event("Filters", house, None).unwrap();

        model.move_category(house, 0).unwrap();
        assert_eq!(model.first_event().unwrap().unwrap().title, "Filters");
    }

    #[test]
    fn test_doctor_publishes_repaired() {
        let mut car = Category::new("Car");
        car.order_index = 4;
        let mut snapshot = Snapshot::default();
        snapshot.categories.insert(car.id, car.clone());
        let mut model = ReminderModel::new(InMemoryStore::from_snapshot(snapshot));
        let rx = model.subscribe();

        let report = model.doctor().unwrap();
        assert_eq!(report.categories_renumbered, 1);
        assert_eq!(rx.try_recv().unwrap(), ModelChange::Repaired);
    }

    #[test]
    fn test_resolve_category() {
        let mut model = make_model();
        let car = model.create_category("Car", None).unwrap();
        let house = model.create_category("House", None).unwrap();

        assert_eq!(model.resolve_category("1").unwrap(), car);
        assert_eq!(model.resolve_category("House").unwrap(), house);
        assert_eq!(model.resolve_category("house").unwrap(), house);
        assert!(matches!(
            model.resolve_category("3"),
            Err(ChronitonError::Api(_))
        ));
        assert!(model.resolve_category("Garden").is_err());
    }

    #[test]
    fn test_resolve_event() {
        let mut model = make_model();
        let car = model.create_category("Car", None).unwrap();
        model.create_event("Oil", car, None).unwrap();
        let tires = model.create_event("Tires", car, None).unwrap();

        assert_eq!(model.resolve_event("1.2").unwrap(), tires);
        assert!(model.resolve_event("1.3").is_err());
        assert!(model.resolve_event("2.1").is_err());
        assert!(model.resolve_event("oops").is_err());
    }
}
