use super::mem_backend::MemBackend;
use super::record_store::RecordStore;
use super::Snapshot;

pub type InMemoryStore = RecordStore<MemBackend>;

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::from_snapshot(Snapshot::default())
    }

    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        RecordStore::with_loaded(MemBackend::with_snapshot(snapshot.clone()), snapshot)
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{Category, CategoryId, Event};
    use crate::store::DataStore;
    use chrono::{DateTime, Utc};

    /// Builds a store with densely ordered data, bypassing the model.
    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        /// Append a category with events titled as given.
        pub fn with_category(mut self, name: &str, events: &[&str]) -> Self {
            let id = self.push_category(name);
            for title in events {
                self.push_event(id, title, None, None);
            }
            self.store.commit().unwrap();
            self
        }

        /// Append an event with dates to the category at `category_position`.
        pub fn with_dated_event(
            mut self,
            category_position: usize,
            title: &str,
            last: Option<DateTime<Utc>>,
            next: Option<DateTime<Utc>>,
        ) -> Self {
            let id = self.store.list_categories().unwrap()[category_position].id;
            self.push_event(id, title, last, next);
            self.store.commit().unwrap();
            self
        }

        pub fn category_id(&self, position: usize) -> CategoryId {
            self.store.list_categories().unwrap()[position].id
        }

        fn push_category(&mut self, name: &str) -> CategoryId {
            let mut category = Category::new(name);
            category.order_index = self.store.list_categories().unwrap().len();
            self.store.save_category(&category).unwrap();
            category.id
        }

        fn push_event(
            &mut self,
            category: CategoryId,
            title: &str,
            last: Option<DateTime<Utc>>,
            next: Option<DateTime<Utc>>,
        ) {
            let mut event = Event::new(title, category);
            event.order_index = self.store.list_events_in(&category).unwrap().len();
            event.last_date = last;
            event.next_date = next;
            self.store.save_event(&event).unwrap();
        }
    }
}
