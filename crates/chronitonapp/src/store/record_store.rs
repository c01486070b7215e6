use super::backend::StorageBackend;
use super::{DataStore, Snapshot};
use crate::error::{ChronitonError, Result};
use crate::model::{Category, CategoryId, Event, EventId};
use crate::ordering::sort_by_position;
use std::collections::HashMap;
use std::path::PathBuf;

pub struct RecordStore<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
    committed: Snapshot,
    working: Snapshot,
}

impl<B: StorageBackend> RecordStore<B> {
    /// Open a store, loading whatever the backend currently holds.
    pub fn open(backend: B) -> Result<Self> {
        let committed = backend.load()?;
        Ok(Self {
            backend,
            working: committed.clone(),
            committed,
        })
    }

    /// Wrap a backend whose contents are already known, skipping the initial load.
    pub(crate) fn with_loaded(backend: B, committed: Snapshot) -> Self {
        Self {
            backend,
            working: committed.clone(),
            committed,
        }
    }

    /// The backend, for inspection.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// A copy of the working state.
    pub fn snapshot(&self) -> Snapshot {
        self.working.clone()
    }

    fn category_positions(&self) -> HashMap<CategoryId, usize> {
        self.working
            .categories
            .values()
            .map(|c| (c.id, c.order_index))
            .collect()
    }
}

impl<B: StorageBackend> DataStore for RecordStore<B> {
    fn list_categories(&self) -> Result<Vec<Category>> {
        let mut categories: Vec<Category> = self.working.categories.values().cloned().collect();
        // HashMap order is arbitrary; break index ties by age so results are stable
        categories.sort_by_key(|c| c.created_at);
        sort_by_position(&mut categories);
        Ok(categories)
    }

    fn list_events(&self) -> Result<Vec<Event>> {
        let owners = self.category_positions();
        let mut events: Vec<Event> = self.working.events.values().cloned().collect();
        events.sort_by_key(|e| {
            (
                e.order_index,
                owners.get(&e.category_id).copied().unwrap_or(usize::MAX),
                e.created_at,
            )
        });
        Ok(events)
    }

    fn list_events_in(&self, category: &CategoryId) -> Result<Vec<Event>> {
        let mut events: Vec<Event> = self
            .working
            .events
            .values()
            .filter(|e| e.category_id == *category)
            .cloned()
            .collect();
        events.sort_by_key(|e| e.created_at);
        sort_by_position(&mut events);
        Ok(events)
    }

    fn get_category(&self, id: &CategoryId) -> Result<Category> {
        self.working
            .categories
            .get(id)
            .cloned()
            .ok_or(ChronitonError::CategoryNotFound(*id))
    }

    fn get_event(&self, id: &EventId) -> Result<Event> {
        self.working
            .events
            .get(id)
            .cloned()
            .ok_or(ChronitonError::EventNotFound(*id))
    }

    fn save_category(&mut self, category: &Category) -> Result<()> {
        let mut category = category.clone();
        category.normalize();
        self.working.categories.insert(category.id, category);
        Ok(())
    }

    fn save_event(&mut self, event: &Event) -> Result<()> {
        if !self.working.categories.contains_key(&event.category_id) {
            return Err(ChronitonError::Consistency(format!(
                "Event {} refers to missing category {}",
                event.id, event.category_id
            )));
        }
        let mut event = event.clone();
        event.normalize();
        self.working.events.insert(event.id, event);
        Ok(())
    }

    fn delete_category(&mut self, id: &CategoryId) -> Result<()> {
        if self.working.categories.remove(id).is_none() {
            return Err(ChronitonError::CategoryNotFound(*id));
        }
        Ok(())
    }

    fn delete_event(&mut self, id: &EventId) -> Result<()> {
        if self.working.events.remove(id).is_none() {
            return Err(ChronitonError::EventNotFound(*id));
        }
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        if !self.has_changes() {
            return Ok(());
        }

        match self.backend.save(&self.working) {
            Ok(()) => {
                self.committed = self.working.clone();
                tracing::info!(
                    categories = self.committed.categories.len(),
                    events = self.committed.events.len(),
                    "committed"
                );
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "commit failed, discarding staged changes");
                self.rollback();
                Err(e)
            }
        }
    }

    fn rollback(&mut self) {
        self.working = self.committed.clone();
    }

    fn has_changes(&self) -> bool {
        self.working != self.committed
    }

    fn location(&self) -> PathBuf {
        self.backend.location()
    }
}
