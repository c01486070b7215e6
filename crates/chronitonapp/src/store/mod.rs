//! # Storage Layer
//!
//! This module is the persistence collaborator of the model. The [`DataStore`] trait is
//! everything [`crate::api::ReminderModel`] needs from storage:
//!
//! 1. **Ordered queries**: Categories, all Events, or the Events of one Category, each
//!    sorted by `order_index` ascending.
//! 2. **Staging primitives**: save/delete single records in a working copy.
//! 3. **Commit**: durably write the working copy.
//!
//! ## Working Copy and Commit
//!
//! [`record_store::RecordStore`] keeps two snapshots:
//!
//! - **committed**: what the backend last accepted.
//! - **working**: committed plus staged edits.
//!
//! Reads see the working copy. `commit` hands the working copy to the backend; if the
//! write fails the working copy is reset to the committed snapshot and the error is
//! returned, so a failed save never leaves half a mutation behind.
//!
//! ## Integrity Checks
//!
//! The store refuses to stage an Event whose `category_id` does not name a staged
//! Category. It does **not** cascade deletes or renumber siblings: both are model
//! decisions and live in `commands/`.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: Production store backed by `data.json`.
//! - [`memory::InMemoryStore`]: For testing logic without filesystem I/O.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! ├── data.json          # Snapshot: categories + events keyed by id
//! └── chroniton.toml     # Configuration (optional)
//! ```

use crate::error::Result;
use crate::model::{Category, CategoryId, Event, EventId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

pub mod backend;
pub mod fs;
pub mod fs_backend;
pub mod mem_backend;
pub mod memory;
pub mod record_store;

/// Everything that gets persisted, keyed by record id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub categories: HashMap<CategoryId, Category>,
    #[serde(default)]
    pub events: HashMap<EventId, Event>,
}

/// Abstract interface for reminder storage.
pub trait DataStore {
    /// All Categories, ordered by `order_index`.
    fn list_categories(&self) -> Result<Vec<Category>>;

    /// All Events, ordered by their own `order_index` (not grouped by Category).
    fn list_events(&self) -> Result<Vec<Event>>;

    /// Events owned by `category`, ordered by `order_index`.
    fn list_events_in(&self, category: &CategoryId) -> Result<Vec<Event>>;

    fn get_category(&self, id: &CategoryId) -> Result<Category>;

    fn get_event(&self, id: &EventId) -> Result<Event>;

    /// Stage a Category (create or update).
    fn save_category(&mut self, category: &Category) -> Result<()>;

    /// Stage an Event (create or update). Its owner must already be staged.
    fn save_event(&mut self, event: &Event) -> Result<()>;

    /// Stage removal of a Category record. Does not touch its Events.
    fn delete_category(&mut self, id: &CategoryId) -> Result<()>;

    /// Stage removal of an Event record.
    fn delete_event(&mut self, id: &EventId) -> Result<()>;

    /// Durably save staged changes.
    fn commit(&mut self) -> Result<()>;

    /// Discard staged changes.
    fn rollback(&mut self);

    /// True if there are staged, uncommitted changes.
    fn has_changes(&self) -> bool;

    /// Where the data lives (a real path for file stores).
    fn location(&self) -> PathBuf;
}
