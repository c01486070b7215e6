use super::backend::StorageBackend;
use super::Snapshot;
use crate::error::{ChronitonError, Result};
use std::cell::{Cell, RefCell};
use std::path::PathBuf;

/// In-memory storage backend for testing.
///
/// Interior mutability through `RefCell`/`Cell`, so every `StorageBackend` method can
/// take `&self`. Not `Sync`.
#[derive(Default)]
pub struct MemBackend {
    snapshot: RefCell<Snapshot>,
    saves: Cell<usize>,
    simulate_write_error: Cell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing data, as if it had been loaded from disk.
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            snapshot: RefCell::new(snapshot),
            ..Default::default()
        }
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }

    /// What a fresh load would return right now.
    pub fn stored(&self) -> Snapshot {
        self.snapshot.borrow().clone()
    }
}

impl StorageBackend for MemBackend {
    fn load(&self) -> Result<Snapshot> {
        Ok(self.snapshot.borrow().clone())
    }

    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(ChronitonError::Store("Simulated write error".to_string()));
        }
        *self.snapshot.borrow_mut() = snapshot.clone();
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }

    fn location(&self) -> PathBuf {
        PathBuf::from("memory://data.json")
    }
}
