use super::Snapshot;
use crate::error::Result;
use std::path::PathBuf;

/// Abstract interface for raw storage I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while RecordStore handles the "what" (staging, integrity, commit/rollback).
pub trait StorageBackend {
    /// Load the full snapshot. A store that was never written loads as empty.
    fn load(&self) -> Result<Snapshot>;

    /// Replace the stored snapshot.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn save(&self, snapshot: &Snapshot) -> Result<()>;

    /// Path of the data file. For MemBackend, a virtual path.
    fn location(&self) -> PathBuf;
}
