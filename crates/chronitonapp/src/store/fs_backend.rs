use super::backend::StorageBackend;
use super::Snapshot;
use crate::error::{ChronitonError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const DATA_FILE: &str = "data.json";

pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(ChronitonError::Io)?;
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn load(&self) -> Result<Snapshot> {
        let data_file = self.root.join(DATA_FILE);
        if !data_file.exists() {
            return Ok(Snapshot::default());
        }
        let content = fs::read_to_string(data_file).map_err(ChronitonError::Io)?;
        let snapshot: Snapshot =
            serde_json::from_str(&content).map_err(ChronitonError::Serialization)?;
        Ok(snapshot)
    }

    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        self.ensure_dir()?;

        let data_file = self.root.join(DATA_FILE);
        let content =
            serde_json::to_string_pretty(snapshot).map_err(ChronitonError::Serialization)?;

        let tmp_file = self.root.join(format!(".data-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_file, content).map_err(ChronitonError::Io)?;
        if let Err(e) = fs::rename(&tmp_file, &data_file) {
            let _ = fs::remove_file(&tmp_file);
            return Err(ChronitonError::Io(e));
        }

        Ok(())
    }

    fn location(&self) -> PathBuf {
        self.root.join(DATA_FILE)
    }
}
