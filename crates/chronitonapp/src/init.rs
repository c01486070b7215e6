//! # Locating the Data Directory
//!
//! All chroniton data lives in one directory holding `data.json` and, optionally,
//! `chroniton.toml`. It is resolved during [`initialize`]:
//!
//! 1. An explicit `data_override` (the CLI's `--data` flag).
//! 2. The `CHRONITON_DATA` environment variable.
//! 3. The OS data directory from [`directories::ProjectDirs`], e.g.
//!    `~/.local/share/chroniton` on Linux.

use crate::api::ReminderModel;
use crate::config::ChronitonConfig;
use crate::error::{ChronitonError, Result};
use crate::session::Session;
use crate::store::fs::FileStore;
use directories::ProjectDirs;
use std::path::PathBuf;

pub const DATA_ENV: &str = "CHRONITON_DATA";

pub struct ChronitonContext {
    pub session: Session<FileStore>,
    pub config: ChronitonConfig,
    pub data_dir: PathBuf,
}

pub fn resolve_data_dir(data_override: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = data_override {
        return Ok(path);
    }
    if let Some(path) = std::env::var_os(DATA_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    ProjectDirs::from("com", "chroniton", "chroniton")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| {
            ChronitonError::Config(format!(
                "Could not determine a data directory; set {} or pass --data",
                DATA_ENV
            ))
        })
}

pub fn initialize(data_override: Option<PathBuf>) -> Result<ChronitonContext> {
    let data_dir = resolve_data_dir(data_override)?;
    let config = ChronitonConfig::load(&data_dir)?;
    let store = FileStore::new_fs(data_dir.clone())?;
    tracing::debug!(data_dir = %data_dir.display(), "initialized");

    Ok(ChronitonContext {
        session: Session::new(ReminderModel::new(store)),
        config,
        data_dir,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_override_wins() {
        let dir = tempdir().unwrap();
        let resolved = resolve_data_dir(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(resolved, dir.path());
    }

    #[test]
    fn test_initialize_empty_dir() {
        let dir = tempdir().unwrap();
        let ctx = initialize(Some(dir.path().to_path_buf())).unwrap();

        assert_eq!(ctx.data_dir, dir.path());
        assert!(ctx.session.model().all_categories().unwrap().is_empty());
    }
}
