use super::fs_backend::FsBackend;
use super::record_store::RecordStore;
use crate::error::Result;
use std::path::PathBuf;

pub type FileStore = RecordStore<FsBackend>;

impl FileStore {
    /// Open (or prepare to create) the store rooted at `root`.
    pub fn new_fs(root: PathBuf) -> Result<Self> {
        RecordStore::open(FsBackend::new(root))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, Event};
    use crate::store::fs_backend::DATA_FILE;
    use crate::store::DataStore;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_opens_empty() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new_fs(temp.path().join("nested")).unwrap();
        assert!(store.list_categories().unwrap().is_empty());
        assert!(!temp.path().join("nested").exists());
    }

    #[test]
    fn test_commit_persists_across_reopen() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().to_path_buf();

        let category = Category::new("Car");
        let mut event = Event::new("Oil", category.id);
        event.image_data = Some(vec![0x89, 0x50, 0x4e, 0x47]);
        {
            let mut store = FileStore::new_fs(root.clone()).unwrap();
            store.save_category(&category).unwrap();
            store.save_event(&event).unwrap();
            store.commit().unwrap();
        }

        assert!(root.join(DATA_FILE).exists());
        let store = FileStore::new_fs(root).unwrap();
        assert_eq!(store.get_category(&category.id).unwrap().name, "Car");
        let loaded = store.get_event(&event.id).unwrap();
        assert_eq!(loaded.image_data, Some(vec![0x89, 0x50, 0x4e, 0x47]));
    }

    #[test]
    fn test_uncommitted_changes_are_not_persisted() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().to_path_buf();
        {
            let mut store = FileStore::new_fs(root.clone()).unwrap();
            store.save_category(&Category::new("Draft")).unwrap();
        }
        let store = FileStore::new_fs(root).unwrap();
        assert!(store.list_categories().unwrap().is_empty());
    }

    #[test]
    fn test_no_temp_files_left_behind() {
        let temp = TempDir::new().unwrap();
        let mut store = FileStore::new_fs(temp.path().to_path_buf()).unwrap();
        store.save_category(&Category::new("Car")).unwrap();
        store.commit().unwrap();

        let leftovers: Vec<_> = std::fs::read_dir(temp.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }
}
