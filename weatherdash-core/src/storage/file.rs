use anyhow::anyhow;
use directories::ProjectDirs;
use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use super::{KeyValueStorage, StorageError, validate_slot};

/// One JSON file per slot inside a directory.
///
/// Writes go to a uniquely named sibling temp file, flushed to disk and then
/// renamed over the target, so a failed or interrupted write never leaves a
/// half-written slot behind and concurrent writers never share a temp file.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Platform data directory, e.g. `~/.local/share/weatherdash` on Linux.
    pub fn default_dir() -> anyhow::Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weatherdash", "weatherdash")
            .ok_or_else(|| anyhow!("Could not determine platform data directory"))?;

        Ok(dirs.data_dir().to_path_buf())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn slot_path(&self, slot: &str) -> PathBuf {
        self.dir.join(format!("{slot}.json"))
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, slot: &str) -> Result<Option<String>, StorageError> {
        validate_slot(slot)?;
        let path = self.slot_path(slot);

        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }

    fn set(&self, slot: &str, value: &str) -> Result<(), StorageError> {
        validate_slot(slot)?;

        fs::create_dir_all(&self.dir)
            .map_err(|source| StorageError::Io { path: self.dir.clone(), source })?;

        let path = self.slot_path(slot);

        let mut tmp = tempfile::Builder::new()
            .prefix(&format!(".{slot}."))
            .suffix(".tmp")
            .tempfile_in(&self.dir)
            .map_err(|source| StorageError::Io { path: self.dir.clone(), source })?;

        tmp.write_all(value.as_bytes())
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|source| StorageError::Io { path: tmp.path().to_path_buf(), source })?;

        // On failure the temp file is handed back and removed when dropped.
        tmp.persist(&path)
            .map_err(|e| StorageError::Io { path: path.clone(), source: e.error })?;

        tracing::debug!(path = %path.display(), bytes = value.len(), "wrote storage slot");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_slot_reads_as_none() {
        let dir = tempdir().expect("temp dir");
        let storage = FileStorage::new(dir.path());

        assert_eq!(storage.get("savedLocations").expect("get"), None);
    }

    #[test]
    fn set_creates_directory_and_replaces_value() {
        let dir = tempdir().expect("temp dir");
        let storage = FileStorage::new(dir.path().join("nested").join("data"));

        storage.set("savedLocations", "[1]").expect("first write");
        storage.set("savedLocations", "[2]").expect("second write");

        assert_eq!(storage.get("savedLocations").expect("get").as_deref(), Some("[2]"));
        assert!(storage.slot_path("savedLocations").exists());
    }

    #[test]
    fn set_leaves_no_temp_file_behind() {
        let dir = tempdir().expect("temp dir");
        let storage = FileStorage::new(dir.path());

        storage.set("savedLocations", "[]").expect("write");

        let names: Vec<_> = fs::read_dir(dir.path())
            .expect("read dir")
            .map(|e| e.expect("entry").file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["savedLocations.json".to_string()]);
    }

    #[test]
    fn failed_write_reports_io_and_cleans_up() {
        let dir = tempdir().expect("temp dir");
        let storage = FileStorage::new(dir.path());

        // A non-empty directory squatting on the slot path cannot be replaced.
        let squatter = storage.slot_path("savedLocations");
        fs::create_dir(&squatter).expect("block slot path");
        fs::write(squatter.join("keep"), "x").expect("fill squatter");

        let err = storage.set("savedLocations", "[\"new\"]").unwrap_err();
        assert!(matches!(err, StorageError::Io { .. }));

        let names: Vec<_> = fs::read_dir(dir.path())
            .expect("read dir")
            .map(|e| e.expect("entry").file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["savedLocations.json".to_string()]);
    }

    #[test]
    fn concurrent_writers_all_succeed() {
        let dir = tempdir().expect("temp dir");

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let storage = FileStorage::new(dir.path());
                std::thread::spawn(move || {
                    for round in 0..25 {
                        storage
                            .set("savedLocations", &format!("[{i},{round}]"))
                            .expect("every write succeeds");
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().expect("writer thread");
        }

        let value = FileStorage::new(dir.path())
            .get("savedLocations")
            .expect("get")
            .expect("slot written");
        assert!(value.ends_with(",24]"), "last write of some writer, got {value}");

        let entries = fs::read_dir(dir.path()).expect("read dir").count();
        assert_eq!(entries, 1, "temp files left behind");
    }

    #[test]
    fn rejects_path_like_slot_names() {
        let dir = tempdir().expect("temp dir");
        let storage = FileStorage::new(dir.path());

        assert!(matches!(storage.set("../escape", "x"), Err(StorageError::InvalidSlot(_))));
        assert!(matches!(storage.get("a/b"), Err(StorageError::InvalidSlot(_))));
    }
}
