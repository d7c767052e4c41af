use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use chrono::{Duration, Utc};
use parking_lot::Mutex;

use super::{KeyValueStore, StoredValue};
use crate::errors::StorageError;

/// JSON file backed store. Every mutation rewrites the file atomically.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, StoredValue>>,
}

impl FileStore {
    /// Opens the store at `path`. A missing or unreadable file starts an
    /// empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let mut entries = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str::<HashMap<String, StoredValue>>(&raw).unwrap_or_else(|e| {
                tracing::warn!("Discarding unreadable store {}: {}", path.display(), e);
                HashMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(StorageError::Read(e.to_string())),
        };

        let now = Utc::now();
        entries.retain(|_, entry| !entry.is_expired(now));

        Ok(FileStore {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &HashMap<String, StoredValue>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let raw = serde_json::to_vec_pretty(entries)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, raw)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut entries = self.entries.lock();
        match entries.get(key).map(|entry| entry.is_expired(Utc::now())) {
            Some(false) => Ok(entries.get(key).map(|entry| entry.value.clone())),
            Some(true) => {
                entries.remove(key);
                self.persist(&entries)?;
                Ok(None)
            }
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), StorageError> {
        let mut entries = self.entries.lock();
        entries.insert(key.to_string(), StoredValue::new(value, ttl));
        self.persist(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock();
        if entries.remove(key).is_some() {
            self.persist(&entries)?;
        }
        Ok(())
    }
}
