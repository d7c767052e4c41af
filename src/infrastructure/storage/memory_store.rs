use std::collections::HashMap;

use chrono::{Duration, Utc};
use parking_lot::Mutex;

use super::{KeyValueStore, StoredValue};
use crate::errors::StorageError;

/// Non-persistent store, used by tests and short-lived processes.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, StoredValue>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry with an explicit expiry.
    pub fn insert_raw(&self, key: &str, entry: StoredValue) {
        self.entries.lock().insert(key.to_string(), entry);
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut entries = self.entries.lock();
        match entries.get(key).map(|entry| entry.is_expired(Utc::now())) {
            Some(false) => Ok(entries.get(key).map(|entry| entry.value.clone())),
            Some(true) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), StorageError> {
        self.entries.lock().insert(key.to_string(), StoredValue::new(value, ttl));
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expired_entries_read_as_missing() {
        let store = MemoryStore::new();
        store.insert_raw(
            "authToken",
            StoredValue { value: "old".into(), expires_at: Utc::now() - Duration::seconds(1) },
        );
        store.set("uid", "7", Duration::days(7)).unwrap();

        assert_eq!(store.get("authToken").unwrap(), None);
        assert_eq!(store.get("uid").unwrap().as_deref(), Some("7"));
    }

    #[test]
    fn remove_is_idempotent() {
        let store = MemoryStore::new();
        store.set("theme", "dark", Duration::days(365)).unwrap();
        store.remove("theme").unwrap();
        store.remove("theme").unwrap();
        assert_eq!(store.get("theme").unwrap(), None);
    }
}
