use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::StorageError;

pub mod file_store;
pub mod memory_store;
pub mod session;

pub use file_store::FileStore;
pub use memory_store::MemoryStore;
pub use session::SessionStore;

/// Cookie-like persisted storage: string values with a per-key expiry.
pub trait KeyValueStore: Send + Sync {
    /// Returns `None` for missing and expired keys.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), StorageError>;

    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredValue {
    pub value: String,
    pub expires_at: DateTime<Utc>,
}

impl StoredValue {
    pub fn new(value: &str, ttl: Duration) -> Self {
        StoredValue {
            value: value.to_string(),
            expires_at: Utc::now() + ttl,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}
