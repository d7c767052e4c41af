use std::sync::Arc;

use chrono::Duration;
use serde::Serialize;

use crate::constants::{AUTH_TOKEN_KEY, UID_KEY};
use crate::errors::AppError;
use crate::infrastructure::storage::KeyValueStore;

/// Bearer token and user id of the logged-in account.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    pub token: String,
    pub uid: String,
}

/// Persisted session on top of a [`KeyValueStore`].
///
/// Read failures are logged and reported as "no session".
#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(store: Arc<dyn KeyValueStore>, ttl: Duration) -> Self {
        SessionStore { store, ttl }
    }

    pub fn token(&self) -> Option<String> {
        self.read(AUTH_TOKEN_KEY)
    }

    pub fn uid(&self) -> Option<String> {
        self.read(UID_KEY)
    }

    pub fn current(&self) -> Option<Session> {
        Some(Session {
            token: self.token()?,
            uid: self.uid()?,
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn start(&self, token: &str, uid: &str) -> Result<(), AppError> {
        self.store.set(AUTH_TOKEN_KEY, token, self.ttl)?;
        self.store.set(UID_KEY, uid, self.ttl)?;
        tracing::info!(uid = %uid, "Session started");
        Ok(())
    }

    /// Swaps the token and keeps the stored UID.
    pub fn replace_token(&self, token: &str) -> Result<(), AppError> {
        self.store.set(AUTH_TOKEN_KEY, token, self.ttl)?;
        tracing::debug!("Session token replaced");
        Ok(())
    }

    /// Removes token and UID. Failures are logged, never returned.
    pub fn clear(&self) {
        for key in [AUTH_TOKEN_KEY, UID_KEY] {
            if let Err(e) = self.store.remove(key) {
                tracing::warn!(key, error = %e, "Failed to remove session key");
            }
        }
        tracing::info!("Session cleared");
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to read session key");
                None
            }
        }
    }
}
