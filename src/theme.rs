use std::sync::Arc;

use chrono::Duration;
use tokio::sync::watch;

use crate::constants::THEME_KEY;
use crate::domain::entities::theme::Theme;
use crate::errors::AppError;
use crate::infrastructure::storage::KeyValueStore;

/// Process-wide theme preference.
///
/// Every layout holds a receiver from [`ThemeSettings::subscribe`] and is
/// notified when the preference changes.
#[derive(Clone)]
pub struct ThemeSettings {
    store: Arc<dyn KeyValueStore>,
    ttl: Duration,
    sender: Arc<watch::Sender<Theme>>,
}

impl ThemeSettings {
    /// Loads the stored preference; missing or unreadable values fall back to light.
    pub fn load(store: Arc<dyn KeyValueStore>, ttl: Duration) -> Self {
        let initial = match store.get(THEME_KEY) {
            Ok(Some(value)) => value.parse().unwrap_or_else(|e: String| {
                tracing::warn!(error = %e, "Ignoring stored theme");
                Theme::default()
            }),
            Ok(None) => Theme::default(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read stored theme");
                Theme::default()
            }
        };

        let (sender, _) = watch::channel(initial);
        ThemeSettings {
            store,
            ttl,
            sender: Arc::new(sender),
        }
    }

    pub fn current(&self) -> Theme {
        *self.sender.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<Theme> {
        self.sender.subscribe()
    }

    /// Persists `theme`, then notifies subscribers if it changed.
    pub fn set(&self, theme: Theme) -> Result<(), AppError> {
        self.store.set(THEME_KEY, theme.as_str(), self.ttl)?;

        let changed = self.sender.send_if_modified(|current| {
            if *current == theme {
                false
            } else {
                *current = theme;
                true
            }
        });
        if changed {
            tracing::info!(theme = %theme, "Theme changed");
        }
        Ok(())
    }

    pub fn toggle(&self) -> Result<Theme, AppError> {
        let next = self.current().toggled();
        self.set(next)?;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::MemoryStore;

    fn settings(store: Arc<MemoryStore>) -> ThemeSettings {
        ThemeSettings::load(store, Duration::days(365))
    }

    #[test]
    fn defaults_to_light() {
        let theme = settings(Arc::new(MemoryStore::new()));
        assert_eq!(theme.current(), Theme::Light);
    }

    #[test]
    fn restores_persisted_choice() {
        let store = Arc::new(MemoryStore::new());
        settings(store.clone()).set(Theme::Dark).unwrap();

        assert_eq!(settings(store.clone()).current(), Theme::Dark);
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn garbage_in_store_falls_back_to_light() {
        let store = Arc::new(MemoryStore::new());
        store.set(THEME_KEY, "neon", Duration::days(1)).unwrap();
        assert_eq!(settings(store).current(), Theme::Light);
    }

    #[tokio::test]
    async fn subscribers_are_notified_on_toggle() {
        let theme = settings(Arc::new(MemoryStore::new()));
        let mut first = theme.subscribe();
        let mut second = theme.subscribe();

        assert_eq!(theme.toggle().unwrap(), Theme::Dark);

        first.changed().await.unwrap();
        second.changed().await.unwrap();
        assert_eq!(*first.borrow(), Theme::Dark);
        assert_eq!(*second.borrow_and_update(), Theme::Dark);
    }

    #[tokio::test]
    async fn setting_same_theme_does_not_notify() {
        let theme = settings(Arc::new(MemoryStore::new()));
        let receiver = theme.subscribe();

        theme.set(Theme::Light).unwrap();
        assert!(!receiver.has_changed().unwrap());
    }
}
