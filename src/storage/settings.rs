//! Persisted user preferences

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{LocalStore, USER_SETTINGS_KEY};

/// User-facing preferences kept under `userSettings`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserSettings {
    /// Colour theme name
    pub theme: String,
    /// Whether stale data is refreshed automatically
    pub auto_refresh: bool,
    /// Whether notifications are shown
    pub notifications: bool,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            theme: "light".to_string(),
            auto_refresh: true,
            notifications: true,
        }
    }
}

impl UserSettings {
    /// Loads settings, falling back to defaults when absent or unreadable
    pub fn load(store: &LocalStore) -> Self {
        match store.read_json::<UserSettings>(USER_SETTINGS_KEY) {
            Ok(Some(settings)) => settings,
            Ok(None) => Self::default(),
            Err(e) => {
                warn!(error = %e, "failed to load user settings, using defaults");
                Self::default()
            }
        }
    }

    /// Overwrites the fields that are given; returns whether any were
    pub fn apply(
        &mut self,
        theme: Option<String>,
        auto_refresh: Option<bool>,
        notifications: Option<bool>,
    ) -> bool {
        let changed = theme.is_some() || auto_refresh.is_some() || notifications.is_some();
        if let Some(theme) = theme {
            self.theme = theme;
        }
        if let Some(auto_refresh) = auto_refresh {
            self.auto_refresh = auto_refresh;
        }
        if let Some(notifications) = notifications {
            self.notifications = notifications;
        }
        changed
    }

    /// Persists settings; a failed write is logged and reported as `false`
    pub fn save(&self, store: &LocalStore) -> bool {
        match store.write_json(USER_SETTINGS_KEY, self) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "failed to save user settings");
                false
            }
        }
    }
}
