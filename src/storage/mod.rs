//! Local persistent storage
//!
//! A small synchronous key/value store on disk, used for the news backup,
//! user settings, and the last-refresh marker. Absence of any key is never
//! an error for callers.

mod local;
mod settings;

pub use local::{LocalStore, StorageError};
pub use settings::UserSettings;

/// Key holding the last successfully loaded news payload
pub const NEWS_BACKUP_KEY: &str = "news-backup";

/// Key holding `UserSettings`
pub const USER_SETTINGS_KEY: &str = "userSettings";

/// Key holding the epoch-millis time of the last refresh
pub const LAST_DATA_UPDATE_KEY: &str = "lastDataUpdate";
