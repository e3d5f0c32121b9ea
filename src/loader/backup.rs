//! Local backup of the last good news payload

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::data::NewsPayload;

/// How long a backup stays usable, in hours
pub const BACKUP_MAX_AGE_HOURS: i64 = 24;

/// The persisted copy of a news payload
///
/// Stored as `{"data": ..., "timestamp": <epoch millis>}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupRecord {
    pub data: NewsPayload,
    #[serde(rename = "timestamp", with = "chrono::serde::ts_milliseconds")]
    pub stored_at: DateTime<Utc>,
}

impl BackupRecord {
    pub fn new(data: NewsPayload, stored_at: DateTime<Utc>) -> Self {
        Self { data, stored_at }
    }

    /// A backup is fresh while it is strictly younger than 24 hours
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now - self.stored_at < Duration::hours(BACKUP_MAX_AGE_HOURS)
    }
}
