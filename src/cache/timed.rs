//! In-memory key/value cache with a per-instance TTL
//!
//! Entries are masked once they outlive the TTL but are never purged on
//! their own; the keyed universe is a handful of named datasets.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;

use crate::clock::SharedClock;

/// TTL in minutes for the news and tips datasets
pub const NEWS_CACHE_TTL_MINUTES: i64 = 5;

/// TTL in minutes for remote knowledge lookups
pub const KNOWLEDGE_CACHE_TTL_MINUTES: i64 = 10;

/// A cached value and the moment it was stored
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    /// The cached value
    pub value: T,
    /// When the value was stored
    pub stored_at: DateTime<Utc>,
}

/// Key/value store whose entries expire `ttl` after being set
#[derive(Debug)]
pub struct TimedCache<T> {
    entries: HashMap<String, CacheEntry<T>>,
    ttl: Duration,
    clock: SharedClock,
}

impl<T: Clone> TimedCache<T> {
    /// Creates an empty cache
    pub fn new(ttl: Duration, clock: SharedClock) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
            clock,
        }
    }

    /// Returns the value for `key` while `now - stored_at <= ttl`
    pub fn get(&self, key: &str) -> Option<T> {
        let entry = self.entries.get(key)?;
        let age = self.clock.now() - entry.stored_at;
        if age <= self.ttl {
            Some(entry.value.clone())
        } else {
            None
        }
    }

    /// Stores `value` under `key`, replacing any previous entry
    pub fn set(&mut self, key: impl Into<String>, value: T) {
        let entry = CacheEntry {
            value,
            stored_at: self.clock.now(),
        };
        self.entries.insert(key.into(), entry);
    }

    /// Drops every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// The configured time-to-live
    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}
