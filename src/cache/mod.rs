//! Cache module for short-lived in-memory copies of fetched data
//!
//! Each loader owns its own `TimedCache`; entries expire after the cache's
//! TTL and are masked on read rather than evicted.

mod timed;

pub use timed::{CacheEntry, TimedCache, KNOWLEDGE_CACHE_TTL_MINUTES, NEWS_CACHE_TTL_MINUTES};
