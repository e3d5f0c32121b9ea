//! News and tips loader
//!
//! Fetches the two static digest resources, caches them in memory for five
//! minutes, validates and normalizes the news document, and keeps a local
//! backup for offline starts.

mod backup;
mod error;

pub use backup::{BackupRecord, BACKUP_MAX_AGE_HOURS};
pub use error::{ErrorCategory, LoaderError};

use chrono::Duration;
use reqwest::{Client, Url};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::cache::{TimedCache, NEWS_CACHE_TTL_MINUTES};
use crate::clock::{self, SharedClock};
use crate::config::Config;
use crate::connectivity::{Connectivity, ConnectivityFlag};
use crate::data::{self, NewsPayload, TipsPayload};
use crate::storage::{LocalStore, NEWS_BACKUP_KEY};

/// Path of the news resource relative to the base URL
pub const NEWS_RESOURCE: &str = "data/news.json";

/// Path of the finance tips resource relative to the base URL
pub const TIPS_RESOURCE: &str = "data/finance-tips.json";

const NEWS_CACHE_KEY: &str = "news-data";
const TIPS_CACHE_KEY: &str = "tips-data";

/// Result of `NewsLoader::refresh_data`
///
/// Failures are reported here instead of being raised.
#[derive(Debug, Clone, Serialize)]
pub struct RefreshOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub news: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tips: Option<TipsPayload>,
    /// User-facing message for the failure category
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<ErrorCategory>,
    /// Which operation failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl RefreshOutcome {
    fn succeeded(news: Value, tips: TipsPayload) -> Self {
        Self {
            success: true,
            news: Some(news),
            tips: Some(tips),
            error: None,
            category: None,
            context: None,
        }
    }

    fn failed(err: &LoaderError, context: &str) -> Self {
        let category = err.category();
        Self {
            success: false,
            news: None,
            tips: None,
            error: Some(category.message().to_string()),
            category: Some(category),
            context: Some(context.to_string()),
        }
    }
}

/// Loads the digest resources for a single owner
///
/// All cache-touching operations take `&mut self`; a loader is never shared
/// between concurrent callers. There is no retry here: callers decide.
#[derive(Debug)]
pub struct NewsLoader {
    http_client: Client,
    base_url: Url,
    cache: TimedCache<Value>,
    store: Option<LocalStore>,
    clock: SharedClock,
    connectivity: Arc<dyn Connectivity>,
}

impl NewsLoader {
    /// Creates a loader from configuration
    ///
    /// Uses the configured store directory, or the XDG data directory when
    /// none is set. The connectivity signal starts as `!config.offline`.
    pub fn new(config: &Config) -> Result<Self, LoaderError> {
        let http_client = Client::builder().timeout(config.request_timeout).build()?;
        let clock = clock::system();
        let store = match &config.store_dir {
            Some(dir) => Some(LocalStore::with_dir(dir.clone())),
            None => LocalStore::new(),
        };

        Ok(Self {
            http_client,
            base_url: config.base_url.clone(),
            cache: TimedCache::new(Duration::minutes(NEWS_CACHE_TTL_MINUTES), clock.clone()),
            store,
            clock,
            connectivity: Arc::new(ConnectivityFlag::new(!config.offline)),
        })
    }

    /// Replaces the time source; drops anything already cached
    pub fn with_clock(mut self, clock: SharedClock) -> Self {
        self.cache = TimedCache::new(self.cache.ttl(), clock.clone());
        self.clock = clock;
        self
    }

    /// Replaces the local store used for backups
    pub fn with_store(mut self, store: LocalStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Replaces the connectivity signal
    pub fn with_connectivity(mut self, connectivity: Arc<dyn Connectivity>) -> Self {
        self.connectivity = connectivity;
        self
    }

    /// The local store, if one could be located
    pub fn store(&self) -> Option<&LocalStore> {
        self.store.as_ref()
    }

    /// The loader's time source
    pub fn clock(&self) -> &SharedClock {
        &self.clock
    }

    /// Loads the raw news document, from cache when fresh
    ///
    /// # Returns
    /// * `Ok(Value)` - The parsed document (not yet validated)
    /// * `Err(LoaderError)` - Non-success status, transport failure, timeout or bad JSON
    pub async fn load_news_data(&mut self) -> Result<Value, LoaderError> {
        self.load_cached(NEWS_CACHE_KEY, NEWS_RESOURCE).await
    }

    /// Loads the finance tips document, from cache when fresh
    pub async fn load_tips_data(&mut self) -> Result<TipsPayload, LoaderError> {
        self.load_cached(TIPS_CACHE_KEY, TIPS_RESOURCE)
            .await
            .map(TipsPayload)
    }

    /// Loads, validates and normalizes the news document
    pub async fn load_validated_news(&mut self) -> Result<NewsPayload, LoaderError> {
        let raw = self.load_news_data().await?;
        if !self.validate_news_data(&raw) {
            return Err(LoaderError::Validation("Invalid news data format".to_string()));
        }
        Ok(self.normalize_news_data(&raw))
    }

    async fn load_cached(&mut self, key: &str, resource: &str) -> Result<Value, LoaderError> {
        if let Some(cached) = self.cache.get(key) {
            debug!(key, "cache hit");
            return Ok(cached);
        }

        match self.fetch_json(resource).await {
            Ok(value) => {
                self.cache.set(key, value.clone());
                Ok(value)
            }
            Err(e) => {
                error!(resource, error = %e, "error loading resource");
                Err(e)
            }
        }
    }

    /// Fetches a resource and parses its body as JSON
    async fn fetch_json(&self, resource: &str) -> Result<Value, LoaderError> {
        let url = self
            .base_url
            .join(resource)
            .map_err(|e| LoaderError::InvalidUrl(format!("{}: {}", resource, e)))?;

        debug!(%url, "fetching resource");
        let response = self.http_client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LoaderError::Fetch {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let text = response.text().await?;
        let value = serde_json::from_str(&text)?;
        info!(%url, "loaded resource");
        Ok(value)
    }

    /// Forgets every cached resource
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Structural check of a raw news document
    pub fn validate_news_data(&self, payload: &Value) -> bool {
        data::validate_news_data(payload)
    }

    /// Fills every missing field with its default; never fails
    pub fn normalize_news_data(&self, payload: &Value) -> NewsPayload {
        data::normalize_news_data(payload, self.clock.now())
    }

    /// Writes a backup of `payload`; returns `false` on any storage failure
    pub fn backup_to_local(&self, payload: &NewsPayload) -> bool {
        let Some(store) = &self.store else {
            warn!("no local store available, skipping backup");
            return false;
        };

        let record = BackupRecord::new(payload.clone(), self.clock.now());
        match store.write_json(NEWS_BACKUP_KEY, &record) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "failed to backup data");
                false
            }
        }
    }

    /// Reads the backup if it exists, decodes, and is younger than 24 hours
    pub fn restore_from_local(&self) -> Option<NewsPayload> {
        let store = self.store.as_ref()?;
        let record = match store.read_json::<BackupRecord>(NEWS_BACKUP_KEY) {
            Ok(record) => record?,
            Err(e) => {
                warn!(error = %e, "failed to restore from backup");
                return None;
            }
        };

        if record.is_fresh(self.clock.now()) {
            Some(record.data)
        } else {
            debug!(stored_at = %record.stored_at, "backup is stale");
            None
        }
    }

    /// Clears the cache and re-fetches both resources
    ///
    /// Never raises; failures come back as `success: false` with a
    /// categorized message and context `"refresh"`.
    pub async fn refresh_data(&mut self) -> RefreshOutcome {
        self.clear_cache();

        let result = async {
            let news = self.load_news_data().await?;
            let tips = self.load_tips_data().await?;
            Ok::<_, LoaderError>((news, tips))
        }
        .await;

        match result {
            Ok((news, tips)) => {
                info!("data refreshed");
                RefreshOutcome::succeeded(news, tips)
            }
            Err(e) => {
                error!(error = %e, "refresh failed");
                RefreshOutcome::failed(&e, "refresh")
            }
        }
    }

    /// The host's connectivity signal (advisory)
    pub fn is_online(&self) -> bool {
        self.connectivity.is_online()
    }
}
