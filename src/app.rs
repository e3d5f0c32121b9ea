//! Application state management for the economic news digest
//!
//! `App` composes a `NewsLoader` and a knowledge provider, drives the
//! initial load with retry and offline fallback, and decides when stored
//! data is stale enough to refresh.

use chrono::{DateTime, Duration, Utc};
use std::time::Duration as StdDuration;
use tracing::{info, warn};

use crate::data::NewsPayload;
use crate::knowledge::KnowledgeProvider;
use crate::loader::{LoaderError, NewsLoader, RefreshOutcome};
use crate::storage::{UserSettings, LAST_DATA_UPDATE_KEY};

/// Attempts made by `App::init_with_retry` before giving up
pub const MAX_INIT_ATTEMPTS: u32 = 3;

/// Base backoff between initialization attempts; attempt `n` waits `n` times this
pub const INIT_RETRY_BASE: StdDuration = StdDuration::from_secs(2);

/// Minutes after which `refresh_data_if_needed` refetches
pub const AUTO_REFRESH_INTERVAL_MINUTES: i64 = 30;

/// Where the app is in its lifecycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppState {
    /// Nothing loaded yet
    Loading,
    /// News is available for display
    Ready(NewsPayload),
    /// Initialization gave up; holds the last error message
    Failed(String),
}

/// Retry schedule for initialization
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: StdDuration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_INIT_ATTEMPTS,
            base_delay: INIT_RETRY_BASE,
        }
    }
}

impl RetryPolicy {
    /// Wait after failed attempt `attempt` (1-based)
    pub fn delay_after(&self, attempt: u32) -> StdDuration {
        self.base_delay * attempt
    }
}

/// Main application struct composing the digest services
pub struct App {
    /// Current lifecycle state
    pub state: AppState,
    /// Loader for the news and tips resources
    pub loader: NewsLoader,
    /// Question answering backend, chosen at composition time
    pub knowledge: Box<dyn KnowledgeProvider>,
    /// Preferences read from the local store
    pub user_settings: UserSettings,
    /// Retry schedule for `init_with_retry`
    pub retry_policy: RetryPolicy,
    /// Attempts made by the most recent `init_with_retry`
    pub init_attempts: u32,
}

impl App {
    /// Creates an app in the `Loading` state
    pub fn new(loader: NewsLoader, knowledge: Box<dyn KnowledgeProvider>) -> Self {
        let mut app = Self {
            state: AppState::Loading,
            loader,
            knowledge,
            user_settings: UserSettings::default(),
            retry_policy: RetryPolicy::default(),
            init_attempts: 0,
        };
        app.load_user_settings();
        app
    }

    /// Replaces the retry schedule
    pub fn with_retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    /// Loads, validates, normalizes and backs up the news
    ///
    /// When loading fails while the host reports being offline, a fresh
    /// local backup is returned instead of the error.
    pub async fn load_initial_data(&mut self) -> Result<NewsPayload, LoaderError> {
        match self.loader.load_validated_news().await {
            Ok(payload) => {
                self.loader.backup_to_local(&payload);
                info!(items = payload.news.len(), "initial data loaded");
                Ok(payload)
            }
            Err(e) => {
                if !self.loader.is_online() {
                    if let Some(backup) = self.loader.restore_from_local() {
                        info!("using backup data");
                        return Ok(backup);
                    }
                }
                Err(e)
            }
        }
    }

    /// Runs `load_initial_data` with linear backoff
    ///
    /// Makes up to `max_attempts` attempts, sleeping `base_delay * n` after
    /// failed attempt `n`. Also initializes the knowledge provider; a
    /// provider that fails to initialize does not fail the app.
    pub async fn init_with_retry(&mut self) -> Result<NewsPayload, LoaderError> {
        if !self.knowledge.initialize().await {
            warn!(provider = self.knowledge.name(), "knowledge provider not ready");
        }

        self.init_attempts = 0;
        loop {
            self.init_attempts += 1;
            match self.load_initial_data().await {
                Ok(payload) => {
                    self.state = AppState::Ready(payload.clone());
                    return Ok(payload);
                }
                Err(e) if self.init_attempts < self.retry_policy.max_attempts => {
                    let delay = self.retry_policy.delay_after(self.init_attempts);
                    warn!(
                        attempt = self.init_attempts,
                        max = self.retry_policy.max_attempts,
                        error = %e,
                        "retrying initialization"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    self.state = AppState::Failed(e.to_string());
                    return Err(e);
                }
            }
        }
    }

    /// Loads the news for display
    ///
    /// With auto refresh on, stale data (see `refresh_data_if_needed`) is
    /// refetched first; a successful refresh is shown as is. Otherwise, or
    /// when that refresh fails, falls through to `init_with_retry`.
    pub async fn start(&mut self) -> Result<NewsPayload, LoaderError> {
        if self.user_settings.auto_refresh {
            if let Some(outcome) = self.refresh_data_if_needed().await {
                if let (true, AppState::Ready(payload)) = (outcome.success, &self.state) {
                    return Ok(payload.clone());
                }
                warn!(error = ?outcome.error, "auto refresh failed, loading normally");
            }
        }
        self.init_with_retry().await
    }

    /// Refreshes both resources and updates the state on success
    pub async fn refresh(&mut self) -> RefreshOutcome {
        let outcome = self.loader.refresh_data().await;
        if let Some(news) = outcome.news.as_ref().filter(|_| outcome.success) {
            if self.loader.validate_news_data(news) {
                let payload = self.loader.normalize_news_data(news);
                self.loader.backup_to_local(&payload);
                self.state = AppState::Ready(payload);
            } else {
                warn!("refreshed news failed validation, keeping previous data");
            }
        }
        outcome
    }

    /// Refreshes when the last refresh is unknown or older than 30 minutes
    ///
    /// Returns `None` when the data is still recent. The refresh time is
    /// recorded whether or not the refresh succeeded.
    pub async fn refresh_data_if_needed(&mut self) -> Option<RefreshOutcome> {
        let now = self.loader.clock().now();
        if let Some(last) = self.last_data_update() {
            if now - last <= Duration::minutes(AUTO_REFRESH_INTERVAL_MINUTES) {
                return None;
            }
        }

        let outcome = self.refresh().await;
        self.record_data_update(now);
        Some(outcome)
    }

    /// Time of the last recorded refresh, if any
    pub fn last_data_update(&self) -> Option<DateTime<Utc>> {
        let store = self.loader.store()?;
        let raw = match store.get_item(LAST_DATA_UPDATE_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(error = %e, "failed to read last update time");
                return None;
            }
        };
        let millis = raw.trim().parse::<i64>().ok()?;
        DateTime::from_timestamp_millis(millis)
    }

    fn record_data_update(&self, at: DateTime<Utc>) {
        let Some(store) = self.loader.store() else {
            return;
        };
        if let Err(e) = store.set_item(LAST_DATA_UPDATE_KEY, &at.timestamp_millis().to_string()) {
            warn!(error = %e, "failed to record last update time");
        }
    }

    /// Re-reads the user settings; absent or unreadable settings are defaults
    pub fn load_user_settings(&mut self) -> &UserSettings {
        self.user_settings = self
            .loader
            .store()
            .map(UserSettings::load)
            .unwrap_or_default();
        &self.user_settings
    }

    /// Replaces and persists the user settings
    pub fn save_user_settings(&mut self, settings: UserSettings) -> bool {
        let saved = self
            .loader
            .store()
            .map(|store| settings.save(store))
            .unwrap_or(false);
        self.user_settings = settings;
        saved
    }
}
