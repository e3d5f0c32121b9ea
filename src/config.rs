//! Resolved runtime configuration
//!
//! `Config` carries everything the services need to be composed: where the
//! static resources live, where the RAG API lives, where local state goes,
//! and which knowledge backend to use.

use reqwest::Url;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Default location of the static `data/*.json` resources
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/";

/// Default root of the RAG HTTP API
pub const DEFAULT_RAG_URL: &str = "http://localhost:5000/api/";

/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Errors produced while resolving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A URL setting could not be parsed
    #[error("Invalid URL for {name}: '{value}'")]
    InvalidUrl { name: &'static str, value: String },
}

/// Which knowledge provider answers questions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum KnowledgeBackend {
    /// Built-in keyword index over the fixed finance dataset
    #[default]
    Static,
    /// Remote RAG API
    Remote,
}

/// Runtime configuration shared by the loader, knowledge provider and app
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL the `data/` resources are resolved against
    pub base_url: Url,
    /// Root of the RAG API (used by the remote backend)
    pub rag_url: Url,
    /// Local store directory; `None` means the XDG data directory
    pub store_dir: Option<PathBuf>,
    /// Timeout applied to every HTTP request
    pub request_timeout: Duration,
    /// Selected knowledge provider
    pub knowledge_backend: KnowledgeBackend,
    /// Force the connectivity signal to "offline"
    pub offline: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            rag_url: Url::parse(DEFAULT_RAG_URL).expect("default RAG URL is valid"),
            store_dir: None,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            knowledge_backend: KnowledgeBackend::Static,
            offline: false,
        }
    }
}

impl Config {
    /// Sets the resource base URL
    ///
    /// A trailing slash is added when missing so relative resource paths
    /// resolve underneath it instead of replacing its last segment.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ConfigError> {
        self.base_url = parse_dir_url("base_url", base_url)?;
        Ok(self)
    }

    /// Sets the RAG API root
    pub fn with_rag_url(mut self, rag_url: &str) -> Result<Self, ConfigError> {
        self.rag_url = parse_dir_url("rag_url", rag_url)?;
        Ok(self)
    }
}

/// Parses `value` as a URL whose path ends in `/`
pub fn parse_dir_url(name: &'static str, value: &str) -> Result<Url, ConfigError> {
    let invalid = || ConfigError::InvalidUrl {
        name,
        value: value.to_string(),
    };
    let mut url = Url::parse(value).map_err(|_| invalid())?;
    if url.cannot_be_a_base() {
        return Err(invalid());
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.base_url.as_str(), "http://localhost:8000/");
        assert_eq!(config.rag_url.as_str(), "http://localhost:5000/api/");
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.knowledge_backend, KnowledgeBackend::Static);
        assert!(!config.offline);
        assert!(config.store_dir.is_none());
    }

    #[test]
    fn test_with_base_url_appends_slash() {
        let config = Config::default()
            .with_base_url("https://example.github.io/econ-digest")
            .unwrap();
        assert_eq!(config.base_url.as_str(), "https://example.github.io/econ-digest/");
        assert_eq!(
            config.base_url.join("data/news.json").unwrap().as_str(),
            "https://example.github.io/econ-digest/data/news.json"
        );
    }

    #[test]
    fn test_with_rag_url_appends_slash() {
        let config = Config::default().with_rag_url("http://127.0.0.1:5000/api").unwrap();
        assert_eq!(config.rag_url.as_str(), "http://127.0.0.1:5000/api/");
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        let err = Config::default().with_base_url("not a url").unwrap_err();
        assert!(err.to_string().contains("base_url"));
        assert!(Config::default().with_base_url("mailto:someone@example.com").is_err());
    }
}
