//! Command-line interface parsing for the economic news digest
//!
//! This module handles parsing of CLI arguments using clap and turns them
//! into a `Config` for composing the services.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::config::{
    parse_dir_url, Config, ConfigError, KnowledgeBackend, DEFAULT_BASE_URL, DEFAULT_RAG_URL,
    DEFAULT_TIMEOUT_SECS,
};
use crate::knowledge::static_index::ANSWER_TOP_K;

/// Error types for CLI argument handling
#[derive(Debug, Error)]
pub enum CliError {
    /// A setting could not be turned into configuration
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The timeout must be at least one second
    #[error("Invalid timeout: {0}s. Use a value of 1 or more")]
    InvalidTimeout(u64),
}

/// Economic news digest - daily summary, news feed and finance tips Q&A
#[derive(Parser, Debug)]
#[command(name = "econdigest")]
#[command(about = "Daily economic news digest and finance tips Q&A")]
#[command(version)]
pub struct Cli {
    /// Base URL serving data/news.json and data/finance-tips.json
    #[arg(long, env = "ECONDIGEST_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Root of the RAG API used by `--knowledge remote`
    #[arg(long, env = "ECONDIGEST_RAG_URL", default_value = DEFAULT_RAG_URL)]
    pub rag_url: String,

    /// Directory for the local backup and settings
    #[arg(long, env = "ECONDIGEST_STORE_DIR", value_name = "DIR")]
    pub store_dir: Option<PathBuf>,

    /// Treat the host as offline (falls back to the local backup)
    #[arg(long)]
    pub offline: bool,

    /// Which knowledge provider answers questions
    #[arg(long, value_enum, default_value_t = KnowledgeBackend::Static)]
    pub knowledge: KnowledgeBackend,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Log debug output to stderr
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// What to show
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show the daily summary and news feed (default)
    News,
    /// List the finance tips
    Tips,
    /// Clear caches and refetch everything
    Refresh,
    /// Ask a finance question
    Ask {
        /// The question, e.g. "ETF와 개별 주식의 차이점은?"
        question: String,
    },
    /// Search the finance knowledge base
    Search {
        query: String,
        /// Maximum number of results
        #[arg(long, default_value_t = ANSWER_TOP_K)]
        top_k: usize,
    },
    /// List knowledge categories
    Categories,
    /// Show every topic in one category
    Category {
        /// Category name, e.g. 투자
        name: String,
    },
    /// Print suggested questions
    Suggest,
    /// Show the saved preferences, changing any that are given
    Settings {
        /// Colour theme name
        #[arg(long)]
        theme: Option<String>,
        /// Refetch stale data when showing the news
        #[arg(long, value_name = "BOOL")]
        auto_refresh: Option<bool>,
        /// Show notifications
        #[arg(long, value_name = "BOOL")]
        notifications: Option<bool>,
    },
}

impl Cli {
    /// The subcommand to run, defaulting to `news`
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::News)
    }

    /// Builds runtime configuration from the parsed arguments
    pub fn to_config(&self) -> Result<Config, CliError> {
        if self.timeout_secs == 0 {
            return Err(CliError::InvalidTimeout(self.timeout_secs));
        }
        Ok(Config {
            base_url: parse_dir_url("base_url", &self.base_url)?,
            rag_url: parse_dir_url("rag_url", &self.rag_url)?,
            store_dir: self.store_dir.clone(),
            request_timeout: Duration::from_secs(self.timeout_secs),
            knowledge_backend: self.knowledge,
            offline: self.offline,
        })
    }
}
