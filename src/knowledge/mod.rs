//! Finance tips question answering
//!
//! Two providers share one capability set: `StaticKnowledgeIndex` scores the
//! built-in dataset locally, `RemoteKnowledgeClient` delegates to a RAG HTTP
//! API. The composing code picks one and holds it as
//! `Box<dyn KnowledgeProvider>`.

pub mod records;
pub mod remote;
pub mod static_index;

pub use records::{finance_knowledge, SUGGESTED_QUESTIONS};
pub use remote::RemoteKnowledgeClient;
pub use static_index::StaticKnowledgeIndex;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One finance topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Title wrapper used in `RelatedKnowledge`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedMetadata {
    #[serde(default)]
    pub title: String,
}

/// A record cited alongside an answer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedKnowledge {
    #[serde(default)]
    pub metadata: RelatedMetadata,
    #[serde(default)]
    pub content: String,
}

impl From<&KnowledgeRecord> for RelatedKnowledge {
    fn from(record: &KnowledgeRecord) -> Self {
        Self {
            metadata: RelatedMetadata {
                title: record.title.clone(),
            },
            content: record.content.clone(),
        }
    }
}

/// The answer to a reader's question
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerData {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub related_knowledge: Vec<RelatedKnowledge>,
    /// When the answer was produced
    #[serde(default)]
    pub timestamp: String,
}

/// Envelope returned by `KnowledgeProvider::ask`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<AnswerData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AskResponse {
    pub fn answered(data: AnswerData) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

/// Distinct categories in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryList {
    pub categories: Vec<String>,
    pub count: usize,
}

/// Every record in one category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryKnowledge {
    pub category: String,
    pub knowledge: Vec<KnowledgeRecord>,
    pub count: usize,
}

impl CategoryKnowledge {
    pub fn empty(category: &str) -> Self {
        Self {
            category: category.to_string(),
            knowledge: Vec::new(),
            count: 0,
        }
    }
}

/// Errors from a knowledge provider that talks to the network
#[derive(Debug, Error)]
pub enum KnowledgeError {
    /// The provider has not completed `initialize`
    #[error("RAG system not initialized")]
    NotInitialized,

    /// HTTP request failed or the body could not be decoded
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("HTTP error! status: {0}")]
    Status(u16),

    /// An endpoint URL could not be built
    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(String),
}

/// The question-answering capability set
#[async_trait]
pub trait KnowledgeProvider: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &'static str;

    /// Prepares the provider; returns whether it is ready
    async fn initialize(&mut self) -> bool;

    /// Answers a free-text question
    async fn ask(&self, question: &str) -> AskResponse;

    /// Returns at most `top_k` records relevant to `query`
    async fn search(&self, query: &str, top_k: usize)
        -> Result<Vec<KnowledgeRecord>, KnowledgeError>;

    /// Distinct categories
    async fn categories(&mut self) -> CategoryList;

    /// Records whose category equals `category`
    async fn knowledge_by_category(&mut self, category: &str) -> CategoryKnowledge;

    /// Starter questions for readers
    fn suggested_questions(&self) -> &'static [&'static str] {
        &SUGGESTED_QUESTIONS
    }
}
