//! Client for the RAG HTTP API
//!
//! Mirrors the static index's capability set over the network. Category
//! lookups are cached for ten minutes; questions and searches always hit
//! the API.

use async_trait::async_trait;
use chrono::Duration;
use reqwest::{Client, Url};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info, warn};

use super::{
    AnswerData, AskResponse, CategoryKnowledge, CategoryList, KnowledgeError, KnowledgeProvider,
    KnowledgeRecord, RelatedMetadata,
};
use crate::cache::{TimedCache, KNOWLEDGE_CACHE_TTL_MINUTES};
use crate::clock::{self, SharedClock};
use crate::config::Config;

/// Default `top_k` for remote searches
pub const REMOTE_SEARCH_TOP_K: usize = 5;

const CATEGORIES_CACHE_KEY: &str = "categories";

#[derive(Debug, Serialize)]
struct AskRequest<'a> {
    question: &'a str,
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
    top_k: usize,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchHit>,
}

/// One search result, either a full record or the server's
/// `{metadata: {title}, content}` shape
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SearchHit {
    Related {
        metadata: RelatedMetadata,
        #[serde(default)]
        content: String,
    },
    Record(KnowledgeRecord),
}

impl From<SearchHit> for KnowledgeRecord {
    fn from(hit: SearchHit) -> Self {
        match hit {
            SearchHit::Related { metadata, content } => KnowledgeRecord {
                id: String::new(),
                title: metadata.title,
                content,
                category: String::new(),
                keywords: Vec::new(),
            },
            SearchHit::Record(record) => record,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RandomResponse {
    knowledge: KnowledgeRecord,
}

/// Knowledge provider backed by the RAG API
#[derive(Debug)]
pub struct RemoteKnowledgeClient {
    http_client: Client,
    base_url: Url,
    initialized: bool,
    categories_cache: TimedCache<CategoryList>,
    knowledge_cache: TimedCache<CategoryKnowledge>,
}

impl RemoteKnowledgeClient {
    /// Creates a client for `config.rag_url`
    pub fn new(config: &Config) -> Result<Self, KnowledgeError> {
        let http_client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self::with_client(http_client, config.rag_url.clone(), clock::system()))
    }

    /// Creates a client with a custom HTTP client and time source
    pub fn with_client(http_client: Client, base_url: Url, clock: SharedClock) -> Self {
        let ttl = Duration::minutes(KNOWLEDGE_CACHE_TTL_MINUTES);
        Self {
            http_client,
            base_url,
            initialized: false,
            categories_cache: TimedCache::new(ttl, clock.clone()),
            knowledge_cache: TimedCache::new(ttl, clock),
        }
    }

    /// Whether the last `initialize` found the API healthy
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Forgets cached category lookups
    pub fn clear_cache(&mut self) {
        self.categories_cache.clear();
        self.knowledge_cache.clear();
    }

    /// Builds an endpoint URL from path segments, percent-encoding each one
    fn endpoint(&self, segments: &[&str]) -> Result<Url, KnowledgeError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| KnowledgeError::InvalidUrl(self.base_url.to_string()))?;
            path.pop_if_empty();
            path.extend(segments);
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, KnowledgeError> {
        let url = self.endpoint(segments)?;
        let response = self.http_client.get(url).send().await?;
        Self::decode(response).await
    }

    async fn post_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<T, KnowledgeError> {
        let url = self.endpoint(segments)?;
        let response = self.http_client.post(url).json(body).send().await?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, KnowledgeError> {
        let status = response.status();
        if !status.is_success() {
            return Err(KnowledgeError::Status(status.as_u16()));
        }
        Ok(response.json::<T>().await?)
    }

    /// Fetches one random record from the API
    pub async fn random_knowledge(&self) -> Result<KnowledgeRecord, KnowledgeError> {
        let response: RandomResponse = self.get_json(&["random"]).await?;
        Ok(response.knowledge)
    }
}

#[async_trait]
impl KnowledgeProvider for RemoteKnowledgeClient {
    fn name(&self) -> &'static str {
        "remote"
    }

    /// Checks `/health`; the client only answers questions once this passes
    async fn initialize(&mut self) -> bool {
        self.initialized = match self.get_json::<Value>(&["health"]).await {
            Ok(_) => {
                info!("RAG system initialized successfully");
                true
            }
            Err(e) => {
                error!(error = %e, "failed to initialize RAG system");
                false
            }
        };
        self.initialized
    }

    async fn ask(&self, question: &str) -> AskResponse {
        if !self.initialized {
            return AskResponse::failed(KnowledgeError::NotInitialized.to_string());
        }

        match self
            .post_json::<_, AnswerData>(&["ask"], &AskRequest { question })
            .await
        {
            Ok(data) => AskResponse::answered(data),
            Err(e) => {
                error!(error = %e, "error asking question");
                AskResponse::failed(e.to_string())
            }
        }
    }

    async fn search(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<KnowledgeRecord>, KnowledgeError> {
        let response: SearchResponse = self
            .post_json(&["search"], &SearchRequest { query, top_k })
            .await?;
        Ok(response.results.into_iter().map(KnowledgeRecord::from).collect())
    }

    async fn categories(&mut self) -> CategoryList {
        if let Some(cached) = self.categories_cache.get(CATEGORIES_CACHE_KEY) {
            return cached;
        }

        match self.get_json::<CategoryList>(&["categories"]).await {
            Ok(list) => {
                self.categories_cache.set(CATEGORIES_CACHE_KEY, list.clone());
                list
            }
            Err(e) => {
                warn!(error = %e, "error getting categories");
                CategoryList::default()
            }
        }
    }

    async fn knowledge_by_category(&mut self, category: &str) -> CategoryKnowledge {
        let cache_key = format!("knowledge_{}", category);
        if let Some(cached) = self.knowledge_cache.get(&cache_key) {
            return cached;
        }

        match self
            .get_json::<CategoryKnowledge>(&["knowledge", category])
            .await
        {
            Ok(knowledge) => {
                self.knowledge_cache.set(cache_key, knowledge.clone());
                knowledge
            }
            Err(e) => {
                warn!(category, error = %e, "error getting knowledge by category");
                CategoryKnowledge::empty(category)
            }
        }
    }
}
