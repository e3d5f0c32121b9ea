//! Core data models for the economic news digest
//!
//! This module contains the typed records for the daily news payload and the
//! loosely-shaped finance tips document, plus the structural validation and
//! normalization that turn raw JSON into a `NewsPayload`.

pub mod news;

pub use news::{normalize_news_data, validate_news_data};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::clock::iso_millis;

/// Default title for items that arrive without one ("no title")
pub const DEFAULT_TITLE: &str = "제목 없음";

/// Default source for items that arrive without one ("unknown")
pub const DEFAULT_SOURCE: &str = "알 수 없음";

/// Default category for items that arrive without one ("economy")
pub const DEFAULT_CATEGORY: &str = "경제";

/// The daily digest: an AI summary plus the articles it was built from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsPayload {
    /// Multi-line summary of the day's economic news
    pub summary: String,
    /// Articles in the order the resource lists them
    pub news: Vec<NewsItem>,
    /// When the payload was produced (ISO-8601)
    pub last_updated: String,
}

impl NewsPayload {
    /// An empty payload stamped with `now`
    pub fn empty(now: DateTime<Utc>) -> Self {
        Self {
            summary: String::new(),
            news: Vec::new(),
            last_updated: iso_millis(now),
        }
    }
}

/// A single news article
///
/// After normalization `title`, `source` and `published_at` are never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub title: String,
    pub content: String,
    pub summary: String,
    pub source: String,
    pub url: String,
    /// Publication time (ISO-8601)
    pub published_at: String,
    pub category: String,
}

impl NewsItem {
    /// An item holding only the documented defaults, stamped with `now`
    pub fn with_defaults(now: DateTime<Utc>) -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            content: String::new(),
            summary: String::new(),
            source: DEFAULT_SOURCE.to_string(),
            url: String::new(),
            published_at: iso_millis(now),
            category: DEFAULT_CATEGORY.to_string(),
        }
    }
}

/// The finance tips document
///
/// Its shape is not enforced; the accessors read the generator's layout
/// (`{ lastUpdated, tips: [...], count }`) and tolerate anything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TipsPayload(pub Value);

impl TipsPayload {
    /// The raw JSON document
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Entries of the `tips` array, or nothing if it is missing
    pub fn tips(&self) -> &[Value] {
        self.0
            .get("tips")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The declared `count`, falling back to the length of `tips`
    pub fn count(&self) -> usize {
        self.0
            .get("count")
            .and_then(Value::as_u64)
            .map(|c| c as usize)
            .unwrap_or_else(|| self.tips().len())
    }

    /// The declared `lastUpdated`, if any
    pub fn last_updated(&self) -> Option<&str> {
        self.0.get("lastUpdated").and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_news_item_defaults() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let item = NewsItem::with_defaults(now);

        assert_eq!(item.title, "제목 없음");
        assert_eq!(item.source, "알 수 없음");
        assert_eq!(item.category, "경제");
        assert_eq!(item.published_at, "2024-03-01T12:00:00.000Z");
        assert!(item.content.is_empty());
        assert!(item.url.is_empty());
    }

    #[test]
    fn test_news_payload_serializes_camel_case() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let payload = NewsPayload {
            summary: "요약".to_string(),
            news: vec![NewsItem::with_defaults(now)],
            last_updated: "2024-03-01T12:00:00.000Z".to_string(),
        };

        let value = serde_json::to_value(&payload).unwrap();

        assert_eq!(value["lastUpdated"], "2024-03-01T12:00:00.000Z");
        assert_eq!(value["news"][0]["publishedAt"], "2024-03-01T12:00:00.000Z");
    }

    #[test]
    fn test_tips_payload_accessors() {
        let tips = TipsPayload(json!({
            "lastUpdated": "2024-03-01T08:00:00",
            "tips": [{"id": 1, "title": "연금저축"}, {"id": 2, "title": "ISA"}],
            "count": 2
        }));

        assert_eq!(tips.tips().len(), 2);
        assert_eq!(tips.count(), 2);
        assert_eq!(tips.last_updated(), Some("2024-03-01T08:00:00"));
    }

    #[test]
    fn test_tips_payload_tolerates_unknown_shape() {
        let tips = TipsPayload(json!(["not", "the", "usual", "shape"]));

        assert!(tips.tips().is_empty());
        assert_eq!(tips.count(), 0);
        assert!(tips.last_updated().is_none());
    }
}
