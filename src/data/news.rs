//! Structural validation and normalization of the news resource
//!
//! The resource is read as untyped JSON first because the fetcher has to
//! accept partially-filled documents. A field counts as present when it is
//! "truthy": non-null, non-empty, non-zero and not `false`.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use super::{NewsItem, NewsPayload};
use crate::clock::iso_millis;

/// Checks that `payload` has the shape of a news document
///
/// The payload must be an object; a present `summary` must be text; when
/// `news` is an array every element needs a non-empty `title`, `source` and
/// `publishedAt`.
pub fn validate_news_data(payload: &Value) -> bool {
    let Some(obj) = payload.as_object() else {
        return false;
    };

    if let Some(summary) = obj.get("summary") {
        if is_truthy(summary) && !summary.is_string() {
            return false;
        }
    }

    match obj.get("news") {
        Some(Value::Array(items)) => items.iter().all(|item| {
            ["title", "source", "publishedAt"]
                .iter()
                .all(|field| item.get(field).is_some_and(is_truthy))
        }),
        _ => true,
    }
}

/// Builds a fully-populated `NewsPayload` from whatever `payload` holds
///
/// Never fails: anything missing takes the documented default and
/// timestamps fall back to `now`. Normalizing an already-normalized payload
/// returns it unchanged.
pub fn normalize_news_data(payload: &Value, now: DateTime<Utc>) -> NewsPayload {
    let Some(obj) = payload.as_object() else {
        return NewsPayload::empty(now);
    };

    let news = match obj.get("news") {
        Some(Value::Array(items)) => items.iter().map(|item| normalize_item(item, now)).collect(),
        _ => Vec::new(),
    };

    NewsPayload {
        summary: text_field(obj, "summary").unwrap_or_default(),
        news,
        last_updated: text_field(obj, "lastUpdated").unwrap_or_else(|| iso_millis(now)),
    }
}

fn normalize_item(item: &Value, now: DateTime<Utc>) -> NewsItem {
    let defaults = NewsItem::with_defaults(now);
    let Some(obj) = item.as_object() else {
        return defaults;
    };

    NewsItem {
        title: text_field(obj, "title").unwrap_or(defaults.title),
        content: text_field(obj, "content").unwrap_or(defaults.content),
        summary: text_field(obj, "summary").unwrap_or(defaults.summary),
        source: text_field(obj, "source").unwrap_or(defaults.source),
        url: text_field(obj, "url").unwrap_or(defaults.url),
        published_at: text_field(obj, "publishedAt").unwrap_or(defaults.published_at),
        category: text_field(obj, "category").unwrap_or(defaults.category),
    }
}

/// Reads a truthy field as text; non-string scalars use their JSON spelling
fn text_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    let value = obj.get(key).filter(|v| is_truthy(v))?;
    match value {
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DEFAULT_CATEGORY, DEFAULT_SOURCE, DEFAULT_TITLE};
    use chrono::TimeZone;
    use serde_json::json;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 2, 6, 30, 0).unwrap()
    }

    #[test]
    fn test_validate_accepts_minimal_document() {
        let payload = json!({
            "summary": "A\nB",
            "news": [{"title": "T", "source": "S", "publishedAt": "2024-01-01T00:00:00Z"}]
        });
        assert!(validate_news_data(&payload));
    }

    #[test]
    fn test_validate_rejects_non_object() {
        assert!(!validate_news_data(&json!(null)));
        assert!(!validate_news_data(&json!("news")));
        assert!(!validate_news_data(&json!(42)));
        assert!(!validate_news_data(&json!([])));
    }

    #[test]
    fn test_validate_rejects_non_text_summary() {
        assert!(!validate_news_data(&json!({"summary": 12})));
        assert!(!validate_news_data(&json!({"summary": ["a"]})));
    }

    #[test]
    fn test_validate_ignores_falsy_summary() {
        assert!(validate_news_data(&json!({"summary": null})));
        assert!(validate_news_data(&json!({"summary": ""})));
    }

    #[test]
    fn test_validate_rejects_item_missing_required_field() {
        let missing_source = json!({
            "news": [{"title": "T", "publishedAt": "2024-01-01T00:00:00Z"}]
        });
        let empty_title = json!({
            "news": [{"title": "", "source": "S", "publishedAt": "2024-01-01T00:00:00Z"}]
        });
        assert!(!validate_news_data(&missing_source));
        assert!(!validate_news_data(&empty_title));
    }

    #[test]
    fn test_validate_accepts_empty_object_and_non_array_news() {
        assert!(validate_news_data(&json!({})));
        assert!(validate_news_data(&json!({"news": "later"})));
    }

    #[test]
    fn test_normalize_fills_defaults() {
        let payload = json!({
            "summary": "A\nB",
            "news": [{"title": "T", "source": "S", "publishedAt": "2024-01-01T00:00:00Z"}]
        });

        let normalized = normalize_news_data(&payload, fixed_now());

        assert_eq!(normalized.summary, "A\nB");
        assert_eq!(normalized.last_updated, "2024-05-02T06:30:00.000Z");
        assert_eq!(
            normalized.news,
            vec![NewsItem {
                title: "T".to_string(),
                content: String::new(),
                summary: String::new(),
                source: "S".to_string(),
                url: String::new(),
                published_at: "2024-01-01T00:00:00Z".to_string(),
                category: "경제".to_string(),
            }]
        );
    }

    #[test]
    fn test_normalize_item_with_nothing() {
        let normalized = normalize_news_data(&json!({"news": [{}]}), fixed_now());
        let item = &normalized.news[0];

        assert_eq!(item.title, DEFAULT_TITLE);
        assert_eq!(item.source, DEFAULT_SOURCE);
        assert_eq!(item.category, DEFAULT_CATEGORY);
        assert_eq!(item.published_at, "2024-05-02T06:30:00.000Z");
    }

    #[test]
    fn test_normalize_keeps_existing_last_updated() {
        let payload = json!({"lastUpdated": "2024-04-30T21:00:00", "news": []});
        let normalized = normalize_news_data(&payload, fixed_now());
        assert_eq!(normalized.last_updated, "2024-04-30T21:00:00");
    }

    #[test]
    fn test_normalize_non_object_is_empty_payload() {
        let normalized = normalize_news_data(&json!([1, 2, 3]), fixed_now());
        assert_eq!(normalized, NewsPayload::empty(fixed_now()));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let payload = json!({
            "summary": "오늘의 경제",
            "news": [
                {"title": "금리 동결", "source": "한국경제", "publishedAt": "2024-05-01T09:00:00"},
                {"content": "본문만 있음", "category": "증시"},
                null
            ]
        });

        let once = normalize_news_data(&payload, fixed_now());
        let later = fixed_now() + chrono::Duration::hours(3);
        let twice = normalize_news_data(&serde_json::to_value(&once).unwrap(), later);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_normalize_stringifies_scalar_fields() {
        let payload = json!({"news": [{"title": 2024, "source": true}]});
        let normalized = normalize_news_data(&payload, fixed_now());
        assert_eq!(normalized.news[0].title, "2024");
        assert_eq!(normalized.news[0].source, "true");
    }
}
