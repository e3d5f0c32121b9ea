//! Plain-text rendering of digest data for the terminal

use serde_json::Value;

use crate::data::{NewsPayload, TipsPayload};
use crate::knowledge::{AskResponse, CategoryKnowledge, CategoryList, KnowledgeRecord};
use crate::loader::RefreshOutcome;
use crate::storage::UserSettings;

/// Daily summary followed by a numbered article list
pub fn render_news(payload: &NewsPayload) -> String {
    let mut out = format!("오늘의 경제 뉴스 요약 ({})\n\n", payload.last_updated);
    if payload.summary.is_empty() {
        out.push_str("  (요약 없음)\n");
    } else {
        for line in payload.summary.lines() {
            out.push_str(&format!("  {}\n", line));
        }
    }
    out.push('\n');
    for (i, item) in payload.news.iter().enumerate() {
        out.push_str(&format!(
            "{:>2}. [{}] {} - {} ({})\n",
            i + 1,
            item.category,
            item.title,
            item.source,
            item.published_at
        ));
        if !item.url.is_empty() {
            out.push_str(&format!("    {}\n", item.url));
        }
    }
    out
}

/// Titles of the finance tips, or a note when the document has none
pub fn render_tips(tips: &TipsPayload) -> String {
    let mut out = format!("경제 상식 {}개\n", tips.count());
    for tip in tips.tips() {
        let title = tip.get("title").and_then(Value::as_str).unwrap_or("제목 없음");
        let category = tip.get("category").and_then(Value::as_str).unwrap_or("");
        out.push_str(&format!("  • [{}] {}\n", category, title));
    }
    out
}

/// The answer text, or the failure message
pub fn render_answer(response: &AskResponse) -> String {
    match (&response.data, &response.error) {
        (Some(data), _) if response.success => format!("Q. {}\n\n{}\n", data.question, data.answer),
        (_, Some(error)) => format!("오류: {}\n", error),
        _ => "오류: 알 수 없는 오류가 발생했습니다.\n".to_string(),
    }
}

/// One line per record: title and category
pub fn render_records(records: &[KnowledgeRecord]) -> String {
    if records.is_empty() {
        return "검색 결과가 없습니다.\n".to_string();
    }
    records
        .iter()
        .map(|record| format!("  • {} ({})\n", record.title, record.category))
        .collect()
}

pub fn render_categories(list: &CategoryList) -> String {
    format!("카테고리 {}개: {}\n", list.count, list.categories.join(", "))
}

pub fn render_category_knowledge(knowledge: &CategoryKnowledge) -> String {
    let mut out = format!("[{}] {}건\n", knowledge.category, knowledge.count);
    out.push_str(&render_records(&knowledge.knowledge));
    out
}

pub fn render_suggestions(questions: &[&str]) -> String {
    questions.iter().map(|q| format!("  • {}\n", q)).collect()
}

pub fn render_refresh(outcome: &RefreshOutcome) -> String {
    if outcome.success {
        "데이터가 새로고침되었습니다.\n".to_string()
    } else {
        format!(
            "새로고침에 실패했습니다: {}\n",
            outcome.error.as_deref().unwrap_or("알 수 없는 오류가 발생했습니다.")
        )
    }
}

/// One `key: value` line per preference, keyed as stored
pub fn render_settings(settings: &UserSettings) -> String {
    format!(
        "theme: {}\nautoRefresh: {}\nnotifications: {}\n",
        settings.theme, settings.auto_refresh, settings.notifications
    )
}
