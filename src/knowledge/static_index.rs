//! Keyword-scored index over the built-in finance dataset
//!
//! Scoring is a single pass: +3 when the title contains the query, +2 when
//! any keyword does, +1 when the content does. Matching is a plain
//! lowercase substring test.

use async_trait::async_trait;
use chrono::Utc;

use super::{
    finance_knowledge, AnswerData, AskResponse, CategoryKnowledge, CategoryList, KnowledgeError,
    KnowledgeProvider, KnowledgeRecord, RelatedKnowledge, SUGGESTED_QUESTIONS,
};
use crate::clock::iso_millis;

/// Number of records an answer draws on
pub const ANSWER_TOP_K: usize = 3;

/// Characters of content quoted for each related record
pub const EXCERPT_CHARS: usize = 100;

/// Reply when nothing matches
pub const NO_MATCH_ANSWER: &str = "죄송합니다. 관련 정보를 찾을 수 없습니다. 다른 질문을 해주세요.";

const TITLE_WEIGHT: u32 = 3;
const KEYWORD_WEIGHT: u32 = 2;
const CONTENT_WEIGHT: u32 = 1;

/// In-memory keyword index; never fails
#[derive(Debug, Clone)]
pub struct StaticKnowledgeIndex {
    records: Vec<KnowledgeRecord>,
}

impl Default for StaticKnowledgeIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl StaticKnowledgeIndex {
    /// Index over the built-in dataset
    pub fn new() -> Self {
        Self::with_records(finance_knowledge())
    }

    /// Index over a caller-supplied dataset
    pub fn with_records(records: Vec<KnowledgeRecord>) -> Self {
        Self { records }
    }

    /// Records in their original order
    pub fn records(&self) -> &[KnowledgeRecord] {
        &self.records
    }

    /// Ranks records against `query`, best first
    ///
    /// Zero-score records are dropped and ties keep dataset order. A blank
    /// query matches nothing.
    pub fn search_knowledge(&self, query: &str, top_k: usize) -> Vec<KnowledgeRecord> {
        if query.trim().is_empty() {
            return Vec::new();
        }
        let query = query.to_lowercase();

        let mut scored: Vec<(u32, &KnowledgeRecord)> = self
            .records
            .iter()
            .map(|record| (score(record, &query), record))
            .filter(|(score, _)| *score > 0)
            .collect();

        // stable: equal scores stay in dataset order
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        scored
            .into_iter()
            .take(top_k)
            .map(|(_, record)| record.clone())
            .collect()
    }

    /// Composes an answer from the best matches for `question`
    pub fn generate_answer(&self, question: &str) -> String {
        let matches = self.search_knowledge(question, ANSWER_TOP_K);
        let Some((main, related)) = matches.split_first() else {
            return NO_MATCH_ANSWER.to_string();
        };

        let mut answer = format!("**{}**에 대해 설명드리겠습니다.\n\n{}", main.title, main.content);

        if !related.is_empty() {
            answer.push_str("\n\n**관련 정보:**\n");
            for item in related {
                let excerpt: String = item.content.chars().take(EXCERPT_CHARS).collect();
                answer.push_str(&format!("• {}: {}...\n", item.title, excerpt));
            }
        }

        answer
    }

    /// Answers `question`; always succeeds
    pub fn ask_question(&self, question: &str) -> AskResponse {
        let related_knowledge = self
            .search_knowledge(question, ANSWER_TOP_K)
            .iter()
            .map(RelatedKnowledge::from)
            .collect();

        AskResponse::answered(AnswerData {
            question: question.to_string(),
            answer: self.generate_answer(question),
            related_knowledge,
            timestamp: iso_millis(Utc::now()),
        })
    }

    /// Distinct categories in first-seen order
    pub fn get_categories(&self) -> CategoryList {
        let mut categories: Vec<String> = Vec::new();
        for record in &self.records {
            if !categories.contains(&record.category) {
                categories.push(record.category.clone());
            }
        }
        let count = categories.len();
        CategoryList { categories, count }
    }

    /// Records whose category exactly equals `category`
    pub fn get_knowledge_by_category(&self, category: &str) -> CategoryKnowledge {
        let knowledge: Vec<KnowledgeRecord> = self
            .records
            .iter()
            .filter(|r| r.category == category)
            .cloned()
            .collect();
        let count = knowledge.len();
        CategoryKnowledge {
            category: category.to_string(),
            knowledge,
            count,
        }
    }

    pub fn get_suggested_questions(&self) -> &'static [&'static str] {
        &SUGGESTED_QUESTIONS
    }
}

/// Relevance of `record` to an already-lowercased query
fn score(record: &KnowledgeRecord, query: &str) -> u32 {
    let mut score = 0;
    if record.title.to_lowercase().contains(query) {
        score += TITLE_WEIGHT;
    }
    if record
        .keywords
        .iter()
        .any(|k| k.to_lowercase().contains(query))
    {
        score += KEYWORD_WEIGHT;
    }
    if record.content.to_lowercase().contains(query) {
        score += CONTENT_WEIGHT;
    }
    score
}

#[async_trait]
impl KnowledgeProvider for StaticKnowledgeIndex {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn initialize(&mut self) -> bool {
        true
    }

    async fn ask(&self, question: &str) -> AskResponse {
        self.ask_question(question)
    }

    async fn search(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<KnowledgeRecord>, KnowledgeError> {
        Ok(self.search_knowledge(query, top_k))
    }

    async fn categories(&mut self) -> CategoryList {
        self.get_categories()
    }

    async fn knowledge_by_category(&mut self, category: &str) -> CategoryKnowledge {
        self.get_knowledge_by_category(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(records: &[KnowledgeRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    fn tiny_record(id: &str, title: &str, content: &str, keywords: &[&str]) -> KnowledgeRecord {
        KnowledgeRecord {
            id: id.to_string(),
            title: title.to_string(),
            content: content.to_string(),
            category: "테스트".to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    #[test]
    fn test_etf_query_ranks_etf_record_first() {
        let index = StaticKnowledgeIndex::new();

        let results = index.search_knowledge("ETF", 3);

        assert_eq!(ids(&results), vec!["etf_investment", "stock_investment", "isa_account"]);
        assert_eq!(score(&results[0], "etf"), 6);
        assert!(results[1..].iter().all(|r| score(r, "etf") <= 2));
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let index = StaticKnowledgeIndex::new();
        assert_eq!(index.search_knowledge("etf", 3), index.search_knowledge("ETF", 3));
        assert_eq!(index.search_knowledge("reits", 1)[0].id, "real_estate_investment");
    }

    #[test]
    fn test_exact_title_query_ranks_that_record_first() {
        let index = StaticKnowledgeIndex::new();
        for record in index.records() {
            let query = record.title.to_lowercase();
            let results = index.search_knowledge(&query, 10);
            assert_eq!(results[0].id, record.id, "title query {:?}", record.title);
            assert!(score(record, &query) >= TITLE_WEIGHT);
        }
    }

    #[test]
    fn test_results_respect_top_k_and_descend() {
        let index = StaticKnowledgeIndex::new();
        for top_k in 0..=10 {
            let results = index.search_knowledge("투자", top_k);
            assert!(results.len() <= top_k);
            let scores: Vec<u32> = results.iter().map(|r| score(r, "투자")).collect();
            assert!(scores.windows(2).all(|w| w[0] >= w[1]), "{:?}", scores);
        }
    }

    #[test]
    fn test_ties_keep_dataset_order() {
        let index = StaticKnowledgeIndex::with_records(vec![
            tiny_record("a", "alpha", "shared word", &[]),
            tiny_record("b", "beta", "nothing", &["shared"]),
            tiny_record("c", "gamma", "shared again", &[]),
        ]);

        let results = index.search_knowledge("shared", 5);

        assert_eq!(ids(&results), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_zero_score_records_are_excluded() {
        let index = StaticKnowledgeIndex::new();
        assert!(index.search_knowledge("존재하지않는단어", 3).is_empty());
    }

    #[test]
    fn test_blank_query_matches_nothing() {
        let index = StaticKnowledgeIndex::new();
        assert!(index.search_knowledge("", 3).is_empty());
        assert!(index.search_knowledge("   ", 3).is_empty());
        assert_eq!(index.generate_answer(""), NO_MATCH_ANSWER);
    }

    #[test]
    fn test_generate_answer_without_matches() {
        let index = StaticKnowledgeIndex::new();
        assert_eq!(index.generate_answer("날씨 어때요"), NO_MATCH_ANSWER);
    }

    #[test]
    fn test_generate_answer_with_related_section() {
        let index = StaticKnowledgeIndex::new();

        let answer = index.generate_answer("ETF");

        assert!(answer.starts_with("**ETF (상장지수펀드)**에 대해 설명드리겠습니다.\n\nETF는"));
        assert!(answer.contains("\n\n**관련 정보:**\n"));
        assert!(answer.contains("• 주식 투자: "));
        assert!(answer.contains("• ISA (개인종합자산관리계좌): "));
        assert!(answer.ends_with("...\n"));
    }

    #[test]
    fn test_related_excerpt_is_100_chars() {
        let long_content: String = "가".repeat(150);
        let index = StaticKnowledgeIndex::with_records(vec![
            tiny_record("main", "목표", "목표 본문", &[]),
            tiny_record("side", "부가", &format!("목표{}", long_content), &[]),
        ]);

        let answer = index.generate_answer("목표");

        let line = answer
            .lines()
            .find(|l| l.starts_with("• 부가: "))
            .expect("related line present");
        let excerpt = line
            .trim_start_matches("• 부가: ")
            .trim_end_matches("...");
        assert_eq!(excerpt.chars().count(), EXCERPT_CHARS);
    }

    #[test]
    fn test_single_match_has_no_related_section() {
        let index = StaticKnowledgeIndex::new();
        let answer = index.generate_answer("비트코인");
        assert!(answer.starts_with("**암호화폐 투자**"));
        assert!(!answer.contains("관련 정보"));
    }

    #[test]
    fn test_ask_question_wraps_answer_and_related() {
        let index = StaticKnowledgeIndex::new();

        let response = index.ask_question("ETF");

        assert!(response.success);
        let data = response.data.expect("answer data");
        assert_eq!(data.question, "ETF");
        assert_eq!(data.related_knowledge.len(), 3);
        assert_eq!(data.related_knowledge[0].metadata.title, "ETF (상장지수펀드)");
        assert!(!data.timestamp.is_empty());
    }

    #[test]
    fn test_ask_question_succeeds_without_matches() {
        let index = StaticKnowledgeIndex::new();
        let response = index.ask_question("zzz");
        assert!(response.success);
        let data = response.data.unwrap();
        assert_eq!(data.answer, NO_MATCH_ANSWER);
        assert!(data.related_knowledge.is_empty());
    }

    #[test]
    fn test_categories_in_first_seen_order() {
        let index = StaticKnowledgeIndex::new();

        let list = index.get_categories();

        assert_eq!(list.categories, vec!["연금", "투자", "저축", "보험"]);
        assert_eq!(list.count, 4);
    }

    #[test]
    fn test_knowledge_by_category_exact_match() {
        let index = StaticKnowledgeIndex::new();

        let investing = index.get_knowledge_by_category("투자");
        assert_eq!(investing.count, 7);
        assert!(investing.knowledge.iter().all(|r| r.category == "투자"));

        let none = index.get_knowledge_by_category("투");
        assert_eq!(none.count, 0);
        assert!(none.knowledge.is_empty());
    }

    #[test]
    fn test_suggested_questions_are_fixed() {
        let index = StaticKnowledgeIndex::new();
        let questions = index.get_suggested_questions();
        assert_eq!(questions.len(), 10);
        assert_eq!(questions[0], "연금저축이 무엇인가요?");
    }

    #[tokio::test]
    async fn test_trait_object_delegates() {
        let mut provider: Box<dyn KnowledgeProvider> = Box::new(StaticKnowledgeIndex::new());

        assert!(provider.initialize().await);
        assert_eq!(provider.name(), "static");
        assert_eq!(provider.search("ETF", 1).await.unwrap()[0].id, "etf_investment");
        assert_eq!(provider.categories().await.count, 4);
        assert_eq!(provider.knowledge_by_category("보험").await.count, 1);
        assert!(provider.ask("연금저축").await.success);
        assert_eq!(provider.suggested_questions().len(), 10);
    }
}
