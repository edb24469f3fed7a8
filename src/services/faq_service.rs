use crate::dto::faq_dto::{CreateFaqPayload, FaqEntry};
use crate::error::{Error, Result};
use crate::models::embedding::{SimilarityHit, SourceType};
use crate::services::embed_service::EmbedService;
use crate::services::vector_service::VectorService;
use uuid::Uuid;

/// HR-maintained knowledge base for candidates: each entry lives directly in
/// the embeddings table (content plus metadata), searched semantically.
#[derive(Clone)]
pub struct FaqService {
    embed: EmbedService,
    vectors: VectorService,
}

impl FaqService {
    pub fn new(embed: EmbedService, vectors: VectorService) -> Self {
        Self { embed, vectors }
    }

    pub async fn add_entry(&self, payload: CreateFaqPayload) -> Result<Uuid> {
        let content = faq_content(&payload.question, &payload.answer);
        let vector = self.embed.embed_text(&content).await?;
        let metadata = serde_json::json!({
            "category": payload.category,
            "question": payload.question,
            "answer": payload.answer,
        });
        self.vectors
            .store_embedding(&content, &vector, SourceType::Faq, None, Some(metadata))
            .await
    }

    pub async fn remove_entry(&self, id: Uuid) -> Result<()> {
        let deleted = self.vectors.delete_by_id(id).await?;
        if deleted == 0 {
            return Err(Error::NotFound("FAQ entry not found".into()));
        }
        Ok(())
    }

    /// Nearest entries to a free-text question, best match first.
    pub async fn search(
        &self,
        query: &str,
        threshold: f64,
        limit: i64,
    ) -> Result<Vec<FaqEntry>> {
        let vector = self.embed.embed_text(query).await?;
        let hits = self
            .vectors
            .search_similar(&vector, threshold, limit, Some(SourceType::Faq))
            .await?;
        Ok(hits.iter().map(entry_from_hit).collect())
    }
}

/// Text that gets embedded for one entry; question and answer together so a
/// query can match either side.
fn faq_content(question: &str, answer: &str) -> String {
    format!("Q: {}\nA: {}", question.trim(), answer.trim())
}

fn entry_from_hit(hit: &SimilarityHit) -> FaqEntry {
    let field = |name: &str| {
        hit.metadata
            .as_ref()
            .and_then(|m| m.get(name))
            .and_then(|v| v.as_str())
            .map(str::to_string)
    };
    FaqEntry {
        id: hit.id,
        category: field("category"),
        question: field("question").unwrap_or_default(),
        answer: field("answer").unwrap_or_else(|| hit.content.clone()),
        similarity: hit.similarity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_carries_both_question_and_answer() {
        let content = faq_content("  What is the dress code?  ", "Casual.\n");
        assert_eq!(content, "Q: What is the dress code?\nA: Casual.");
    }

    #[test]
    fn entry_is_rebuilt_from_hit_metadata() {
        let hit = SimilarityHit {
            id: Uuid::new_v4(),
            content: "Q: Remote work?\nA: Two days a week.".into(),
            source_type: "faq".into(),
            source_id: None,
            metadata: Some(serde_json::json!({
                "category": "policies",
                "question": "Remote work?",
                "answer": "Two days a week.",
            })),
            similarity: 0.91,
        };
        let entry = entry_from_hit(&hit);
        assert_eq!(entry.category.as_deref(), Some("policies"));
        assert_eq!(entry.question, "Remote work?");
        assert_eq!(entry.answer, "Two days a week.");
        assert!((entry.similarity - 0.91).abs() < 1e-9);
    }

    #[test]
    fn entry_falls_back_to_stored_content_without_metadata() {
        let hit = SimilarityHit {
            id: Uuid::new_v4(),
            content: "Q: Benefits?\nA: Health and dental.".into(),
            source_type: "faq".into(),
            source_id: None,
            metadata: None,
            similarity: 0.5,
        };
        let entry = entry_from_hit(&hit);
        assert_eq!(entry.question, "");
        assert_eq!(entry.answer, "Q: Benefits?\nA: Health and dental.");
    }
}
