use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateFaqPayload {
    pub category: Option<String>,
    #[validate(length(min = 1))]
    pub question: String,
    #[validate(length(min = 1))]
    pub answer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqSearchQuery {
    pub q: String,
    pub limit: Option<i64>,
}

/// One knowledge-base entry as returned from a semantic search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqEntry {
    pub id: Uuid,
    pub category: Option<String>,
    pub question: String,
    pub answer: String,
    pub similarity: f64,
}
