use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use uuid::Uuid;

/// Fixed dimensionality of the deployed embedding model.
pub const EMBEDDING_DIM: usize = 384;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    Cv,
    JobRole,
    Faq,
}

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Cv => "cv",
            SourceType::JobRole => "job_role",
            SourceType::Faq => "faq",
        }
    }
}

/// A stored vector row. The actual `vector(384)` column stays inside Postgres;
/// this struct carries everything a similarity hit needs.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SimilarityHit {
    pub id: Uuid,
    pub content: String,
    pub source_type: String,
    pub source_id: Option<Uuid>,
    pub metadata: Option<JsonValue>,
    pub similarity: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_type_covers_the_stored_vocabulary() {
        assert_eq!(SourceType::Cv.as_str(), "cv");
        assert_eq!(SourceType::JobRole.as_str(), "job_role");
        assert_eq!(SourceType::Faq.as_str(), "faq");
    }
}
