use crate::error::Result;
use crate::models::embedding::{SimilarityHit, SourceType, EMBEDDING_DIM};
use serde_json::Value as JsonValue;
use sqlx::PgPool;
use uuid::Uuid;

/// Similarity store over the pgvector `embeddings` table. Vectors travel as
/// their text literal and are cast to `vector(384)` inside Postgres.
#[derive(Clone)]
pub struct VectorService {
    pool: PgPool,
}

impl VectorService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Replaces any previous embedding of the same source, keeping the
    /// embedding lifecycle tied to its source record.
    pub async fn store_embedding(
        &self,
        content: &str,
        embedding: &[f32],
        source_type: SourceType,
        source_id: Option<Uuid>,
        metadata: Option<JsonValue>,
    ) -> Result<Uuid> {
        if embedding.len() != EMBEDDING_DIM {
            return Err(crate::error::Error::BadRequest(format!(
                "Expected {}-dimension embedding, got {}",
                EMBEDDING_DIM,
                embedding.len()
            )));
        }

        if let Some(sid) = source_id {
            sqlx::query("DELETE FROM embeddings WHERE source_type = $1 AND source_id = $2")
                .bind(source_type.as_str())
                .bind(sid)
                .execute(&self.pool)
                .await?;
        }

        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO embeddings (content, embedding, source_type, source_id, metadata)
            VALUES ($1, $2::vector, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(content)
        .bind(vector_literal(embedding))
        .bind(source_type.as_str())
        .bind(source_id)
        .bind(metadata)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    /// Nearest stored vectors by cosine similarity, descending, filtered to
    /// similarity strictly above the threshold.
    pub async fn search_similar(
        &self,
        query_embedding: &[f32],
        threshold: f64,
        limit: i64,
        source_type: Option<SourceType>,
    ) -> Result<Vec<SimilarityHit>> {
        let limit = if limit <= 0 { 5 } else { limit.min(100) };
        let hits = sqlx::query_as::<_, SimilarityHit>(
            r#"
            SELECT id, content, source_type, source_id, metadata,
                   1 - (embedding <=> $1::vector) AS similarity
            FROM embeddings
            WHERE ($2::text IS NULL OR source_type = $2)
              AND 1 - (embedding <=> $1::vector) > $3
            ORDER BY embedding <=> $1::vector
            LIMIT $4
            "#,
        )
        .bind(vector_literal(query_embedding))
        .bind(source_type.map(|s| s.as_str()))
        .bind(threshold)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(hits)
    }

    /// Removes one stored row; used for content that lives only in the
    /// embeddings table and has no owning source record.
    pub async fn delete_by_id(&self, id: Uuid) -> Result<u64> {
        let res = sqlx::query("DELETE FROM embeddings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected())
    }

    pub async fn delete_by_source(
        &self,
        source_type: SourceType,
        source_id: Option<Uuid>,
    ) -> Result<u64> {
        let res = match source_id {
            Some(sid) => {
                sqlx::query("DELETE FROM embeddings WHERE source_type = $1 AND source_id = $2")
                    .bind(source_type.as_str())
                    .bind(sid)
                    .execute(&self.pool)
                    .await?
            }
            None => sqlx::query("DELETE FROM embeddings WHERE source_type = $1")
                .bind(source_type.as_str())
                .execute(&self.pool)
                .await?,
        };
        Ok(res.rows_affected())
    }
}

fn vector_literal(embedding: &[f32]) -> String {
    let mut out = String::with_capacity(embedding.len() * 10 + 2);
    out.push('[');
    for (i, v) in embedding.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&v.to_string());
    }
    out.push(']');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vector_literal_matches_pgvector_syntax() {
        assert_eq!(vector_literal(&[1.0, -0.5, 0.25]), "[1,-0.5,0.25]");
        assert_eq!(vector_literal(&[]), "[]");
    }
}
