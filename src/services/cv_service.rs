use crate::error::Result;
use crate::models::cv::{Cv, ParsingStatus};
use crate::models::embedding::SourceType;
use crate::services::embed_service::EmbedService;
use crate::services::extract_service::ExtractService;
use crate::services::vector_service::VectorService;
use crate::utils::files::extract_text_from_file;
use sqlx::PgPool;
use uuid::Uuid;

const CV_COLUMNS: &str = "id, candidate_id, file_name, file_path, is_primary, \
    parsing_status, parsed_data, uploaded_at, parsed_at";

#[derive(Clone)]
pub struct CvService {
    pool: PgPool,
}

impl CvService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the CV record in `pending` state. The first CV of a candidate
    /// becomes primary automatically; at most one CV per candidate is primary.
    pub async fn create(
        &self,
        candidate_id: Uuid,
        file_name: String,
        file_path: String,
        mut is_primary: bool,
    ) -> Result<Cv> {
        let existing: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM cvs WHERE candidate_id = $1")
                .bind(candidate_id)
                .fetch_one(&self.pool)
                .await?;
        if existing == 0 {
            is_primary = true;
        }
        if is_primary {
            sqlx::query("UPDATE cvs SET is_primary = FALSE WHERE candidate_id = $1 AND is_primary")
                .bind(candidate_id)
                .execute(&self.pool)
                .await?;
        }

        let sql = format!(
            r#"
            INSERT INTO cvs (candidate_id, file_name, file_path, is_primary, parsing_status)
            VALUES ($1, $2, $3, $4, 'pending')
            RETURNING {CV_COLUMNS}
            "#
        );
        let cv = sqlx::query_as::<_, Cv>(&sql)
            .bind(candidate_id)
            .bind(file_name)
            .bind(file_path)
            .bind(is_primary)
            .fetch_one(&self.pool)
            .await?;

        Ok(cv)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Cv> {
        let sql = format!("SELECT {CV_COLUMNS} FROM cvs WHERE id = $1");
        let cv = sqlx::query_as::<_, Cv>(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(cv)
    }

    pub async fn list_for_candidate(&self, candidate_id: Uuid) -> Result<Vec<Cv>> {
        let sql = format!(
            "SELECT {CV_COLUMNS} FROM cvs WHERE candidate_id = $1 ORDER BY uploaded_at DESC"
        );
        let cvs = sqlx::query_as::<_, Cv>(&sql)
            .bind(candidate_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(cvs)
    }

    pub async fn get_primary(&self, candidate_id: Uuid) -> Result<Option<Cv>> {
        let sql = format!(
            "SELECT {CV_COLUMNS} FROM cvs WHERE candidate_id = $1 AND is_primary"
        );
        let cv = sqlx::query_as::<_, Cv>(&sql)
            .bind(candidate_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(cv)
    }

    pub async fn set_primary(&self, candidate_id: Uuid, cv_id: Uuid) -> Result<Cv> {
        // Ownership check before touching flags.
        let sql = format!("SELECT {CV_COLUMNS} FROM cvs WHERE id = $1 AND candidate_id = $2");
        sqlx::query_as::<_, Cv>(&sql)
            .bind(cv_id)
            .bind(candidate_id)
            .fetch_one(&self.pool)
            .await?;

        sqlx::query("UPDATE cvs SET is_primary = FALSE WHERE candidate_id = $1 AND is_primary")
            .bind(candidate_id)
            .execute(&self.pool)
            .await?;

        let sql = format!(
            "UPDATE cvs SET is_primary = TRUE WHERE id = $1 RETURNING {CV_COLUMNS}"
        );
        let cv = sqlx::query_as::<_, Cv>(&sql)
            .bind(cv_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(cv)
    }

    pub async fn set_status(&self, id: Uuid, status: ParsingStatus) -> Result<()> {
        sqlx::query("UPDATE cvs SET parsing_status = $1 WHERE id = $2")
            .bind(status.as_str())
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn store_parsed(&self, id: Uuid, parsed: &crate::models::cv::ParsedCv) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE cvs
            SET parsing_status = $1, parsed_data = $2, parsed_at = NOW()
            WHERE id = $3
            "#,
        )
        .bind(ParsingStatus::Completed.as_str())
        .bind(serde_json::to_value(parsed)?)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// The parsing pipeline: extract text, call the skill extractor, persist
    /// the structured result, then index the CV for similarity search.
    ///
    /// Any failure leaves the CV in `failed` state with the raw file intact;
    /// retries are on demand only. Never returns an error to the caller.
    pub async fn run_parse_pipeline(
        &self,
        cv_id: Uuid,
        extract: &ExtractService,
        embed: &EmbedService,
        vectors: &VectorService,
    ) {
        if let Err(e) = self.parse_inner(cv_id, extract, embed, vectors).await {
            tracing::error!(cv_id = %cv_id, error = ?e, "CV parse pipeline failed");
            if let Err(e) = self.set_status(cv_id, ParsingStatus::Failed).await {
                tracing::error!(cv_id = %cv_id, error = ?e, "Failed to mark CV as failed");
            }
        }
    }

    async fn parse_inner(
        &self,
        cv_id: Uuid,
        extract: &ExtractService,
        embed: &EmbedService,
        vectors: &VectorService,
    ) -> Result<()> {
        let cv = self.get_by_id(cv_id).await?;
        self.set_status(cv_id, ParsingStatus::Pending).await?;

        let text = extract_text_from_file(&cv.file_path).await;
        if text.trim().len() < 50 {
            return Err(crate::error::Error::BadRequest(
                "Document text too short to parse".into(),
            ));
        }

        let parsed = extract.parse_resume(&text).await?;
        self.store_parsed(cv_id, &parsed).await?;

        // Indexing failure is tolerable: the CV stays parsed, only semantic
        // matching degrades.
        match embed.embed_text(&text).await {
            Ok(vector) => {
                if let Err(e) = vectors
                    .store_embedding(&text, &vector, SourceType::Cv, Some(cv_id), None)
                    .await
                {
                    tracing::warn!(cv_id = %cv_id, error = ?e, "CV embedding store failed");
                }
            }
            Err(e) => {
                tracing::warn!(cv_id = %cv_id, error = ?e, "CV embedding generation failed");
            }
        }

        Ok(())
    }
}
