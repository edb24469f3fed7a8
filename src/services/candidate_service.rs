use crate::dto::candidate_dto::RegisterCandidatePayload;
use crate::error::Result;
use crate::models::candidate::Candidate;
use sqlx::PgPool;
use uuid::Uuid;

const CANDIDATE_COLUMNS: &str =
    "id, name, email, phone, years_of_experience, profile_links, created_at, updated_at";

#[derive(Clone)]
pub struct CandidateService {
    pool: PgPool,
}

impl CandidateService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn register(&self, payload: RegisterCandidatePayload) -> Result<Candidate> {
        let exists: Option<Uuid> = sqlx::query_scalar("SELECT id FROM candidates WHERE email = $1")
            .bind(&payload.email)
            .fetch_optional(&self.pool)
            .await?;
        if exists.is_some() {
            return Err(anyhow::anyhow!(
                "A candidate with this email address already exists."
            )
            .into());
        }

        let sql = format!(
            r#"
            INSERT INTO candidates (name, email, phone, years_of_experience, profile_links)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {CANDIDATE_COLUMNS}
            "#
        );
        let candidate = sqlx::query_as::<_, Candidate>(&sql)
            .bind(payload.name)
            .bind(payload.email)
            .bind(payload.phone)
            .bind(payload.years_of_experience)
            .bind(payload.profile_links)
            .fetch_one(&self.pool)
            .await?;

        Ok(candidate)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Candidate> {
        let sql = format!("SELECT {CANDIDATE_COLUMNS} FROM candidates WHERE id = $1");
        let candidate = sqlx::query_as::<_, Candidate>(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(candidate)
    }

    pub async fn list(&self) -> Result<Vec<Candidate>> {
        let sql =
            format!("SELECT {CANDIDATE_COLUMNS} FROM candidates ORDER BY created_at DESC");
        let candidates = sqlx::query_as::<_, Candidate>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(candidates)
    }

    /// Talent Orbit: candidates whose applications were all rejected, retained
    /// for matching against future roles.
    pub async fn list_talent_orbit(&self) -> Result<Vec<Candidate>> {
        let sql = format!(
            r#"
            SELECT {CANDIDATE_COLUMNS} FROM candidates c
            WHERE EXISTS (
                SELECT 1 FROM applications a
                WHERE a.candidate_id = c.id AND a.status = 'rejected'
            )
            AND NOT EXISTS (
                SELECT 1 FROM applications a
                WHERE a.candidate_id = c.id AND a.status <> 'rejected'
            )
            ORDER BY c.created_at DESC
            "#
        );
        let candidates = sqlx::query_as::<_, Candidate>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(candidates)
    }
}
