use crate::dto::feedback_dto::{CreateFeedbackPayload, UpdateFeedbackPayload};
use crate::error::{Error, Result};
use crate::models::feedback::{HrFeedback, RECOMMENDATIONS};
use sqlx::PgPool;
use uuid::Uuid;

const FEEDBACK_COLUMNS: &str = "id, application_id, reviewer, strengths, weaknesses, \
    missing_requirements, role_fit_score, recommendation, created_at, updated_at";

#[derive(Clone)]
pub struct FeedbackService {
    pool: PgPool,
}

impl FeedbackService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, payload: CreateFeedbackPayload) -> Result<HrFeedback> {
        validate_recommendation(payload.recommendation.as_deref())?;

        let sql = format!(
            r#"
            INSERT INTO hr_feedback (
                application_id, reviewer, strengths, weaknesses,
                missing_requirements, role_fit_score, recommendation
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {FEEDBACK_COLUMNS}
            "#
        );
        let feedback = sqlx::query_as::<_, HrFeedback>(&sql)
            .bind(payload.application_id)
            .bind(payload.reviewer)
            .bind(payload.strengths)
            .bind(payload.weaknesses)
            .bind(payload.missing_requirements)
            .bind(payload.role_fit_score)
            .bind(payload.recommendation)
            .fetch_one(&self.pool)
            .await?;

        Ok(feedback)
    }

    pub async fn update(&self, id: Uuid, payload: UpdateFeedbackPayload) -> Result<HrFeedback> {
        validate_recommendation(payload.recommendation.as_deref())?;

        let sql = format!(
            r#"
            UPDATE hr_feedback
            SET
                strengths = COALESCE($2, strengths),
                weaknesses = COALESCE($3, weaknesses),
                missing_requirements = COALESCE($4, missing_requirements),
                role_fit_score = COALESCE($5, role_fit_score),
                recommendation = COALESCE($6, recommendation),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {FEEDBACK_COLUMNS}
            "#
        );
        let feedback = sqlx::query_as::<_, HrFeedback>(&sql)
            .bind(id)
            .bind(payload.strengths)
            .bind(payload.weaknesses)
            .bind(payload.missing_requirements)
            .bind(payload.role_fit_score)
            .bind(payload.recommendation)
            .fetch_one(&self.pool)
            .await?;

        Ok(feedback)
    }

    pub async fn list_for_application(&self, application_id: Uuid) -> Result<Vec<HrFeedback>> {
        let sql = format!(
            r#"
            SELECT {FEEDBACK_COLUMNS} FROM hr_feedback
            WHERE application_id = $1
            ORDER BY created_at DESC
            "#
        );
        let feedback = sqlx::query_as::<_, HrFeedback>(&sql)
            .bind(application_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(feedback)
    }
}

fn validate_recommendation(recommendation: Option<&str>) -> Result<()> {
    if let Some(value) = recommendation {
        if !RECOMMENDATIONS.contains(&value) {
            return Err(Error::BadRequest(format!(
                "Recommendation must be one of: {}",
                RECOMMENDATIONS.join(", ")
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_recommendations_are_accepted() {
        assert!(validate_recommendation(Some("hire")).is_ok());
        assert!(validate_recommendation(Some("maybe")).is_ok());
        assert!(validate_recommendation(Some("reject")).is_ok());
        assert!(validate_recommendation(None).is_ok());
    }

    #[test]
    fn unknown_recommendation_is_rejected() {
        assert!(validate_recommendation(Some("strong hire")).is_err());
    }
}
