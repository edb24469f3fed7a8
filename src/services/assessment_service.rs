use crate::dto::assessment_dto::CreateAssessmentPayload;
use crate::error::Result;
use crate::models::assessment::BehavioralAssessment;
use sqlx::PgPool;
use uuid::Uuid;

const ASSESSMENT_COLUMNS: &str = "id, application_id, interview_id, overall_score, \
    communication_score, problem_solving_score, cultural_fit_score, feedback_summary, \
    detailed_feedback, created_at";

/// Overall behavioral score: plain mean of the three sub-scores.
pub fn overall_score(communication: f64, problem_solving: f64, cultural_fit: f64) -> f64 {
    (communication + problem_solving + cultural_fit) / 3.0
}

#[derive(Clone)]
pub struct AssessmentService {
    pool: PgPool,
}

impl AssessmentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Records a behavioral assessment. The overall score is the average of
    /// the three sub-scores; the caller is responsible for propagating it to
    /// the application and re-ranking.
    pub async fn create(&self, payload: CreateAssessmentPayload) -> Result<BehavioralAssessment> {
        let overall = overall_score(
            payload.communication_score,
            payload.problem_solving_score,
            payload.cultural_fit_score,
        );

        let sql = format!(
            r#"
            INSERT INTO behavioral_assessment_scores (
                application_id, interview_id, overall_score, communication_score,
                problem_solving_score, cultural_fit_score,
                feedback_summary, detailed_feedback
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {ASSESSMENT_COLUMNS}
            "#
        );
        let assessment = sqlx::query_as::<_, BehavioralAssessment>(&sql)
            .bind(payload.application_id)
            .bind(payload.interview_id)
            .bind(overall)
            .bind(payload.communication_score)
            .bind(payload.problem_solving_score)
            .bind(payload.cultural_fit_score)
            .bind(payload.feedback_summary)
            .bind(payload.detailed_feedback)
            .fetch_one(&self.pool)
            .await?;

        Ok(assessment)
    }

    pub async fn list_for_application(
        &self,
        application_id: Uuid,
    ) -> Result<Vec<BehavioralAssessment>> {
        let sql = format!(
            r#"
            SELECT {ASSESSMENT_COLUMNS} FROM behavioral_assessment_scores
            WHERE application_id = $1
            ORDER BY created_at DESC
            "#
        );
        let assessments = sqlx::query_as::<_, BehavioralAssessment>(&sql)
            .bind(application_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(assessments)
    }
}

#[cfg(test)]
mod tests {
    use super::overall_score;

    #[test]
    fn overall_is_the_average_of_sub_scores() {
        assert!((overall_score(90.0, 75.0, 60.0) - 75.0).abs() < 1e-9);
        assert!((overall_score(100.0, 100.0, 100.0) - 100.0).abs() < 1e-9);
        assert!(overall_score(0.0, 0.0, 0.0).abs() < 1e-9);
    }

    #[test]
    fn overall_stays_within_the_sub_score_range() {
        let overall = overall_score(40.0, 90.0, 65.0);
        assert!(overall >= 40.0 && overall <= 90.0);
    }
}
