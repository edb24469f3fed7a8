use crate::dto::interview_dto::{
    InterviewListQuery, ScheduleInterviewPayload, UpdateInterviewStatusPayload,
};
use crate::error::{Error, Result};
use crate::models::interview::{Interview, InterviewStatus, INTERVIEW_TYPES};
use sqlx::PgPool;
use uuid::Uuid;

const INTERVIEW_COLUMNS: &str = "id, application_id, interview_type, scheduled_at, \
    duration_minutes, location, status, reschedule_count, notes, created_at, updated_at";

#[derive(Clone)]
pub struct InterviewService {
    pool: PgPool,
}

impl InterviewService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts the interview record in `scheduled` state. The caller is
    /// responsible for moving the application itself to `interview_scheduled`.
    pub async fn schedule(&self, payload: ScheduleInterviewPayload) -> Result<Interview> {
        validate_interview_type(&payload.interview_type)?;

        let sql = format!(
            r#"
            INSERT INTO interviews (
                application_id, interview_type, scheduled_at,
                duration_minutes, location, notes
            ) VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {INTERVIEW_COLUMNS}
            "#
        );
        let interview = sqlx::query_as::<_, Interview>(&sql)
            .bind(payload.application_id)
            .bind(payload.interview_type)
            .bind(payload.scheduled_at)
            .bind(payload.duration_minutes.unwrap_or(60))
            .bind(payload.location)
            .bind(payload.notes)
            .fetch_one(&self.pool)
            .await?;

        Ok(interview)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Interview> {
        let sql = format!("SELECT {INTERVIEW_COLUMNS} FROM interviews WHERE id = $1");
        let interview = sqlx::query_as::<_, Interview>(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(interview)
    }

    pub async fn list(&self, query: InterviewListQuery) -> Result<Vec<Interview>> {
        let sql = format!(
            r#"
            SELECT {INTERVIEW_COLUMNS} FROM interviews
            WHERE ($1::uuid IS NULL OR application_id = $1)
              AND ($2::text IS NULL OR status = $2)
            ORDER BY scheduled_at
            "#
        );
        let interviews = sqlx::query_as::<_, Interview>(&sql)
            .bind(query.application_id)
            .bind(query.status)
            .fetch_all(&self.pool)
            .await?;
        Ok(interviews)
    }

    /// Status update, refusing changes to a completed or cancelled interview.
    /// Rescheduling bumps the counter and may move the time.
    pub async fn update_status(
        &self,
        id: Uuid,
        payload: UpdateInterviewStatusPayload,
    ) -> Result<Interview> {
        let next = InterviewStatus::parse(&payload.status)
            .ok_or_else(|| Error::BadRequest(format!("Unknown status '{}'", payload.status)))?;

        let current = self.get_by_id(id).await?;
        let from = current
            .status()
            .ok_or_else(|| Error::Internal(format!("Corrupt status '{}'", current.status)))?;
        if !from.can_change_to(next) {
            return Err(Error::InvalidTransition {
                from: from.as_str().to_string(),
                to: next.as_str().to_string(),
            });
        }

        let reschedule_bump = i32::from(next == InterviewStatus::Rescheduled);
        let sql = format!(
            r#"
            UPDATE interviews
            SET status = $1,
                scheduled_at = COALESCE($2, scheduled_at),
                reschedule_count = reschedule_count + $3,
                updated_at = NOW()
            WHERE id = $4
            RETURNING {INTERVIEW_COLUMNS}
            "#
        );
        let interview = sqlx::query_as::<_, Interview>(&sql)
            .bind(next.as_str())
            .bind(payload.scheduled_at)
            .bind(reschedule_bump)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(interview)
    }
}

fn validate_interview_type(raw: &str) -> Result<()> {
    if INTERVIEW_TYPES.contains(&raw) {
        Ok(())
    } else {
        Err(Error::BadRequest(format!(
            "Unknown interview type '{}', expected one of: {}",
            raw,
            INTERVIEW_TYPES.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::validate_interview_type;

    #[test]
    fn known_interview_types_pass() {
        for t in ["phone_screen", "technical", "behavioral", "hr", "onsite", "final"] {
            assert!(validate_interview_type(t).is_ok());
        }
    }

    #[test]
    fn unknown_interview_type_is_rejected() {
        assert!(validate_interview_type("coffee_chat").is_err());
        assert!(validate_interview_type("").is_err());
    }
}
