use crate::dto::application_dto::{ApplyPayload, ShortlistOutcome};
use crate::error::{Error, Result};
use crate::matching::{check_eligibility, rank_applications, EligibilityOutcome, RankInput};
use crate::models::application::{Application, ApplicationStatus};
use crate::models::cv::Cv;
use crate::models::job_role::JobRole;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

const APPLICATION_COLUMNS: &str = "id, candidate_id, job_role_id, cv_id, status, cover_letter, \
    technical_score, behavioral_score, combined_score, rank_in_role, \
    eligibility_check_passed, eligibility_details, applied_at, updated_at";

/// Candidate-facing application row joined with its role.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicationWithJob {
    pub id: Uuid,
    pub job_role_id: Uuid,
    pub job_title: String,
    pub job_department: String,
    pub status: String,
    pub combined_score: Option<f64>,
    pub rank_in_role: Option<i32>,
    pub applied_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Clone)]
pub struct ApplicationService {
    pool: PgPool,
}

impl ApplicationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Submits an application, snapshotting the eligibility check against the
    /// chosen (or primary) CV. A candidate without parsed CV data may still
    /// apply; the application then falls back to manual review.
    pub async fn apply(
        &self,
        candidate_id: Uuid,
        payload: ApplyPayload,
        job: &JobRole,
        cv: Option<&Cv>,
    ) -> Result<Application> {
        if !job.is_active {
            return Err(Error::BadRequest("Job role is not active".into()));
        }

        let duplicate: Option<Uuid> = sqlx::query_scalar(
            "SELECT id FROM applications WHERE candidate_id = $1 AND job_role_id = $2",
        )
        .bind(candidate_id)
        .bind(job.id)
        .fetch_optional(&self.pool)
        .await?;
        if duplicate.is_some() {
            return Err(Error::BadRequest(
                "You have already applied for this job".into(),
            ));
        }

        let outcome = self.eligibility_for(cv, job);

        let sql = format!(
            r#"
            INSERT INTO applications (
                candidate_id, job_role_id, cv_id, status, cover_letter,
                eligibility_check_passed, eligibility_details
            ) VALUES ($1, $2, $3, 'applied', $4, $5, $6)
            RETURNING {APPLICATION_COLUMNS}
            "#
        );
        let application = sqlx::query_as::<_, Application>(&sql)
            .bind(candidate_id)
            .bind(job.id)
            .bind(cv.map(|c| c.id))
            .bind(payload.cover_letter)
            .bind(outcome.passed)
            .bind(serde_json::to_value(&outcome)?)
            .fetch_one(&self.pool)
            .await?;

        Ok(application)
    }

    pub fn eligibility_for(&self, cv: Option<&Cv>, job: &JobRole) -> EligibilityOutcome {
        match cv.and_then(|c| c.parsed()) {
            Some(parsed) => check_eligibility(
                &parsed.skills.technical,
                parsed.years_of_experience,
                &job.non_negotiable_skills,
                job.experience_min,
            ),
            None => EligibilityOutcome::no_cv_data(),
        }
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Application> {
        let sql = format!("SELECT {APPLICATION_COLUMNS} FROM applications WHERE id = $1");
        let application = sqlx::query_as::<_, Application>(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(application)
    }

    pub async fn list(
        &self,
        job_role_id: Option<Uuid>,
        status: Option<String>,
    ) -> Result<Vec<Application>> {
        let sql = format!(
            r#"
            SELECT {APPLICATION_COLUMNS} FROM applications
            WHERE ($1::uuid IS NULL OR job_role_id = $1)
              AND ($2::text IS NULL OR status = $2)
            ORDER BY applied_at DESC
            "#
        );
        let applications = sqlx::query_as::<_, Application>(&sql)
            .bind(job_role_id)
            .bind(status)
            .fetch_all(&self.pool)
            .await?;
        Ok(applications)
    }

    pub async fn list_for_candidate(&self, candidate_id: Uuid) -> Result<Vec<ApplicationWithJob>> {
        let applications = sqlx::query_as::<_, ApplicationWithJob>(
            r#"
            SELECT a.id, a.job_role_id, j.title AS job_title, j.department AS job_department,
                   a.status, a.combined_score, a.rank_in_role, a.applied_at, a.updated_at
            FROM applications a
            JOIN job_roles j ON j.id = a.job_role_id
            WHERE a.candidate_id = $1
            ORDER BY a.applied_at DESC
            "#,
        )
        .bind(candidate_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(applications)
    }

    /// HR status update, validated against the state machine.
    pub async fn update_status(&self, id: Uuid, new_status: &str) -> Result<Application> {
        let next = ApplicationStatus::parse(new_status)
            .ok_or_else(|| Error::BadRequest(format!("Unknown status '{}'", new_status)))?;
        if next == ApplicationStatus::Withdrawn {
            return Err(Error::BadRequest(
                "Withdrawal is a candidate action".into(),
            ));
        }

        let current = self.get_by_id(id).await?;
        let from = current
            .status()
            .ok_or_else(|| Error::Internal(format!("Corrupt status '{}'", current.status)))?;
        if !from.can_transition_to(next) {
            return Err(Error::InvalidTransition {
                from: from.as_str().to_string(),
                to: next.as_str().to_string(),
            });
        }

        self.write_status(id, next).await
    }

    /// Candidate-initiated withdrawal. Allowed from any state that is not
    /// already rejected or withdrawn; declining an offer counts here too.
    pub async fn withdraw(&self, id: Uuid, candidate_id: Uuid) -> Result<Application> {
        let current = self.get_by_id(id).await?;
        if current.candidate_id != candidate_id {
            return Err(Error::Forbidden(
                "You can only withdraw your own applications".into(),
            ));
        }
        let from = current
            .status()
            .ok_or_else(|| Error::Internal(format!("Corrupt status '{}'", current.status)))?;
        if !from.can_withdraw() {
            return Err(Error::InvalidTransition {
                from: from.as_str().to_string(),
                to: ApplicationStatus::Withdrawn.as_str().to_string(),
            });
        }

        self.write_status(id, ApplicationStatus::Withdrawn).await
    }

    async fn write_status(&self, id: Uuid, status: ApplicationStatus) -> Result<Application> {
        let sql = format!(
            "UPDATE applications SET status = $1, updated_at = NOW() WHERE id = $2 RETURNING {APPLICATION_COLUMNS}"
        );
        let application = sqlx::query_as::<_, Application>(&sql)
            .bind(status.as_str())
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(application)
    }

    pub async fn set_technical_score(&self, id: Uuid, score: f64) -> Result<()> {
        sqlx::query(
            "UPDATE applications SET technical_score = $1, updated_at = NOW() WHERE id = $2",
        )
        .bind(score)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn set_behavioral_score(&self, id: Uuid, score: f64) -> Result<()> {
        sqlx::query(
            "UPDATE applications SET behavioral_score = $1, updated_at = NOW() WHERE id = $2",
        )
        .bind(score)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Re-runs the eligibility snapshot, e.g. after a CV re-parse.
    pub async fn store_eligibility(
        &self,
        id: Uuid,
        outcome: &EligibilityOutcome,
    ) -> Result<Application> {
        let sql = format!(
            r#"
            UPDATE applications
            SET eligibility_check_passed = $1, eligibility_details = $2, updated_at = NOW()
            WHERE id = $3
            RETURNING {APPLICATION_COLUMNS}
            "#
        );
        let application = sqlx::query_as::<_, Application>(&sql)
            .bind(outcome.passed)
            .bind(serde_json::to_value(outcome)?)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(application)
    }

    /// Synchronously recomputes combined scores and 1-based ranks for every
    /// application of the role. Terminal applications (offered, rejected,
    /// withdrawn) keep their combined score but hold no rank. Idempotent for
    /// unchanged inputs; concurrent recomputes converge because ranks are
    /// advisory (last writer wins).
    pub async fn recompute_rankings(&self, job_role_id: Uuid) -> Result<Vec<Application>> {
        let applications = self.list(Some(job_role_id), None).await?;

        let inputs: Vec<RankInput> = applications
            .iter()
            .map(|a| RankInput {
                application_id: a.id,
                technical_score: a.technical_score,
                behavioral_score: a.behavioral_score,
                eligibility_passed: a.eligibility_check_passed.unwrap_or(false),
                active: a.status().map(|s| !s.is_terminal()).unwrap_or(false),
                applied_at: a.applied_at,
            })
            .collect();
        let ranked = rank_applications(&inputs);

        let mut tx = self.pool.begin().await?;
        // Combined scores are written for everyone, ranks only for the
        // eligible scored population.
        for app in &applications {
            let combined =
                crate::matching::combine_scores(app.technical_score, app.behavioral_score);
            sqlx::query(
                "UPDATE applications SET combined_score = $1, rank_in_role = NULL WHERE id = $2",
            )
            .bind(combined)
            .bind(app.id)
            .execute(&mut *tx)
            .await?;
        }
        for entry in &ranked {
            sqlx::query(
                "UPDATE applications SET combined_score = $1, rank_in_role = $2 WHERE id = $3",
            )
            .bind(entry.combined_score)
            .bind(entry.rank_in_role)
            .bind(entry.application_id)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        let sql = format!(
            r#"
            SELECT {APPLICATION_COLUMNS} FROM applications
            WHERE job_role_id = $1 AND rank_in_role IS NOT NULL
            ORDER BY rank_in_role
            "#
        );
        let ranked_rows = sqlx::query_as::<_, Application>(&sql)
            .bind(job_role_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(ranked_rows)
    }

    /// Shortlists the top N eligible ranked applications of a role and
    /// optionally rejects every other non-terminal application.
    pub async fn shortlist_top(
        &self,
        job_role_id: Uuid,
        count: i64,
        reject_others: bool,
    ) -> Result<ShortlistOutcome> {
        let ranked = self.recompute_rankings(job_role_id).await?;

        let mut shortlisted = Vec::new();
        for app in ranked.iter().take(count.max(0) as usize) {
            match app.status() {
                Some(from) if from.can_transition_to(ApplicationStatus::Shortlisted) => {
                    self.write_status(app.id, ApplicationStatus::Shortlisted).await?;
                    shortlisted.push(app.id);
                }
                // Already shortlisted or interviewing; leave untouched.
                Some(ApplicationStatus::Shortlisted)
                | Some(ApplicationStatus::InterviewScheduled) => {
                    shortlisted.push(app.id);
                }
                _ => {}
            }
        }

        let mut rejected = Vec::new();
        if reject_others {
            let all = self.list(Some(job_role_id), None).await?;
            for app in all {
                if shortlisted.contains(&app.id) {
                    continue;
                }
                if let Some(from) = app.status() {
                    if from.can_transition_to(ApplicationStatus::Rejected) {
                        self.write_status(app.id, ApplicationStatus::Rejected).await?;
                        rejected.push(app.id);
                    }
                }
            }
        }

        Ok(ShortlistOutcome {
            shortlisted,
            rejected,
        })
    }
}
