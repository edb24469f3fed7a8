use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::job_role::JobRole;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateJobPayload {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub department: String,
    #[validate(length(min = 1))]
    pub description: String,
    pub location: Option<String>,
    pub work_type: Option<String>,
    pub salary_min: Option<Decimal>,
    pub salary_max: Option<Decimal>,
    pub currency: Option<String>,
    #[serde(default)]
    pub experience_min: i32,
    pub experience_max: Option<i32>,
    #[serde(default)]
    pub non_negotiable_skills: Vec<String>,
    #[serde(default)]
    pub preferred_skills: Vec<String>,
    pub openings_count: Option<i32>,
    pub posted_at: Option<DateTime<Utc>>,
    pub closes_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateJobPayload {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub department: Option<String>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    pub location: Option<String>,
    pub work_type: Option<String>,
    pub salary_min: Option<Decimal>,
    pub salary_max: Option<Decimal>,
    pub currency: Option<String>,
    pub experience_min: Option<i32>,
    pub experience_max: Option<i32>,
    pub non_negotiable_skills: Option<Vec<String>>,
    pub preferred_skills: Option<Vec<String>>,
    pub openings_count: Option<i32>,
    pub is_active: Option<bool>,
    pub posted_at: Option<DateTime<Utc>>,
    pub closes_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JobListQuery {
    pub department: Option<String>,
    pub work_type: Option<String>,
    pub active_only: Option<bool>,
}

/// Candidate-facing job summary; hides the skill gates HR uses for screening.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPublicSummary {
    pub id: uuid::Uuid,
    pub title: String,
    pub department: String,
    pub description: String,
    pub location: Option<String>,
    pub work_type: Option<String>,
    pub salary_min: Option<Decimal>,
    pub salary_max: Option<Decimal>,
    pub currency: Option<String>,
    pub experience_min: i32,
    pub experience_max: Option<i32>,
    pub openings_count: i32,
    pub posted_at: Option<DateTime<Utc>>,
    pub closes_at: Option<DateTime<Utc>>,
}

impl From<JobRole> for JobPublicSummary {
    fn from(job: JobRole) -> Self {
        Self {
            id: job.id,
            title: job.title,
            department: job.department,
            description: job.description,
            location: job.location,
            work_type: job.work_type,
            salary_min: job.salary_min,
            salary_max: job.salary_max,
            currency: job.currency,
            experience_min: job.experience_min,
            experience_max: job.experience_max,
            openings_count: job.openings_count,
            posted_at: job.posted_at,
            closes_at: job.closes_at,
        }
    }
}
