use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const RECOMMENDATIONS: &[&str] = &["hire", "maybe", "reject"];

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct HrFeedback {
    pub id: Uuid,
    pub application_id: Uuid,
    pub reviewer: String,
    pub strengths: Option<String>,
    pub weaknesses: Option<String>,
    pub missing_requirements: Option<String>,
    pub role_fit_score: Option<i32>,
    pub recommendation: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}
