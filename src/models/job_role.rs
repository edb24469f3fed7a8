use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRole {
    pub id: Uuid,
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
    pub non_negotiable_skills: Vec<String>,
    pub preferred_skills: Vec<String>,
    pub openings_count: i32,
    pub is_active: bool,
    pub posted_at: Option<DateTime<Utc>>,
    pub closes_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}
