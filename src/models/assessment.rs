use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use uuid::Uuid;

/// Outcome of a completed behavioral interview conversation. May reference
/// the interview it came out of.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BehavioralAssessment {
    pub id: Uuid,
    pub application_id: Uuid,
    pub interview_id: Option<Uuid>,
    pub overall_score: f64,
    pub communication_score: f64,
    pub problem_solving_score: f64,
    pub cultural_fit_score: f64,
    pub feedback_summary: String,
    pub detailed_feedback: Option<JsonValue>,
    pub created_at: Option<DateTime<Utc>>,
}
