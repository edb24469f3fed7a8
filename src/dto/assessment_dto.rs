use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateAssessmentPayload {
    pub application_id: Uuid,
    pub interview_id: Option<Uuid>,
    #[validate(range(min = 0.0, max = 100.0))]
    pub communication_score: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub problem_solving_score: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub cultural_fit_score: f64,
    #[validate(length(min = 1))]
    pub feedback_summary: String,
    pub detailed_feedback: Option<JsonValue>,
}
