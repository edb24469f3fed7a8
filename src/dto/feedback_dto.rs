use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateFeedbackPayload {
    pub application_id: Uuid,
    #[validate(length(min = 1))]
    pub reviewer: String,
    pub strengths: Option<String>,
    pub weaknesses: Option<String>,
    pub missing_requirements: Option<String>,
    #[validate(range(min = 1, max = 10))]
    pub role_fit_score: Option<i32>,
    pub recommendation: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateFeedbackPayload {
    pub strengths: Option<String>,
    pub weaknesses: Option<String>,
    pub missing_requirements: Option<String>,
    #[validate(range(min = 1, max = 10))]
    pub role_fit_score: Option<i32>,
    pub recommendation: Option<String>,
}
