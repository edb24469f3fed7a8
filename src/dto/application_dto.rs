use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyPayload {
    pub job_role_id: Uuid,
    /// Falls back to the candidate's primary CV when absent.
    pub cv_id: Option<Uuid>,
    pub cover_letter: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdatePayload {
    pub status: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationListQuery {
    pub job_role_id: Option<Uuid>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ShortlistTopPayload {
    #[validate(range(min = 1))]
    pub count: i64,
    /// When set, every other non-terminal application of the role is rejected.
    #[serde(default)]
    pub reject_others: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShortlistOutcome {
    pub shortlisted: Vec<Uuid>,
    pub rejected: Vec<Uuid>,
}
