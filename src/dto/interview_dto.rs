use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ScheduleInterviewPayload {
    pub application_id: Uuid,
    #[validate(length(min = 1))]
    pub interview_type: String,
    pub scheduled_at: DateTime<Utc>,
    #[validate(range(min = 15, max = 480))]
    pub duration_minutes: Option<i32>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateInterviewStatusPayload {
    pub status: String,
    pub scheduled_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewListQuery {
    pub application_id: Option<Uuid>,
    pub status: Option<String>,
}
