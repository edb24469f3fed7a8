use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Accepted values for `interviews.interview_type`.
pub const INTERVIEW_TYPES: &[&str] = &[
    "phone_screen",
    "technical",
    "behavioral",
    "hr",
    "onsite",
    "final",
];

/// Lifecycle of one scheduled interview. `completed` and `cancelled` are
/// final; everything else can still move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewStatus {
    Scheduled,
    Confirmed,
    Rescheduled,
    Completed,
    Cancelled,
    NoShow,
}

impl InterviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterviewStatus::Scheduled => "scheduled",
            InterviewStatus::Confirmed => "confirmed",
            InterviewStatus::Rescheduled => "rescheduled",
            InterviewStatus::Completed => "completed",
            InterviewStatus::Cancelled => "cancelled",
            InterviewStatus::NoShow => "no_show",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "scheduled" => Some(InterviewStatus::Scheduled),
            "confirmed" => Some(InterviewStatus::Confirmed),
            "rescheduled" => Some(InterviewStatus::Rescheduled),
            "completed" => Some(InterviewStatus::Completed),
            "cancelled" => Some(InterviewStatus::Cancelled),
            "no_show" => Some(InterviewStatus::NoShow),
            _ => None,
        }
    }

    pub fn is_final(&self) -> bool {
        matches!(self, InterviewStatus::Completed | InterviewStatus::Cancelled)
    }

    /// Repeating `rescheduled` counts as another reschedule; other
    /// same-status writes are no-ops and refused.
    pub fn can_change_to(&self, next: InterviewStatus) -> bool {
        !self.is_final() && (next != *self || next == InterviewStatus::Rescheduled)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Interview {
    pub id: Uuid,
    pub application_id: Uuid,
    pub interview_type: String,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: i32,
    pub location: Option<String>,
    pub status: String,
    pub reschedule_count: i32,
    pub notes: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Interview {
    pub fn status(&self) -> Option<InterviewStatus> {
        InterviewStatus::parse(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_strings() {
        for s in [
            InterviewStatus::Scheduled,
            InterviewStatus::Confirmed,
            InterviewStatus::Rescheduled,
            InterviewStatus::Completed,
            InterviewStatus::Cancelled,
            InterviewStatus::NoShow,
        ] {
            assert_eq!(InterviewStatus::parse(s.as_str()), Some(s));
        }
        assert_eq!(InterviewStatus::parse("pending"), None);
    }

    #[test]
    fn final_statuses_accept_no_further_change() {
        assert!(!InterviewStatus::Completed.can_change_to(InterviewStatus::Cancelled));
        assert!(!InterviewStatus::Cancelled.can_change_to(InterviewStatus::Scheduled));
        assert!(InterviewStatus::Scheduled.can_change_to(InterviewStatus::Completed));
        assert!(InterviewStatus::Confirmed.can_change_to(InterviewStatus::NoShow));
        assert!(InterviewStatus::NoShow.can_change_to(InterviewStatus::Rescheduled));
    }

    #[test]
    fn only_reschedule_repeats_in_place() {
        assert!(InterviewStatus::Rescheduled.can_change_to(InterviewStatus::Rescheduled));
        assert!(!InterviewStatus::Scheduled.can_change_to(InterviewStatus::Scheduled));
    }
}
