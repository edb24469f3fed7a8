use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use uuid::Uuid;

/// Progression of an application. Forward chain is
/// applied -> shortlisted -> interview_scheduled -> offered; `rejected` is
/// reachable from any non-terminal state by HR, `withdrawn` by the candidate
/// from any state that is not already rejected or withdrawn (declining an
/// offer counts as a withdrawal). No transition is automatically reversible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Applied,
    Shortlisted,
    InterviewScheduled,
    Offered,
    Rejected,
    Withdrawn,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "applied",
            ApplicationStatus::Shortlisted => "shortlisted",
            ApplicationStatus::InterviewScheduled => "interview_scheduled",
            ApplicationStatus::Offered => "offered",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::Withdrawn => "withdrawn",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "applied" => Some(ApplicationStatus::Applied),
            "shortlisted" => Some(ApplicationStatus::Shortlisted),
            "interview_scheduled" => Some(ApplicationStatus::InterviewScheduled),
            "offered" => Some(ApplicationStatus::Offered),
            "rejected" => Some(ApplicationStatus::Rejected),
            "withdrawn" => Some(ApplicationStatus::Withdrawn),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ApplicationStatus::Offered
                | ApplicationStatus::Rejected
                | ApplicationStatus::Withdrawn
        )
    }

    /// HR-initiated transitions. Withdrawal is candidate-initiated and checked
    /// separately via `can_withdraw`.
    pub fn can_transition_to(&self, next: ApplicationStatus) -> bool {
        if next == ApplicationStatus::Rejected {
            return !self.is_terminal();
        }
        matches!(
            (self, next),
            (ApplicationStatus::Applied, ApplicationStatus::Shortlisted)
                | (
                    ApplicationStatus::Shortlisted,
                    ApplicationStatus::InterviewScheduled
                )
                | (
                    ApplicationStatus::InterviewScheduled,
                    ApplicationStatus::Offered
                )
        )
    }

    pub fn can_withdraw(&self) -> bool {
        !matches!(
            self,
            ApplicationStatus::Rejected | ApplicationStatus::Withdrawn
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Application {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub job_role_id: Uuid,
    pub cv_id: Option<Uuid>,
    pub status: String,
    pub cover_letter: Option<String>,
    pub technical_score: Option<f64>,
    pub behavioral_score: Option<f64>,
    pub combined_score: Option<f64>,
    pub rank_in_role: Option<i32>,
    pub eligibility_check_passed: Option<bool>,
    pub eligibility_details: Option<JsonValue>,
    pub applied_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Application {
    pub fn status(&self) -> Option<ApplicationStatus> {
        ApplicationStatus::parse(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_chain_is_allowed() {
        assert!(ApplicationStatus::Applied.can_transition_to(ApplicationStatus::Shortlisted));
        assert!(
            ApplicationStatus::Shortlisted.can_transition_to(ApplicationStatus::InterviewScheduled)
        );
        assert!(
            ApplicationStatus::InterviewScheduled.can_transition_to(ApplicationStatus::Offered)
        );
    }

    #[test]
    fn skipping_stages_is_not_allowed() {
        assert!(!ApplicationStatus::Applied.can_transition_to(ApplicationStatus::Offered));
        assert!(
            !ApplicationStatus::Applied.can_transition_to(ApplicationStatus::InterviewScheduled)
        );
        assert!(!ApplicationStatus::Shortlisted.can_transition_to(ApplicationStatus::Offered));
    }

    #[test]
    fn rejected_reachable_from_any_non_terminal() {
        for s in [
            ApplicationStatus::Applied,
            ApplicationStatus::Shortlisted,
            ApplicationStatus::InterviewScheduled,
        ] {
            assert!(s.can_transition_to(ApplicationStatus::Rejected));
        }
        for s in [
            ApplicationStatus::Offered,
            ApplicationStatus::Rejected,
            ApplicationStatus::Withdrawn,
        ] {
            assert!(!s.can_transition_to(ApplicationStatus::Rejected));
        }
    }

    #[test]
    fn no_backward_transitions() {
        assert!(!ApplicationStatus::Shortlisted.can_transition_to(ApplicationStatus::Applied));
        assert!(
            !ApplicationStatus::InterviewScheduled
                .can_transition_to(ApplicationStatus::Shortlisted)
        );
    }

    #[test]
    fn withdrawal_allowed_until_rejected_or_withdrawn() {
        assert!(ApplicationStatus::Applied.can_withdraw());
        assert!(ApplicationStatus::InterviewScheduled.can_withdraw());
        assert!(ApplicationStatus::Offered.can_withdraw());
        assert!(!ApplicationStatus::Rejected.can_withdraw());
        assert!(!ApplicationStatus::Withdrawn.can_withdraw());
    }

    #[test]
    fn status_round_trips_through_strings() {
        for s in [
            ApplicationStatus::Applied,
            ApplicationStatus::Shortlisted,
            ApplicationStatus::InterviewScheduled,
            ApplicationStatus::Offered,
            ApplicationStatus::Rejected,
            ApplicationStatus::Withdrawn,
        ] {
            assert_eq!(ApplicationStatus::parse(s.as_str()), Some(s));
        }
        assert_eq!(ApplicationStatus::parse("under_review"), None);
    }
}
