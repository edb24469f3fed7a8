use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One candidate-to-role match with enough detail for the candidate to see
/// what is missing; all active roles are returned, not just passing ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleMatch {
    pub role_id: Uuid,
    pub role_title: String,
    pub department: String,
    pub location: Option<String>,
    pub match_score: f64,
    pub semantic_score: Option<f64>,
    pub rule_based_score: Option<f64>,
    pub matched_non_negotiable_skills: Vec<String>,
    pub missing_non_negotiable_skills: Vec<String>,
    pub matched_preferred_skills: Vec<String>,
    pub is_eligible: bool,
    pub reason: String,
}
