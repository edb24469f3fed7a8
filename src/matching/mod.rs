pub mod eligibility;
pub mod scoring;

pub use eligibility::{check_eligibility, EligibilityOutcome};
pub use scoring::{combine_scores, rank_applications, rule_based_score, RankInput, RankedEntry};

/// Skill comparison is case- and whitespace-insensitive.
pub fn normalize_skill(raw: &str) -> String {
    raw.trim().to_lowercase()
}
