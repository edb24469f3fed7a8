use serde::{Deserialize, Serialize};

use super::normalize_skill;

/// Result of the deterministic eligibility gate. Always produced; a normal
/// mismatch is a `passed = false` outcome, never an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EligibilityOutcome {
    pub passed: bool,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub experience_ok: bool,
    pub explanation: String,
}

impl EligibilityOutcome {
    /// Outcome for an application without parsed CV data: the check passes and
    /// the application falls back to manual review.
    pub fn no_cv_data() -> Self {
        Self {
            passed: true,
            matched_skills: Vec::new(),
            missing_skills: Vec::new(),
            experience_ok: true,
            explanation: "No parsed CV data; deferred to manual review".to_string(),
        }
    }
}

/// Checks a candidate's extracted skills and experience against a role's
/// non-negotiable requirements.
///
/// Fails if any non-negotiable skill is absent or years of experience is
/// below `experience_min`. Experience above `experience_max` never fails:
/// over-qualification is not a disqualifier.
pub fn check_eligibility(
    candidate_skills: &[String],
    years_of_experience: Option<f64>,
    non_negotiable_skills: &[String],
    experience_min: i32,
) -> EligibilityOutcome {
    let normalized: Vec<String> = candidate_skills.iter().map(|s| normalize_skill(s)).collect();

    let mut matched = Vec::new();
    let mut missing = Vec::new();
    for skill in non_negotiable_skills {
        if normalized.contains(&normalize_skill(skill)) {
            matched.push(skill.clone());
        } else {
            missing.push(skill.clone());
        }
    }

    let experience_ok = match years_of_experience {
        Some(years) => years >= experience_min as f64,
        // Unknown experience is not held against the candidate.
        None => true,
    };

    let passed = missing.is_empty() && experience_ok;

    let explanation = if passed {
        "All required skills matched".to_string()
    } else if !missing.is_empty() {
        format!("Missing required skills: {}", missing.join(", "))
    } else {
        format!(
            "Experience below minimum: {} < {} years",
            years_of_experience.unwrap_or(0.0),
            experience_min
        )
    };

    EligibilityOutcome {
        passed,
        matched_skills: matched,
        missing_skills: missing,
        experience_ok,
        explanation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn missing_required_skill_fails_regardless_of_scores() {
        let outcome = check_eligibility(
            &skills(&["Python", "RF Engineering", "MATLAB"]),
            Some(6.0),
            &skills(&["RF Engineering", "Systems Integration"]),
            5,
        );
        assert!(!outcome.passed);
        assert_eq!(outcome.missing_skills, vec!["Systems Integration"]);
        assert_eq!(outcome.matched_skills, vec!["RF Engineering"]);
        assert!(outcome.experience_ok);
    }

    #[test]
    fn all_required_skills_and_experience_pass() {
        let outcome = check_eligibility(
            &skills(&["rust", "postgres"]),
            Some(4.0),
            &skills(&["Rust", "Postgres"]),
            3,
        );
        assert!(outcome.passed);
        assert!(outcome.missing_skills.is_empty());
    }

    #[test]
    fn skill_match_is_case_and_whitespace_insensitive() {
        let outcome =
            check_eligibility(&skills(&["  PYTHON "]), Some(1.0), &skills(&["python"]), 0);
        assert!(outcome.passed);
    }

    #[test]
    fn experience_below_minimum_fails() {
        let outcome = check_eligibility(&skills(&["Rust"]), Some(2.0), &skills(&["Rust"]), 5);
        assert!(!outcome.passed);
        assert!(!outcome.experience_ok);
        assert!(outcome.missing_skills.is_empty());
    }

    #[test]
    fn over_qualification_never_disqualifies() {
        // 20 years against a 3-5 year band still passes; experience_max is
        // advisory only.
        let outcome = check_eligibility(&skills(&["Rust"]), Some(20.0), &skills(&["Rust"]), 3);
        assert!(outcome.passed);
    }

    #[test]
    fn unknown_experience_is_not_disqualifying() {
        let outcome = check_eligibility(&skills(&["Rust"]), None, &skills(&["Rust"]), 5);
        assert!(outcome.passed);
    }

    #[test]
    fn empty_requirements_always_pass_the_skill_gate() {
        let outcome = check_eligibility(&skills(&[]), Some(0.0), &skills(&[]), 0);
        assert!(outcome.passed);
    }
}
