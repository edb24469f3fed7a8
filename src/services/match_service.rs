use crate::dto::match_dto::RoleMatch;
use crate::error::Result;
use crate::matching::{check_eligibility, normalize_skill, rule_based_score};
use crate::models::cv::ParsedCv;
use crate::models::embedding::SourceType;
use crate::models::job_role::JobRole;
use crate::services::embed_service::EmbedService;
use crate::services::vector_service::VectorService;
use std::collections::HashMap;
use uuid::Uuid;

/// Weighting between the semantic and the rule-based component when both are
/// available. Semantic similarity alone over-rewards wording overlap, so the
/// deterministic component carries more weight.
const SEMANTIC_WEIGHT: f64 = 0.4;
const RULE_WEIGHT: f64 = 0.6;

#[derive(Clone)]
pub struct MatchService {
    embed: EmbedService,
    vectors: VectorService,
}

impl MatchService {
    pub fn new(embed: EmbedService, vectors: VectorService) -> Self {
        Self { embed, vectors }
    }

    /// Indexes a role for semantic matching. Called after create/update;
    /// the previous embedding of the role is replaced.
    pub async fn index_role(&self, job: &JobRole) -> Result<()> {
        let text = role_profile_text(job);
        let vector = self.embed.embed_text(&text).await?;
        self.vectors
            .store_embedding(&text, &vector, SourceType::JobRole, Some(job.id), None)
            .await?;
        Ok(())
    }

    /// Scores a candidate profile against every given role. All roles come
    /// back, including failing ones, so the candidate can see what is missing.
    /// Sorted by match score descending.
    pub async fn find_matching_roles(
        &self,
        parsed: Option<&ParsedCv>,
        years_of_experience: Option<f64>,
        roles: &[JobRole],
        similarity_threshold: f64,
    ) -> Result<Vec<RoleMatch>> {
        let semantic_by_role = match parsed {
            Some(p) => {
                self.semantic_scores(&candidate_profile_text(p), similarity_threshold)
                    .await?
            }
            None => HashMap::new(),
        };

        let mut matches: Vec<RoleMatch> = roles
            .iter()
            .map(|job| {
                let semantic = semantic_by_role.get(&job.id).copied();
                score_role(parsed, years_of_experience, job, semantic)
            })
            .collect();
        matches.sort_by(|a, b| {
            b.match_score
                .partial_cmp(&a.match_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        Ok(matches)
    }

    /// Match score for one application's role, used as the application's
    /// technical score.
    pub async fn technical_score(
        &self,
        parsed: Option<&ParsedCv>,
        years_of_experience: Option<f64>,
        job: &JobRole,
        similarity_threshold: f64,
    ) -> Result<f64> {
        let semantic = match parsed {
            Some(p) => self
                .semantic_scores(&candidate_profile_text(p), similarity_threshold)
                .await?
                .get(&job.id)
                .copied(),
            None => None,
        };
        Ok(score_role(parsed, years_of_experience, job, semantic).match_score)
    }

    /// Cosine similarity (0..1) per role id for the given profile text.
    async fn semantic_scores(
        &self,
        profile_text: &str,
        threshold: f64,
    ) -> Result<HashMap<Uuid, f64>> {
        let vector = self.embed.embed_text(profile_text).await?;
        let hits = self
            .vectors
            .search_similar(&vector, threshold, 100, Some(SourceType::JobRole))
            .await?;

        let mut by_role = HashMap::new();
        for hit in hits {
            if let Some(role_id) = hit.source_id {
                by_role.entry(role_id).or_insert(hit.similarity);
            }
        }
        Ok(by_role)
    }
}

/// Pure scoring of one role. Semantic similarity is scaled to 0-100 and
/// blended 40/60 with the rule-based score; without an embedding hit the
/// rule-based score stands alone.
fn score_role(
    parsed: Option<&ParsedCv>,
    years_of_experience: Option<f64>,
    job: &JobRole,
    semantic_similarity: Option<f64>,
) -> RoleMatch {
    let candidate_skills: Vec<String> = parsed
        .map(|p| p.skills.technical.clone())
        .unwrap_or_default();
    let years = parsed
        .and_then(|p| p.years_of_experience)
        .or(years_of_experience);

    let rule = rule_based_score(
        &candidate_skills,
        &job.non_negotiable_skills,
        &job.preferred_skills,
        years,
    );
    let semantic = semantic_similarity.map(|s| s.clamp(0.0, 1.0) * 100.0);
    let match_score = match semantic {
        Some(s) => SEMANTIC_WEIGHT * s + RULE_WEIGHT * rule,
        None => rule,
    };

    let eligibility = check_eligibility(
        &candidate_skills,
        years,
        &job.non_negotiable_skills,
        job.experience_min,
    );

    let normalized: Vec<String> = candidate_skills.iter().map(|s| normalize_skill(s)).collect();
    let matched_preferred: Vec<String> = job
        .preferred_skills
        .iter()
        .filter(|s| normalized.contains(&normalize_skill(s)))
        .cloned()
        .collect();

    RoleMatch {
        role_id: job.id,
        role_title: job.title.clone(),
        department: job.department.clone(),
        location: job.location.clone(),
        match_score,
        semantic_score: semantic,
        rule_based_score: Some(rule),
        matched_non_negotiable_skills: eligibility.matched_skills.clone(),
        missing_non_negotiable_skills: eligibility.missing_skills.clone(),
        matched_preferred_skills: matched_preferred,
        is_eligible: eligibility.passed,
        reason: eligibility.explanation,
    }
}

fn candidate_profile_text(parsed: &ParsedCv) -> String {
    let mut parts = Vec::new();
    if !parsed.skills.technical.is_empty() {
        parts.push(format!("Skills: {}", parsed.skills.technical.join(", ")));
    }
    if !parsed.skills.soft.is_empty() {
        parts.push(format!("Soft skills: {}", parsed.skills.soft.join(", ")));
    }
    for entry in &parsed.experience {
        parts.push(format!(
            "{} at {} ({})",
            entry.title.as_deref().unwrap_or("unknown role"),
            entry.company.as_deref().unwrap_or("unknown company"),
            entry.duration.as_deref().unwrap_or("unknown duration")
        ));
    }
    for entry in &parsed.education {
        parts.push(format!(
            "{}, {}",
            entry.degree.as_deref().unwrap_or("degree"),
            entry.institution.as_deref().unwrap_or("unknown institution")
        ));
    }
    parts.join("\n")
}

fn role_profile_text(job: &JobRole) -> String {
    format!(
        "{} — {}\n{}\nRequired skills: {}\nPreferred skills: {}",
        job.title,
        job.department,
        job.description,
        job.non_negotiable_skills.join(", "),
        job.preferred_skills.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::cv::{ParsedCv, ParsedSkills};
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn job(required: &[&str], preferred: &[&str], experience_min: i32) -> JobRole {
        JobRole {
            id: Uuid::new_v4(),
            title: "Backend Engineer".into(),
            department: "Engineering".into(),
            description: "Build services".into(),
            location: Some("Remote".into()),
            work_type: Some("remote".into()),
            salary_min: Some(Decimal::new(50_000, 0)),
            salary_max: Some(Decimal::new(90_000, 0)),
            currency: Some("USD".into()),
            experience_min,
            experience_max: None,
            non_negotiable_skills: required.iter().map(|s| s.to_string()).collect(),
            preferred_skills: preferred.iter().map(|s| s.to_string()).collect(),
            openings_count: 1,
            is_active: true,
            posted_at: Some(Utc::now()),
            closes_at: None,
            created_at: Some(Utc::now()),
            updated_at: Some(Utc::now()),
        }
    }

    fn parsed(skills: &[&str], years: Option<f64>) -> ParsedCv {
        ParsedCv {
            skills: ParsedSkills {
                technical: skills.iter().map(|s| s.to_string()).collect(),
                soft: Vec::new(),
            },
            experience: Vec::new(),
            education: Vec::new(),
            certifications: Vec::new(),
            years_of_experience: years,
        }
    }

    #[test]
    fn semantic_and_rule_scores_blend_forty_sixty() {
        let job = job(&["Rust"], &[], 0);
        let cv = parsed(&["Rust"], Some(10.0));
        // Rule: 50 required + 0 preferred + 20 experience = 70.
        let m = score_role(Some(&cv), None, &job, Some(0.8));
        assert!((m.match_score - (0.4 * 80.0 + 0.6 * 70.0)).abs() < 1e-9);
        assert_eq!(m.semantic_score, Some(80.0));
    }

    #[test]
    fn missing_embedding_falls_back_to_rule_score() {
        let job = job(&["Rust"], &[], 0);
        let cv = parsed(&["Rust"], Some(10.0));
        let m = score_role(Some(&cv), None, &job, None);
        assert!((m.match_score - 70.0).abs() < 1e-9);
        assert_eq!(m.semantic_score, None);
    }

    #[test]
    fn failing_roles_still_come_back_with_reasons() {
        let job = job(&["Rust", "Kubernetes"], &[], 0);
        let cv = parsed(&["Rust"], Some(3.0));
        let m = score_role(Some(&cv), None, &job, None);
        assert!(!m.is_eligible);
        assert_eq!(m.missing_non_negotiable_skills, vec!["Kubernetes"]);
        assert!(m.reason.contains("Kubernetes"));
    }

    #[test]
    fn no_parsed_cv_scores_zero_skills_but_is_not_an_error() {
        let job = job(&["Rust"], &[], 0);
        let m = score_role(None, Some(4.0), &job, None);
        assert!(m.match_score > 0.0); // experience still counts
        assert!(!m.is_eligible);
    }
}
