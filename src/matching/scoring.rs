use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::normalize_skill;

/// Combined score: simple average when both components are present, the
/// technical component alone while the behavioral assessment is pending,
/// nothing before technical scoring has happened.
pub fn combine_scores(technical: Option<f64>, behavioral: Option<f64>) -> Option<f64> {
    match (technical, behavioral) {
        (Some(t), Some(b)) => Some((t + b) / 2.0),
        (Some(t), None) => Some(t),
        (None, _) => None,
    }
}

/// Rule-based match score against a role, on a 0-100 scale: required-skill
/// coverage is worth 50 points, preferred-skill coverage 30, and experience
/// up to 20 (saturating at ten years).
pub fn rule_based_score(
    candidate_skills: &[String],
    non_negotiable_skills: &[String],
    preferred_skills: &[String],
    years_of_experience: Option<f64>,
) -> f64 {
    let normalized: Vec<String> = candidate_skills.iter().map(|s| normalize_skill(s)).collect();
    let has = |skill: &String| normalized.contains(&normalize_skill(skill));

    let required_part = if non_negotiable_skills.is_empty() {
        0.0
    } else {
        let matched = non_negotiable_skills.iter().filter(|s| has(s)).count();
        matched as f64 / non_negotiable_skills.len() as f64 * 50.0
    };

    let preferred_part = if preferred_skills.is_empty() {
        0.0
    } else {
        let matched = preferred_skills.iter().filter(|s| has(s)).count();
        matched as f64 / preferred_skills.len() as f64 * 30.0
    };

    let experience_part = (years_of_experience.unwrap_or(0.0) / 10.0 * 20.0).min(20.0);

    required_part + preferred_part + experience_part
}

/// One application as the ranker sees it. `active` is false once the
/// application has reached a terminal status (offered, rejected, withdrawn).
#[derive(Debug, Clone)]
pub struct RankInput {
    pub application_id: Uuid,
    pub technical_score: Option<f64>,
    pub behavioral_score: Option<f64>,
    pub eligibility_passed: bool,
    pub active: bool,
    pub applied_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedEntry {
    pub application_id: Uuid,
    pub combined_score: f64,
    pub rank_in_role: i32,
}

/// Ranks the eligible, scored applications of one role.
///
/// Ineligible, unscored or no-longer-active applications are excluded (they
/// may still appear in unranked lists); a withdrawn high scorer must not hold
/// a rank or occupy a shortlist slot. Stable sort by combined score
/// descending, ties broken by earlier application date. Ranks are 1-based and
/// contiguous, and the computation is idempotent for unchanged inputs.
pub fn rank_applications(inputs: &[RankInput]) -> Vec<RankedEntry> {
    let mut scored: Vec<(Uuid, f64, Option<DateTime<Utc>>)> = inputs
        .iter()
        .filter(|a| a.eligibility_passed && a.active)
        .filter_map(|a| {
            combine_scores(a.technical_score, a.behavioral_score)
                .map(|score| (a.application_id, score, a.applied_at))
        })
        .collect();

    scored.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.2.cmp(&b.2))
    });

    scored
        .into_iter()
        .enumerate()
        .map(|(idx, (id, score, _))| RankedEntry {
            application_id: id,
            combined_score: score,
            rank_in_role: idx as i32 + 1,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> Option<DateTime<Utc>> {
        Some(Utc.timestamp_opt(secs, 0).unwrap())
    }

    fn input(
        tech: Option<f64>,
        behav: Option<f64>,
        eligible: bool,
        applied: Option<DateTime<Utc>>,
    ) -> RankInput {
        RankInput {
            application_id: Uuid::new_v4(),
            technical_score: tech,
            behavioral_score: behav,
            eligibility_passed: eligible,
            active: true,
            applied_at: applied,
        }
    }

    #[test]
    fn combined_score_averages_both_components() {
        assert_eq!(combine_scores(Some(80.0), Some(60.0)), Some(70.0));
    }

    #[test]
    fn partial_score_falls_back_to_technical() {
        assert_eq!(combine_scores(Some(75.0), None), Some(75.0));
        assert_eq!(combine_scores(None, Some(50.0)), None);
        assert_eq!(combine_scores(None, None), None);
    }

    #[test]
    fn combined_score_is_monotonic_in_each_component() {
        let base = combine_scores(Some(60.0), Some(60.0)).unwrap();
        assert!(combine_scores(Some(70.0), Some(60.0)).unwrap() >= base);
        assert!(combine_scores(Some(60.0), Some(70.0)).unwrap() >= base);
    }

    #[test]
    fn higher_combined_score_ranks_first() {
        let a = input(Some(89.6), Some(89.6), true, at(100));
        let b = input(Some(83.2), Some(83.2), true, at(50));
        let ranked = rank_applications(&[b.clone(), a.clone()]);
        assert_eq!(ranked[0].application_id, a.application_id);
        assert_eq!(ranked[0].rank_in_role, 1);
        assert_eq!(ranked[1].application_id, b.application_id);
        assert_eq!(ranked[1].rank_in_role, 2);
    }

    #[test]
    fn ties_break_by_earlier_application() {
        let first = input(Some(80.0), Some(80.0), true, at(10));
        let second = input(Some(80.0), Some(80.0), true, at(20));
        let ranked = rank_applications(&[second.clone(), first.clone()]);
        assert_eq!(ranked[0].application_id, first.application_id);
        assert_eq!(ranked[1].application_id, second.application_id);
    }

    #[test]
    fn ineligible_applications_are_excluded_regardless_of_score() {
        let eligible = input(Some(10.0), Some(10.0), true, at(1));
        let ineligible = input(Some(99.0), Some(99.0), false, at(2));
        let ranked = rank_applications(&[eligible.clone(), ineligible]);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].application_id, eligible.application_id);
    }

    #[test]
    fn withdrawn_top_scorer_neither_ranks_nor_takes_a_shortlist_slot() {
        let withdrawn = RankInput {
            active: false,
            ..input(Some(99.0), Some(99.0), true, at(1))
        };
        let second = input(Some(90.0), Some(90.0), true, at(2));
        let third = input(Some(80.0), Some(80.0), true, at(3));

        let ranked = rank_applications(&[withdrawn.clone(), second.clone(), third.clone()]);
        assert_eq!(ranked.len(), 2);
        assert!(ranked.iter().all(|r| r.application_id != withdrawn.application_id));
        assert_eq!(ranked[0].application_id, second.application_id);
        assert_eq!(ranked[0].rank_in_role, 1);

        // A top-2 shortlist now reaches the third candidate instead of
        // silently burning a slot on the withdrawn one.
        let top_two: Vec<_> = ranked.iter().take(2).map(|r| r.application_id).collect();
        assert_eq!(top_two, vec![second.application_id, third.application_id]);
    }

    #[test]
    fn inactive_applications_keep_ranks_contiguous() {
        let mut inputs: Vec<RankInput> = (0..4)
            .map(|i| input(Some(70.0 + i as f64), Some(70.0), true, at(i)))
            .collect();
        inputs[2].active = false;
        let ranked = rank_applications(&inputs);
        let ranks: Vec<i32> = ranked.iter().map(|r| r.rank_in_role).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn unscored_applications_are_excluded() {
        let scored = input(Some(50.0), None, true, at(1));
        let unscored = input(None, Some(90.0), true, at(2));
        let ranked = rank_applications(&[scored.clone(), unscored]);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].application_id, scored.application_id);
    }

    #[test]
    fn ranks_are_contiguous_from_one() {
        let inputs: Vec<RankInput> = (0..5)
            .map(|i| input(Some(50.0 + i as f64), Some(40.0), true, at(i)))
            .collect();
        let ranked = rank_applications(&inputs);
        let ranks: Vec<i32> = ranked.iter().map(|r| r.rank_in_role).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn ranking_is_idempotent() {
        let inputs: Vec<RankInput> = (0..4)
            .map(|i| input(Some(90.0 - i as f64 * 3.0), Some(70.0), true, at(i)))
            .collect();
        assert_eq!(rank_applications(&inputs), rank_applications(&inputs));
    }

    #[test]
    fn rule_based_score_rewards_coverage_and_experience() {
        let candidate = vec!["Rust".to_string(), "Postgres".to_string()];
        let required = vec!["Rust".to_string()];
        let preferred = vec!["Postgres".to_string(), "Kubernetes".to_string()];
        let score = rule_based_score(&candidate, &required, &preferred, Some(5.0));
        // 50 (all required) + 15 (half preferred) + 10 (5/10 years).
        assert!((score - 75.0).abs() < 1e-9);
    }

    #[test]
    fn rule_based_experience_saturates_at_ten_years() {
        let score = rule_based_score(&[], &[], &[], Some(30.0));
        assert!((score - 20.0).abs() < 1e-9);
    }
}
