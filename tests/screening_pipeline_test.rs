use chrono::{TimeZone, Utc};
use talentflow_backend::matching::{
    check_eligibility, combine_scores, rank_applications, rule_based_score, RankInput,
};
use uuid::Uuid;

fn skills(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// Walks one role through the whole screening computation: eligibility gate,
/// rule-based scoring, score combination and final ranking.
#[test]
fn screening_pipeline_for_one_role() {
    let required = skills(&["RF Engineering", "Systems Integration"]);
    let preferred = skills(&["MATLAB"]);

    // Candidate A covers everything.
    let a = check_eligibility(
        &skills(&["RF Engineering", "Systems Integration", "MATLAB"]),
        Some(7.0),
        &required,
        5,
    );
    assert!(a.passed);

    // Candidate B misses one non-negotiable skill despite strong scores.
    let b = check_eligibility(
        &skills(&["Python", "RF Engineering", "MATLAB"]),
        Some(6.0),
        &required,
        5,
    );
    assert!(!b.passed);
    assert_eq!(b.missing_skills, vec!["Systems Integration"]);

    // Rule-based scoring reflects the coverage difference.
    let rule_a = rule_based_score(
        &skills(&["RF Engineering", "Systems Integration", "MATLAB"]),
        &required,
        &preferred,
        Some(7.0),
    );
    let rule_b = rule_based_score(
        &skills(&["Python", "RF Engineering", "MATLAB"]),
        &required,
        &preferred,
        Some(6.0),
    );
    assert!(rule_a > rule_b);

    // Ranking only considers the eligible, scored population.
    let id_a = Uuid::new_v4();
    let id_b = Uuid::new_v4();
    let id_c = Uuid::new_v4();
    let at = |secs: i64| Some(Utc.timestamp_opt(secs, 0).unwrap());
    let inputs = vec![
        RankInput {
            application_id: id_a,
            technical_score: Some(89.6),
            behavioral_score: Some(89.6),
            eligibility_passed: true,
            active: true,
            applied_at: at(100),
        },
        RankInput {
            application_id: id_b,
            technical_score: Some(95.0),
            behavioral_score: Some(95.0),
            eligibility_passed: false,
            active: true,
            applied_at: at(50),
        },
        RankInput {
            application_id: id_c,
            technical_score: Some(83.2),
            behavioral_score: Some(83.2),
            eligibility_passed: true,
            active: true,
            applied_at: at(10),
        },
    ];
    let ranked = rank_applications(&inputs);
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].application_id, id_a);
    assert_eq!(ranked[0].rank_in_role, 1);
    assert_eq!(ranked[1].application_id, id_c);
    assert_eq!(ranked[1].rank_in_role, 2);
}

#[test]
fn shortlist_selection_is_the_ranked_prefix() {
    let at = |secs: i64| Some(Utc.timestamp_opt(secs, 0).unwrap());
    let inputs: Vec<RankInput> = (0..5)
        .map(|i| RankInput {
            application_id: Uuid::new_v4(),
            technical_score: Some(90.0 - i as f64 * 2.0),
            behavioral_score: Some(80.0),
            eligibility_passed: true,
            active: true,
            applied_at: at(i),
        })
        .collect();

    let ranked = rank_applications(&inputs);
    assert_eq!(ranked.len(), 5);

    let shortlisted: Vec<_> = ranked.iter().take(2).collect();
    let rest: Vec<_> = ranked.iter().skip(2).collect();
    assert_eq!(shortlisted[0].rank_in_role, 1);
    assert_eq!(shortlisted[1].rank_in_role, 2);
    assert_eq!(rest.len(), 3);
    assert!(rest.iter().all(|r| r.rank_in_role >= 3));
}

/// A candidate who withdraws after scoring must drop out of the ranking
/// entirely, so a top-N shortlist goes to candidates still in play.
#[test]
fn withdrawn_candidates_do_not_consume_shortlist_slots() {
    let at = |secs: i64| Some(Utc.timestamp_opt(secs, 0).unwrap());
    let mut inputs: Vec<RankInput> = (0..5)
        .map(|i| RankInput {
            application_id: Uuid::new_v4(),
            technical_score: Some(95.0 - i as f64 * 5.0),
            behavioral_score: Some(85.0),
            eligibility_passed: true,
            active: true,
            applied_at: at(i),
        })
        .collect();
    // The best-scoring candidate withdraws.
    inputs[0].active = false;
    let withdrawn_id = inputs[0].application_id;

    let ranked = rank_applications(&inputs);
    assert_eq!(ranked.len(), 4);
    assert!(ranked.iter().all(|r| r.application_id != withdrawn_id));

    let top_two: Vec<_> = ranked.iter().take(2).map(|r| r.application_id).collect();
    assert_eq!(
        top_two,
        vec![inputs[1].application_id, inputs[2].application_id]
    );
}

#[test]
fn combined_score_component_rules() {
    // Behavioral still pending: combined falls back to technical alone.
    assert_eq!(combine_scores(Some(88.0), None), Some(88.0));
    // Both present: plain average.
    assert_eq!(combine_scores(Some(88.0), Some(72.0)), Some(80.0));
    // No technical score yet: unscored, excluded from ranking.
    assert_eq!(combine_scores(None, Some(90.0)), None);
}
