use super::common::*;
use crate::workflows::matching::domain::{CandidateId, MatchRequest, MatchWeights, RunPhase};
use crate::workflows::matching::engine::{MatchEngine, MatchRunError};
use crate::workflows::matching::progress::{CancelFlag, NullProgress};
use crate::workflows::matching::scoring::ScoringConfig;

fn engine() -> MatchEngine {
    MatchEngine::new(ScoringConfig::default())
}

#[test]
fn scores_the_worked_example() {
    let response = engine()
        .run(
            &MatchRequest {
                job_criteria: job(),
                candidate_ids: Some(vec![CandidateId("c1".to_string())]),
            },
            &pool(),
            &NullProgress,
            &CancelFlag::new(),
        )
        .expect("run succeeds");

    assert!(response.success);
    assert_eq!(response.total_candidates, 1);

    let result = &response.results[0];
    assert_eq!(result.breakdown.skill_score, 50.0);
    assert_eq!(result.breakdown.experience_score, 50.0);
    assert_eq!(result.breakdown.project_score, 0.0);
    assert_eq!(result.overall_score, 40);
    assert_eq!(result.rank, Some(1));
}

#[test]
fn ranking_is_score_descending_with_id_ascending_tiebreak() {
    // c2 and c1 are identical profiles, so they tie on every dimension.
    let pool = vec![
        candidate("c2", &["python"], 1.0),
        candidate("c1", &["python"], 1.0),
        candidate("c3", &["python", "sql"], 3.0),
    ];

    let response = engine()
        .run(&request(), &pool, &NullProgress, &CancelFlag::new())
        .expect("run succeeds");

    let order: Vec<&str> = response
        .results
        .iter()
        .map(|result| result.candidate_id.as_str())
        .collect();
    assert_eq!(order, vec!["c3", "c1", "c2"]);

    let ranks: Vec<Option<u32>> = response.results.iter().map(|result| result.rank).collect();
    assert_eq!(ranks, vec![Some(1), Some(2), Some(3)]);
    assert_eq!(
        response.results[1].overall_score,
        response.results[2].overall_score
    );
}

#[test]
fn rerunning_identical_inputs_is_idempotent() {
    let pool = pool();
    let request = request();

    let first = engine()
        .run(&request, &pool, &NullProgress, &CancelFlag::new())
        .expect("first run succeeds");
    let second = engine()
        .run(&request, &pool, &NullProgress, &CancelFlag::new())
        .expect("second run succeeds");

    assert_eq!(first.results, second.results);
    assert_eq!(first.job_id, second.job_id);
    assert_eq!(first.total_candidates, second.total_candidates);
}

#[test]
fn requested_ids_missing_from_pool_are_silently_skipped() {
    let response = engine()
        .run(
            &MatchRequest {
                job_criteria: job(),
                candidate_ids: Some(vec![
                    CandidateId("c2".to_string()),
                    CandidateId("ghost".to_string()),
                ]),
            },
            &pool(),
            &NullProgress,
            &CancelFlag::new(),
        )
        .expect("run succeeds");

    assert_eq!(response.total_candidates, 1);
    assert_eq!(response.results[0].candidate_id.as_str(), "c2");
}

#[test]
fn empty_resolved_subset_is_a_run_error() {
    let error = engine()
        .run(
            &MatchRequest {
                job_criteria: job(),
                candidate_ids: Some(vec![CandidateId("ghost".to_string())]),
            },
            &pool(),
            &NullProgress,
            &CancelFlag::new(),
        )
        .expect_err("empty subset rejected");

    assert_eq!(error, MatchRunError::NoCandidates);
    assert_eq!(error.to_string(), "no candidates to match");
}

#[test]
fn empty_pool_is_a_run_error() {
    let error = engine()
        .run(&request(), &[], &NullProgress, &CancelFlag::new())
        .expect_err("empty pool rejected");

    assert_eq!(error, MatchRunError::NoCandidates);
}

#[test]
fn blank_and_duplicate_ids_are_skipped_and_uncounted() {
    let pool = vec![
        candidate("", &["python"], 1.0),
        candidate("c1", &["python"], 1.0),
        candidate("c1", &["python", "sql"], 5.0),
        candidate("c2", &["sql"], 2.0),
    ];

    let response = engine()
        .run(&request(), &pool, &NullProgress, &CancelFlag::new())
        .expect("run succeeds");

    assert_eq!(response.total_candidates, 2);
    let ids: Vec<&str> = response
        .results
        .iter()
        .map(|result| result.candidate_id.as_str())
        .collect();
    assert!(ids.contains(&"c1"));
    assert!(ids.contains(&"c2"));

    // The duplicate row never replaced the first occurrence.
    let c1 = response
        .results
        .iter()
        .find(|result| result.candidate_id.as_str() == "c1")
        .expect("c1 scored");
    assert_eq!(c1.candidate.experience, 1.0);
}

#[test]
fn negative_weights_abort_before_scoring() {
    let mut request = request();
    request.job_criteria.weights = MatchWeights {
        skill_match: -1.0,
        experience: 0.5,
        project_quality: 0.5,
    };

    let progress = CollectingProgress::default();
    let error = engine()
        .run(&request, &pool(), &progress, &CancelFlag::new())
        .expect_err("negative weights rejected");

    assert!(matches!(error, MatchRunError::Weights(_)));
    assert!(progress.updates().is_empty());
}

#[test]
fn empty_required_skills_give_every_candidate_full_skill_credit() {
    let mut request = request();
    request.job_criteria.skills = Vec::new();

    let response = engine()
        .run(&request, &pool(), &NullProgress, &CancelFlag::new())
        .expect("run succeeds");

    for result in &response.results {
        assert_eq!(result.breakdown.skill_score, 100.0);
        assert!(result.matched_skills.is_empty());
        assert!(result.missing_skills.is_empty());
    }
}

#[test]
fn matched_and_missing_partition_the_requirement_set() {
    let response = engine()
        .run(&request(), &pool(), &NullProgress, &CancelFlag::new())
        .expect("run succeeds");

    for result in &response.results {
        let mut union: Vec<String> = result
            .matched_skills
            .iter()
            .chain(result.missing_skills.iter())
            .cloned()
            .collect();
        union.sort();
        assert_eq!(union, vec!["python", "sql"]);
        assert!(result
            .matched_skills
            .iter()
            .all(|skill| !result.missing_skills.contains(skill)));
    }
}

#[test]
fn progress_is_emitted_once_per_candidate() {
    let progress = CollectingProgress::default();
    let response = engine()
        .run(&request(), &pool(), &progress, &CancelFlag::new())
        .expect("run succeeds");

    let updates = progress.updates();
    // One starting update plus one per scored candidate.
    assert_eq!(updates.len(), response.total_candidates + 1);
    assert_eq!(updates[0].progress, 0);

    for (index, update) in updates.iter().skip(1).enumerate() {
        assert_eq!(update.phase, RunPhase::Calculating);
        assert_eq!(update.current_candidate, Some(index + 1));
        assert_eq!(update.total_candidates, Some(response.total_candidates));
    }

    let last = updates.last().expect("at least one update");
    assert_eq!(last.progress, 100);
    assert!(last.message.contains("3 of 3"));
}

#[test]
fn cancelled_run_produces_no_response() {
    let cancel = CancelFlag::new();
    cancel.cancel();

    let progress = CollectingProgress::default();
    let error = engine()
        .run(&request(), &pool(), &progress, &cancel)
        .expect_err("cancelled run rejected");

    match error {
        MatchRunError::Cancelled { scored, total } => {
            assert_eq!(scored, 0);
            assert_eq!(total, 3);
        }
        other => panic!("expected cancellation, got {other:?}"),
    }
    // Only the starting update went out before the first cancellation check.
    assert_eq!(progress.updates().len(), 1);
}

#[test]
fn results_embed_profile_snapshots() {
    let mut pool = pool();
    let response = engine()
        .run(&request(), &pool, &NullProgress, &CancelFlag::new())
        .expect("run succeeds");

    pool[0].name = "Edited After The Run".to_string();

    let c1 = response
        .results
        .iter()
        .find(|result| result.candidate_id.as_str() == "c1")
        .expect("c1 scored");
    assert_eq!(c1.candidate.name, "Candidate c1");
}

#[test]
fn relevant_projects_lift_the_project_dimension() {
    let mut strong = candidate("c9", &["python", "sql"], 3.0);
    strong.projects = vec![
        project("etl pipeline", &["python", "sql"]),
        project("warehouse", &["sql"]),
    ];
    let pool = vec![candidate("c8", &["python", "sql"], 3.0), strong];

    let response = engine()
        .run(&request(), &pool, &NullProgress, &CancelFlag::new())
        .expect("run succeeds");

    assert_eq!(response.results[0].candidate_id.as_str(), "c9");
    assert!(response.results[0].breakdown.project_score > 0.0);
    assert_eq!(response.results[1].breakdown.project_score, 0.0);
}
