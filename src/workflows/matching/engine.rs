use std::collections::HashSet;
use std::time::Instant;

use chrono::Utc;
use tracing::{info, warn};

use super::domain::{CandidateProfile, MatchRequest, MatchResponse, MatchStatus};
use super::progress::{CancelFlag, ProgressSink};
use super::scoring::{NormalizedWeights, ScoringConfig, ScoringEngine, WeightError};

/// Run-level failures. Per-candidate data problems are absorbed as logged
/// omissions instead; see [`MatchEngine::run`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MatchRunError {
    #[error("no candidates to match")]
    NoCandidates,
    #[error(transparent)]
    Weights(#[from] WeightError),
    #[error("match run cancelled after scoring {scored} of {total} candidates")]
    Cancelled { scored: usize, total: usize },
}

/// Orchestrates one matching run: resolves the candidate subset, scores each
/// profile, emits progress, then sorts and ranks. All-or-nothing per run: a
/// failure returns no partial results.
pub struct MatchEngine {
    scoring: ScoringEngine,
}

impl MatchEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self {
            scoring: ScoringEngine::new(config),
        }
    }

    /// Score `pool` against the request's job criteria.
    ///
    /// Candidates are processed in pool order; ranking is made deterministic
    /// by the final sort (overall score descending, candidate id ascending),
    /// never by processing order. Re-running with identical inputs produces
    /// identical results apart from the timing metadata.
    pub fn run(
        &self,
        request: &MatchRequest,
        pool: &[CandidateProfile],
        progress: &dyn ProgressSink,
        cancel: &CancelFlag,
    ) -> Result<MatchResponse, MatchRunError> {
        let started = Instant::now();
        let job = &request.job_criteria;

        // Malformed weights abort before any candidate is scored.
        let weights = NormalizedWeights::from_weights(&job.weights)?;

        let subset = resolve_subset(pool, request.candidate_ids.as_deref());
        if subset.is_empty() {
            return Err(MatchRunError::NoCandidates);
        }

        let total = subset.len();
        progress.publish(MatchStatus::starting());

        let mut results = Vec::with_capacity(total);
        for (scored, candidate) in subset.iter().copied().enumerate() {
            if cancel.is_cancelled() {
                return Err(MatchRunError::Cancelled { scored, total });
            }

            results.push(self.scoring.score(job, candidate, &weights));
            progress.publish(MatchStatus::scoring(scored + 1, total));
        }

        results.sort_by(|a, b| {
            b.overall_score
                .cmp(&a.overall_score)
                .then_with(|| a.candidate_id.cmp(&b.candidate_id))
        });
        for (index, result) in results.iter_mut().enumerate() {
            result.rank = Some(index as u32 + 1);
        }

        let response = MatchResponse {
            success: true,
            job_id: job.job_id(),
            results,
            total_candidates: total,
            execution_time_ms: started.elapsed().as_millis() as u64,
            timestamp: Utc::now(),
        };

        info!(
            job_id = %response.job_id,
            total = total,
            elapsed_ms = response.execution_time_ms,
            "match run completed"
        );

        Ok(response)
    }
}

/// Resolve the scored subset in pool order. Requested ids absent from the
/// pool are silently skipped. Profiles unusable for scoring (blank join key,
/// or a duplicate of an id already seen) are dropped with a logged omission
/// and do not count toward the pool size.
fn resolve_subset<'a>(
    pool: &'a [CandidateProfile],
    candidate_ids: Option<&[super::domain::CandidateId]>,
) -> Vec<&'a CandidateProfile> {
    let requested: Option<HashSet<&str>> =
        candidate_ids.map(|ids| ids.iter().map(|id| id.as_str()).collect());

    let mut seen: HashSet<&str> = HashSet::new();
    let mut subset = Vec::new();

    for candidate in pool {
        let id = candidate.id.as_str();

        if id.trim().is_empty() {
            warn!(name = %candidate.name, "skipping candidate with blank id");
            continue;
        }
        if !seen.insert(id) {
            warn!(candidate_id = id, "skipping candidate with duplicate id");
            continue;
        }
        if let Some(requested) = &requested {
            if !requested.contains(id) {
                continue;
            }
        }

        subset.push(candidate);
    }

    subset
}
