mod config;
mod rules;
mod weights;

pub use config::ScoringConfig;
pub use weights::{NormalizedWeights, WeightError};

use super::domain::{CandidateProfile, JobCriteria, MatchResult, ReviewStatus, ScoreBreakdown};

/// Stateless scorer applying the per-dimension primitives and the weighted
/// aggregator to one candidate against one job. Deterministic for identical
/// inputs.
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Build one [`MatchResult`], rank unset, review status `new`. The
    /// embedded candidate is a snapshot taken here so later profile edits
    /// cannot leak into the result.
    pub fn score(
        &self,
        job: &JobCriteria,
        candidate: &CandidateProfile,
        weights: &NormalizedWeights,
    ) -> MatchResult {
        let partition = rules::partition_skills(&job.skills, &candidate.skills);

        let breakdown = ScoreBreakdown {
            skill_score: rules::skill_score(&partition),
            experience_score: rules::experience_score(candidate.experience, job.experience),
            project_score: rules::project_score(candidate, &job.skills, &self.config),
        };

        MatchResult {
            candidate_id: candidate.id.clone(),
            candidate: candidate.clone(),
            overall_score: weights.aggregate(&breakdown),
            breakdown,
            matched_skills: partition.matched,
            missing_skills: partition.missing,
            ai_insights: None,
            rank: None,
            status: ReviewStatus::New,
        }
    }
}
