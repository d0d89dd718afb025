use serde::{Deserialize, Serialize};

/// Tuning for the project-quality curve. Kept as explicit configuration so
/// the heuristic is documented and stable across a run.
///
/// A project portfolio scores
/// `min(100, points_per_project * min(count, counted_projects_cap)
///  + overlap_points * overlap_ratio)`
/// where `overlap_ratio` is the fraction of the candidate's distinct project
/// technologies that appear in the job's required skill set. More relevant
/// projects never score lower.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub points_per_project: f64,
    pub counted_projects_cap: u32,
    pub overlap_points: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            points_per_project: 20.0,
            counted_projects_cap: 3,
            overlap_points: 40.0,
        }
    }
}
