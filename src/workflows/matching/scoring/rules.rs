use std::collections::BTreeSet;

use super::config::ScoringConfig;
use super::super::domain::CandidateProfile;

/// Partition of a job's required skill set relative to one candidate.
/// `matched` and `missing` are disjoint; their union is the requirement set.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SkillPartition {
    pub(crate) matched: Vec<String>,
    pub(crate) missing: Vec<String>,
}

impl SkillPartition {
    pub(crate) fn required_len(&self) -> usize {
        self.matched.len() + self.missing.len()
    }
}

/// Trim, lowercase, and dedupe a raw skill list. Blank entries are dropped.
/// BTreeSet keeps iteration sorted so downstream output is reproducible.
pub(crate) fn normalize_skills(raw: &[String]) -> BTreeSet<String> {
    raw.iter()
        .map(|skill| skill.trim().to_lowercase())
        .filter(|skill| !skill.is_empty())
        .collect()
}

pub(crate) fn partition_skills(
    required: &[String],
    possessed: &[String],
) -> SkillPartition {
    let required = normalize_skills(required);
    let possessed = normalize_skills(possessed);

    let matched = required.intersection(&possessed).cloned().collect();
    let missing = required.difference(&possessed).cloned().collect();

    SkillPartition { matched, missing }
}

/// Fraction of required skills held. An empty requirement set means full
/// credit: no requirement, nothing to miss.
pub(crate) fn skill_score(partition: &SkillPartition) -> f64 {
    let required = partition.required_len();
    if required == 0 {
        return 100.0;
    }
    100.0 * partition.matched.len() as f64 / required as f64
}

/// Full credit at or above the requirement, degrading linearly to zero as
/// the shortfall approaches the full required amount.
pub(crate) fn experience_score(candidate_years: f64, required_years: f64) -> f64 {
    if required_years <= 0.0 || candidate_years >= required_years {
        return 100.0;
    }
    (100.0 * candidate_years / required_years).clamp(0.0, 100.0)
}

/// Project-quality heuristic combining portfolio size and technology overlap
/// with the job's required skills. See [`ScoringConfig`] for the curve.
pub(crate) fn project_score(
    candidate: &CandidateProfile,
    required_skills: &[String],
    config: &ScoringConfig,
) -> f64 {
    if candidate.projects.is_empty() {
        return 0.0;
    }

    let technologies: BTreeSet<String> = candidate
        .projects
        .iter()
        .flat_map(|project| normalize_skills(&project.technologies))
        .collect();

    let overlap_ratio = if technologies.is_empty() {
        0.0
    } else {
        let required = normalize_skills(required_skills);
        let overlapping = technologies
            .iter()
            .filter(|tech| required.contains(*tech))
            .count();
        overlapping as f64 / technologies.len() as f64
    };

    let counted = candidate
        .projects
        .len()
        .min(config.counted_projects_cap as usize) as f64;

    (config.points_per_project * counted + config.overlap_points * overlap_ratio).min(100.0)
}
