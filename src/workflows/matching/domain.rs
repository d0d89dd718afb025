use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for candidate profiles; the join key for a whole run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CandidateId(pub String);

impl CandidateId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One hiring requirement published by a recruiter. Immutable once a matching
/// run starts against it; revisions are new values, never edits mid-run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobCriteria {
    pub company: String,
    pub role: String,
    /// Minimum years of experience required.
    pub experience: f64,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Required skill names; order is irrelevant.
    pub skills: Vec<String>,
    pub weights: MatchWeights,
}

impl JobCriteria {
    /// Deterministic identifier derived from the company/role pair. The
    /// distilled dashboard contract carries no explicit job id, so responses
    /// use this slug as the join key instead.
    pub fn job_id(&self) -> String {
        let slug = |raw: &str| {
            raw.trim()
                .chars()
                .map(|c| {
                    if c.is_ascii_alphanumeric() {
                        c.to_ascii_lowercase()
                    } else {
                        '-'
                    }
                })
                .collect::<String>()
        };
        format!("{}-{}", slug(&self.company), slug(&self.role))
    }
}

/// Per-dimension weighting supplied with a job. Values need not sum to one;
/// the aggregator normalizes before use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchWeights {
    pub skill_match: f64,
    pub experience: f64,
    pub project_quality: f64,
}

/// One applicant profile as supplied by intake. Read-only during matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateProfile {
    pub id: CandidateId,
    pub name: String,
    pub email: String,
    pub college: String,
    pub branch: String,
    /// Grade point average on a 0-10 scale.
    #[serde(default)]
    pub cgpa: f64,
    #[serde(default)]
    pub skills: Vec<String>,
    /// Years of experience.
    #[serde(default)]
    pub experience: f64,
    #[serde(default)]
    pub projects: Vec<CandidateProject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume: Option<String>,
    /// Precomputed external score of unconfirmed provenance. Informational
    /// only; the aggregator never consumes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phss_score: Option<f64>,
}

/// One candidate-reported project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateProject {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// Reviewer-facing lifecycle of one result. Mutated only by reviewer actions
/// after a run completes; the engine never reads it during scoring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    #[default]
    New,
    Reviewed,
    Shortlisted,
    Rejected,
}

impl ReviewStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ReviewStatus::New => "new",
            ReviewStatus::Reviewed => "reviewed",
            ReviewStatus::Shortlisted => "shortlisted",
            ReviewStatus::Rejected => "rejected",
        }
    }
}

/// Per-dimension sub-scores composing the overall score, each in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub skill_score: f64,
    pub experience_score: f64,
    pub project_score: f64,
}

/// Outcome of scoring one candidate against one job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub candidate_id: CandidateId,
    /// Snapshot taken at scoring time. Later edits to the source profile must
    /// not retroactively alter a historical result.
    pub candidate: CandidateProfile,
    pub overall_score: u8,
    pub breakdown: ScoreBreakdown,
    /// Required skills the candidate holds, normalized and sorted.
    pub matched_skills: Vec<String>,
    /// Required skills the candidate lacks, normalized and sorted. Disjoint
    /// from `matched_skills`; the union is the job's requirement set.
    pub missing_skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_insights: Option<String>,
    /// 1-based position after deterministic sorting; set once per run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
    #[serde(default)]
    pub status: ReviewStatus,
}

/// Request envelope for one matching run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRequest {
    pub job_criteria: JobCriteria,
    /// Optional restriction of the pool; ids absent from the pool are
    /// silently skipped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidate_ids: Option<Vec<CandidateId>>,
}

/// Response envelope for one matching run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResponse {
    pub success: bool,
    pub job_id: String,
    /// Ranked results, best match first.
    pub results: Vec<MatchResult>,
    /// Size of the pool actually scored.
    pub total_candidates: usize,
    /// Wall-clock duration of the scoring window, in milliseconds.
    pub execution_time_ms: u64,
    /// Run completion instant.
    pub timestamp: DateTime<Utc>,
}

impl MatchResponse {
    /// Envelope for a run that failed before producing any result.
    pub fn failure(job_id: String) -> Self {
        Self {
            success: false,
            job_id,
            results: Vec::new(),
            total_candidates: 0,
            execution_time_ms: 0,
            timestamp: Utc::now(),
        }
    }
}

/// Phase of the run lifecycle: `idle -> calculating -> success | error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunPhase {
    Idle,
    Calculating,
    Success,
    Error,
}

impl RunPhase {
    pub const fn label(self) -> &'static str {
        match self {
            RunPhase::Idle => "idle",
            RunPhase::Calculating => "calculating",
            RunPhase::Success => "success",
            RunPhase::Error => "error",
        }
    }
}

/// Transient run state pushed to progress consumers while the matcher runs.
/// Exists only for the duration of a run; the next run replaces it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchStatus {
    #[serde(rename = "status")]
    pub phase: RunPhase,
    /// Completion percentage, 0-100.
    pub progress: u8,
    /// Human-readable phase description.
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_candidate: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_candidates: Option<usize>,
}

impl MatchStatus {
    pub fn idle() -> Self {
        Self {
            phase: RunPhase::Idle,
            progress: 0,
            message: "idle".to_string(),
            current_candidate: None,
            total_candidates: None,
        }
    }

    pub fn starting() -> Self {
        Self {
            phase: RunPhase::Calculating,
            progress: 0,
            message: "Resolving candidate pool".to_string(),
            current_candidate: None,
            total_candidates: None,
        }
    }

    pub fn scoring(processed: usize, total: usize) -> Self {
        let progress = ((processed as f64 / total as f64) * 100.0).round() as u8;
        Self {
            phase: RunPhase::Calculating,
            progress,
            message: format!("Scoring candidate {processed} of {total}"),
            current_candidate: Some(processed),
            total_candidates: Some(total),
        }
    }

    pub fn success(total: usize) -> Self {
        Self {
            phase: RunPhase::Success,
            progress: 100,
            message: format!("Matched {total} candidate(s)"),
            current_candidate: Some(total),
            total_candidates: Some(total),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            phase: RunPhase::Error,
            progress: 0,
            message: message.into(),
            current_candidate: None,
            total_candidates: None,
        }
    }
}
