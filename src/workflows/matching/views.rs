use serde::Serialize;

use super::domain::{MatchResponse, MatchResult};

/// Flat per-candidate row derivable from a response, for downstream
/// spreadsheet/PDF exporters. Formatting itself happens elsewhere; this is
/// just the tabular shape.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRowView {
    pub rank: u32,
    pub candidate_id: String,
    pub name: String,
    pub college: String,
    pub branch: String,
    pub overall_score: u8,
    pub skill_score: f64,
    pub experience_score: f64,
    pub project_score: f64,
    pub matched_skills: String,
    pub missing_skills: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phss_score: Option<f64>,
    pub status: &'static str,
}

impl MatchResult {
    pub fn to_row(&self) -> ResultRowView {
        ResultRowView {
            rank: self.rank.unwrap_or_default(),
            candidate_id: self.candidate_id.to_string(),
            name: self.candidate.name.clone(),
            college: self.candidate.college.clone(),
            branch: self.candidate.branch.clone(),
            overall_score: self.overall_score,
            skill_score: self.breakdown.skill_score,
            experience_score: self.breakdown.experience_score,
            project_score: self.breakdown.project_score,
            matched_skills: self.matched_skills.join(", "),
            missing_skills: self.missing_skills.join(", "),
            phss_score: self.candidate.phss_score,
            status: self.status.label(),
        }
    }
}

impl MatchResponse {
    /// Rows in rank order.
    pub fn export_rows(&self) -> Vec<ResultRowView> {
        self.results.iter().map(MatchResult::to_row).collect()
    }
}
