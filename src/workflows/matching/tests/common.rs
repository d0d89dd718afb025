use std::sync::{Arc, Mutex};

use crate::workflows::matching::domain::{
    CandidateId, CandidateProfile, CandidateProject, JobCriteria, MatchRequest, MatchStatus,
    MatchWeights,
};
use crate::workflows::matching::progress::ProgressSink;
use crate::workflows::matching::scoring::ScoringConfig;
use crate::workflows::matching::service::MatchService;
use crate::workflows::matching::source::{CandidateSource, InMemoryCandidateSource, SourceError};

pub(super) fn job() -> JobCriteria {
    JobCriteria {
        company: "Acme".to_string(),
        role: "Data Engineer".to_string(),
        experience: 2.0,
        location: "Pune".to_string(),
        description: Some("Pipelines and warehouse work".to_string()),
        skills: vec!["python".to_string(), "sql".to_string()],
        weights: MatchWeights {
            skill_match: 0.5,
            experience: 0.3,
            project_quality: 0.2,
        },
    }
}

pub(super) fn candidate(id: &str, skills: &[&str], experience: f64) -> CandidateProfile {
    CandidateProfile {
        id: CandidateId(id.to_string()),
        name: format!("Candidate {id}"),
        email: format!("{id}@example.edu"),
        college: "NIT Trichy".to_string(),
        branch: "CSE".to_string(),
        cgpa: 8.0,
        skills: skills.iter().map(|s| s.to_string()).collect(),
        experience,
        projects: Vec::new(),
        resume: None,
        phss_score: None,
    }
}

pub(super) fn project(title: &str, technologies: &[&str]) -> CandidateProject {
    CandidateProject {
        title: title.to_string(),
        description: String::new(),
        technologies: technologies.iter().map(|t| t.to_string()).collect(),
        duration: None,
        link: None,
    }
}

pub(super) fn pool() -> Vec<CandidateProfile> {
    vec![
        candidate("c1", &["python"], 1.0),
        candidate("c2", &["python", "sql"], 3.0),
        candidate("c3", &[], 0.0),
    ]
}

pub(super) fn request() -> MatchRequest {
    MatchRequest {
        job_criteria: job(),
        candidate_ids: None,
    }
}

pub(super) fn build_service() -> (
    MatchService<InMemoryCandidateSource>,
    Arc<InMemoryCandidateSource>,
) {
    let source = Arc::new(InMemoryCandidateSource::new(pool()));
    let service = MatchService::new(source.clone(), ScoringConfig::default());
    (service, source)
}

/// Progress sink recording every update, for burst and ordering assertions.
#[derive(Default)]
pub(super) struct CollectingProgress {
    updates: Mutex<Vec<MatchStatus>>,
}

impl CollectingProgress {
    pub(super) fn updates(&self) -> Vec<MatchStatus> {
        self.updates.lock().expect("progress mutex poisoned").clone()
    }
}

impl ProgressSink for CollectingProgress {
    fn publish(&self, status: MatchStatus) {
        self.updates
            .lock()
            .expect("progress mutex poisoned")
            .push(status);
    }
}

pub(super) struct UnavailableSource;

impl CandidateSource for UnavailableSource {
    fn candidates(&self) -> Result<Vec<CandidateProfile>, SourceError> {
        Err(SourceError::Unavailable("intake database offline".to_string()))
    }
}
