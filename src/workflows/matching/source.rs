use std::sync::Mutex;

use super::domain::CandidateProfile;

/// External origin of candidate profiles (manual entry UI, roster import).
/// The engine only requires well-formed profiles; where they come from is a
/// caller concern.
pub trait CandidateSource: Send + Sync {
    fn candidates(&self) -> Result<Vec<CandidateProfile>, SourceError>;
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SourceError {
    #[error("candidate source unavailable: {0}")]
    Unavailable(String),
}

/// In-memory source backed by a mutex, for demos and tests.
#[derive(Default)]
pub struct InMemoryCandidateSource {
    profiles: Mutex<Vec<CandidateProfile>>,
}

impl InMemoryCandidateSource {
    pub fn new(profiles: Vec<CandidateProfile>) -> Self {
        Self {
            profiles: Mutex::new(profiles),
        }
    }

    /// Swap the whole pool, e.g. after a fresh roster import.
    pub fn replace(&self, profiles: Vec<CandidateProfile>) {
        *self.profiles.lock().expect("candidate pool mutex poisoned") = profiles;
    }
}

impl CandidateSource for InMemoryCandidateSource {
    fn candidates(&self) -> Result<Vec<CandidateProfile>, SourceError> {
        Ok(self
            .profiles
            .lock()
            .expect("candidate pool mutex poisoned")
            .clone())
    }
}
