use std::sync::Arc;

use super::domain::{CandidateId, MatchRequest, MatchResponse, MatchStatus, ReviewStatus};
use super::engine::{MatchEngine, MatchRunError};
use super::scoring::ScoringConfig;
use super::source::{CandidateSource, SourceError};
use super::store::{MatchRunStore, StoreError};

/// Error raised by the matching service.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MatchServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Run(#[from] MatchRunError),
}

/// Service composing the candidate source, the match engine, and the run
/// store, driving the store through `idle -> calculating -> success | error`.
pub struct MatchService<S> {
    source: Arc<S>,
    engine: MatchEngine,
    store: Arc<MatchRunStore>,
}

impl<S> MatchService<S>
where
    S: CandidateSource + 'static,
{
    pub fn new(source: Arc<S>, config: ScoringConfig) -> Self {
        Self {
            source,
            engine: MatchEngine::new(config),
            store: Arc::new(MatchRunStore::new()),
        }
    }

    /// Run a match to completion. Rejects the request when another run is
    /// already calculating. Run-level failures land in the `error` status
    /// with a descriptive message; a cancelled run leaves the store idle.
    pub fn run(&self, request: &MatchRequest) -> Result<MatchResponse, MatchServiceError> {
        let cancel = self.store.begin()?;

        let pool = match self.source.candidates() {
            Ok(pool) => pool,
            Err(error) => {
                self.store.fail(error.to_string());
                return Err(error.into());
            }
        };

        match self.engine.run(request, &pool, self.store.as_ref(), &cancel) {
            Ok(response) => {
                self.store.complete(response.clone());
                Ok(response)
            }
            Err(error @ MatchRunError::Cancelled { .. }) => {
                // The cancel path already reset the store to idle.
                Err(error.into())
            }
            Err(error) => {
                self.store.fail(error.to_string());
                Err(error.into())
            }
        }
    }

    pub fn status(&self) -> MatchStatus {
        self.store.status()
    }

    /// Most recent completed response, if the last run succeeded.
    pub fn latest(&self) -> Option<MatchResponse> {
        self.store.response()
    }

    /// Cancel an in-flight run. Returns false when nothing was calculating.
    pub fn cancel(&self) -> bool {
        self.store.cancel()
    }

    /// Reviewer boundary: shortlist/reject/review one result after a run.
    pub fn review(
        &self,
        candidate_id: &CandidateId,
        status: ReviewStatus,
    ) -> Result<(), MatchServiceError> {
        self.store.set_review_status(candidate_id, status)?;
        Ok(())
    }
}
