use std::sync::Mutex;

use super::domain::{CandidateId, MatchResponse, MatchStatus, ReviewStatus, RunPhase};
use super::progress::{CancelFlag, ProgressSink};

/// Failures of the run lifecycle or the reviewer boundary.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error("a matching run is already in flight")]
    RunInFlight,
    #[error("no completed match response available")]
    NoResponse,
    #[error("candidate {0} is not present in the latest results")]
    UnknownResult(CandidateId),
}

struct StoreState {
    status: MatchStatus,
    response: Option<MatchResponse>,
    cancel: Option<CancelFlag>,
}

/// Caller-owned state handle for one matching surface: the latest
/// [`MatchStatus`] and, once a run succeeds, its [`MatchResponse`].
///
/// Enforces at-most-one in-flight run; a second request while calculating is
/// rejected, never interleaved. Starting a new run discards the previous
/// response and status.
pub struct MatchRunStore {
    inner: Mutex<StoreState>,
}

impl Default for MatchRunStore {
    fn default() -> Self {
        Self {
            inner: Mutex::new(StoreState {
                status: MatchStatus::idle(),
                response: None,
                cancel: None,
            }),
        }
    }
}

impl MatchRunStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a run, replacing any previous outcome. Returns the cancellation
    /// flag the caller hands to the engine.
    pub fn begin(&self) -> Result<CancelFlag, StoreError> {
        let mut state = self.inner.lock().expect("run store mutex poisoned");
        if state.status.phase == RunPhase::Calculating {
            return Err(StoreError::RunInFlight);
        }

        let cancel = CancelFlag::new();
        state.status = MatchStatus::starting();
        state.response = None;
        state.cancel = Some(cancel.clone());
        Ok(cancel)
    }

    pub fn status(&self) -> MatchStatus {
        self.inner
            .lock()
            .expect("run store mutex poisoned")
            .status
            .clone()
    }

    pub fn response(&self) -> Option<MatchResponse> {
        self.inner
            .lock()
            .expect("run store mutex poisoned")
            .response
            .clone()
    }

    /// Record a completed run.
    pub fn complete(&self, response: MatchResponse) {
        let mut state = self.inner.lock().expect("run store mutex poisoned");
        state.status = MatchStatus::success(response.total_candidates);
        state.response = Some(response);
        state.cancel = None;
    }

    /// Record a failed run. The message, not a raw failure object, is what
    /// status consumers see.
    pub fn fail(&self, message: impl Into<String>) {
        let mut state = self.inner.lock().expect("run store mutex poisoned");
        state.status = MatchStatus::error(message);
        state.response = None;
        state.cancel = None;
    }

    /// Cancel an in-flight run: stop further progress, discard partials,
    /// return to idle. Returns false when nothing was calculating.
    pub fn cancel(&self) -> bool {
        let mut state = self.inner.lock().expect("run store mutex poisoned");
        if state.status.phase != RunPhase::Calculating {
            return false;
        }

        if let Some(cancel) = state.cancel.take() {
            cancel.cancel();
        }
        state.status = MatchStatus::idle();
        state.response = None;
        true
    }

    /// Reviewer boundary: update one result's review status in the latest
    /// response. The engine itself never touches this field.
    pub fn set_review_status(
        &self,
        candidate_id: &CandidateId,
        status: ReviewStatus,
    ) -> Result<(), StoreError> {
        let mut state = self.inner.lock().expect("run store mutex poisoned");
        let response = state.response.as_mut().ok_or(StoreError::NoResponse)?;

        let result = response
            .results
            .iter_mut()
            .find(|result| &result.candidate_id == candidate_id)
            .ok_or_else(|| StoreError::UnknownResult(candidate_id.clone()))?;

        result.status = status;
        Ok(())
    }
}

impl ProgressSink for MatchRunStore {
    /// Latest-value semantics. Updates are dropped unless a run is currently
    /// calculating, which also silences stragglers arriving after a
    /// cancellation reset the store to idle.
    fn publish(&self, status: MatchStatus) {
        let mut state = self.inner.lock().expect("run store mutex poisoned");
        if state.status.phase == RunPhase::Calculating {
            state.status = status;
        }
    }
}
