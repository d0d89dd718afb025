use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::domain::MatchStatus;

/// Sink receiving [`MatchStatus`] updates pushed by the matcher while it is
/// calculating. Push-only plumbing: implementations must tolerate bursts and
/// may keep only the latest value.
pub trait ProgressSink: Send + Sync {
    fn publish(&self, status: MatchStatus);
}

/// Sink that drops every update, for callers with no progress consumer.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn publish(&self, _status: MatchStatus) {}
}

/// Cooperative cancellation shared between a run and its owner. The matcher
/// checks the flag between candidates; a cancelled run emits no further
/// progress and produces no response.
#[derive(Debug, Default, Clone)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}
