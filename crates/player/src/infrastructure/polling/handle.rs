//! Poll loop lifecycle management.
//!
//! This module provides types for observing a running poll loop and for
//! stopping it deterministically instead of relying on process teardown.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Where the poll loop is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    /// Created but not yet started
    Idle,
    /// Sleeping out the delay before the next request
    Waiting,
    /// A status request is outstanding or its event is being dispatched
    Polling,
    /// Cancelled; the loop will not run again
    Stopped,
}

impl PollState {
    /// Convert to u8 for atomic storage.
    pub fn to_u8(self) -> u8 {
        match self {
            PollState::Idle => 0,
            PollState::Waiting => 1,
            PollState::Polling => 2,
            PollState::Stopped => 3,
        }
    }

    /// Convert from u8 (atomic storage).
    pub fn from_u8(v: u8) -> Self {
        match v {
            1 => PollState::Waiting,
            2 => PollState::Polling,
            3 => PollState::Stopped,
            _ => PollState::Idle,
        }
    }
}

/// Internal helper to update poll state (used by the loop).
pub(crate) fn set_poll_state(state_ref: &AtomicU8, new_state: PollState) {
    state_ref.store(new_state.to_u8(), Ordering::SeqCst);
}

/// Handle to a spawned poll loop.
///
/// Dropping the handle does NOT stop the loop. Call `stop()` explicitly.
pub struct PollLoopHandle {
    state: Arc<AtomicU8>,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl PollLoopHandle {
    pub(crate) fn new(state: Arc<AtomicU8>, cancel: CancellationToken, task: JoinHandle<()>) -> Self {
        Self {
            state,
            cancel,
            task,
        }
    }

    pub fn state(&self) -> PollState {
        PollState::from_u8(self.state.load(Ordering::SeqCst))
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Request the loop to stop.
    ///
    /// An outstanding status request is abandoned; the loop exits at its next
    /// suspension point. Use `join()` to wait for it.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// Token that stops the loop when cancelled, for wiring into host shutdown.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Wait for the loop task to finish.
    pub async fn join(self) {
        if let Err(e) = self.task.await {
            tracing::error!(error = %e, "Poll loop task ended abnormally");
        }
    }

    pub fn observer(&self) -> PollStateObserver {
        PollStateObserver::new(Arc::clone(&self.state))
    }
}

/// Read-only view of a poll loop's state, shareable across tasks.
#[derive(Clone)]
pub struct PollStateObserver {
    state: Arc<AtomicU8>,
}

impl PollStateObserver {
    pub fn new(state: Arc<AtomicU8>) -> Self {
        Self { state }
    }

    pub fn state(&self) -> PollState {
        PollState::from_u8(self.state.load(Ordering::SeqCst))
    }

    pub fn is_stopped(&self) -> bool {
        self.state() == PollState::Stopped
    }
}
