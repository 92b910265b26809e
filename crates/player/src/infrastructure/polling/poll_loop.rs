//! The long-poll cycle.
//!
//! One logical timer: wait the configured delay, issue one status request,
//! dispatch its event, fire the AI nudge if flagged, repeat. The delay is
//! measured from the end of the previous cycle, so a slow server slows the
//! loop down instead of piling up requests. Nothing that goes wrong inside a
//! cycle ends the loop; only cancellation does.

use std::sync::atomic::AtomicU8;
use std::sync::Arc;
use std::time::Duration;

use coup_protocol::EventKind;
use tokio_util::sync::CancellationToken;

use super::ai_nudge::{AiNudge, NudgeOutcome};
use super::handle::{set_poll_state, PollLoopHandle, PollState, PollStateObserver};
use crate::application::dispatcher::{DispatchOutcome, EventDispatcher};
use crate::error::{ClientError, ProtocolError};
use crate::ports::outbound::GameServerPort;

/// What one poll cycle did.
#[derive(Debug)]
pub enum CycleOutcome {
    /// The server answered with the `{}` sentinel.
    NoChange,
    /// The event's handler ran.
    Dispatched {
        kind: EventKind,
        nudge: Option<NudgeOutcome>,
    },
    /// The event could not be dispatched; it was logged and skipped.
    DispatchFailed {
        error: ProtocolError,
        nudge: Option<NudgeOutcome>,
    },
    /// No usable response (network error, non-2xx, malformed body).
    TransportFailed(ClientError),
}

impl CycleOutcome {
    /// The AI nudge fired during this cycle, if any.
    pub fn into_nudge(self) -> Option<NudgeOutcome> {
        match self {
            CycleOutcome::Dispatched { nudge, .. } | CycleOutcome::DispatchFailed { nudge, .. } => {
                nudge
            }
            CycleOutcome::NoChange | CycleOutcome::TransportFailed(_) => None,
        }
    }
}

pub struct PollLoop {
    server: Arc<dyn GameServerPort>,
    dispatcher: EventDispatcher,
    nudge: AiNudge,
    delay: Duration,
    state: Arc<AtomicU8>,
}

impl PollLoop {
    pub fn new(server: Arc<dyn GameServerPort>, dispatcher: EventDispatcher, delay: Duration) -> Self {
        let nudge = AiNudge::new(Arc::clone(&server));
        Self {
            server,
            dispatcher,
            nudge,
            delay,
            state: Arc::new(AtomicU8::new(PollState::Idle.to_u8())),
        }
    }

    pub fn observer(&self) -> PollStateObserver {
        PollStateObserver::new(Arc::clone(&self.state))
    }

    /// Run exactly one request → dispatch → nudge cycle.
    pub async fn poll_once(&self) -> CycleOutcome {
        set_poll_state(&self.state, PollState::Polling);

        let event = match self.server.poll_event().await {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!(error = %e, "Long poll failed, retrying after delay");
                return CycleOutcome::TransportFailed(e);
            }
        };

        if event.is_no_change() {
            tracing::trace!("No change reported");
            return CycleOutcome::NoChange;
        }

        let dispatched = self.dispatcher.dispatch(&event);

        // The AI flag is independent of the event type and of dispatch success.
        let nudge = event.ai_turn().then(|| self.nudge.notify_ai_turn());

        match dispatched {
            Ok(DispatchOutcome::Handled(kind)) => CycleOutcome::Dispatched { kind, nudge },
            Ok(DispatchOutcome::Skipped) => CycleOutcome::NoChange,
            Err(error) => {
                tracing::warn!(
                    error = %error,
                    event_type = %event.kind,
                    "Skipping event that could not be dispatched"
                );
                CycleOutcome::DispatchFailed { error, nudge }
            }
        }
    }

    /// Poll until `cancel` fires.
    pub async fn run(self, cancel: CancellationToken) {
        tracing::info!(delay_ms = self.delay.as_millis() as u64, "Poll loop started");

        loop {
            set_poll_state(&self.state, PollState::Waiting);
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(self.delay) => {}
            }

            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = self.poll_once() => {}
            }
        }

        set_poll_state(&self.state, PollState::Stopped);
        tracing::info!("Poll loop stopped");
    }

    /// Spawn the loop on the current tokio runtime.
    pub fn spawn(self) -> PollLoopHandle {
        let cancel = CancellationToken::new();
        let state = Arc::clone(&self.state);
        let task = tokio::spawn(self.run(cancel.clone()));
        PollLoopHandle::new(state, cancel, task)
    }
}
