//! AI turn trigger.
//!
//! When a poll result says the next mover is an AI player, the client asks
//! the server to play that move. The request is fire-and-forget: the poll
//! loop never waits for it, failures are only logged, and the next poll that
//! still sees `ai_turn` acts as the retry. At most one trigger is in flight so
//! a slow server does not receive duplicate move requests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::ports::outbound::GameServerPort;

/// What `notify_ai_turn` did.
#[derive(Debug)]
pub enum NudgeOutcome {
    /// A trigger request was spawned; the handle completes when it settles.
    Sent(JoinHandle<()>),
    /// An earlier trigger is still outstanding; nothing was sent.
    AlreadyInFlight,
}

impl NudgeOutcome {
    pub fn was_sent(&self) -> bool {
        matches!(self, NudgeOutcome::Sent(_))
    }

    /// Wait for a spawned trigger to settle. No-op for `AlreadyInFlight`.
    pub async fn settled(self) {
        if let NudgeOutcome::Sent(task) = self {
            if let Err(e) = task.await {
                tracing::error!(error = %e, "AI turn trigger task ended abnormally");
            }
        }
    }
}

pub struct AiNudge {
    server: Arc<dyn GameServerPort>,
    in_flight: Arc<AtomicBool>,
}

impl AiNudge {
    pub fn new(server: Arc<dyn GameServerPort>) -> Self {
        Self {
            server,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Ask the server to play the AI player's move without waiting for it.
    pub fn notify_ai_turn(&self) -> NudgeOutcome {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::debug!("AI turn trigger already in flight, skipping");
            return NudgeOutcome::AlreadyInFlight;
        }

        let server = Arc::clone(&self.server);
        let guard = InFlightGuard(Arc::clone(&self.in_flight));
        let task = tokio::spawn(async move {
            let _guard = guard;
            match server.trigger_ai_turn().await {
                Ok(()) => tracing::debug!("AI turn triggered"),
                Err(e) => tracing::error!(error = %e, "Failed to trigger AI turn"),
            }
        });

        NudgeOutcome::Sent(task)
    }
}

/// Clears the in-flight flag when the trigger task finishes or is aborted.
struct InFlightGuard(Arc<AtomicBool>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::ports::outbound::MockGameServerPort;

    #[tokio::test]
    async fn test_trigger_is_sent_once() {
        let mut server = MockGameServerPort::new();
        server.expect_trigger_ai_turn().times(1).returning(|| Ok(()));

        let nudge = AiNudge::new(Arc::new(server));
        let outcome = nudge.notify_ai_turn();

        assert!(outcome.was_sent());
        outcome.settled().await;
        assert!(!nudge.is_in_flight());
    }

    #[tokio::test]
    async fn test_failure_is_logged_and_clears_in_flight() {
        let mut server = MockGameServerPort::new();
        server.expect_trigger_ai_turn().times(1).returning(|| {
            Err(TransportError::Status {
                path: coup_protocol::routes::AI_TURN,
                status: 500,
            })
        });

        let nudge = AiNudge::new(Arc::new(server));
        nudge.notify_ai_turn().settled().await;

        assert!(!nudge.is_in_flight());
    }

    #[tokio::test]
    async fn test_second_trigger_waits_for_first() {
        let mut server = MockGameServerPort::new();
        server.expect_trigger_ai_turn().times(1).returning(|| Ok(()));

        let nudge = AiNudge::new(Arc::new(server));

        // The current-thread test runtime does not run the spawned trigger
        // until this task yields, so the first one is still outstanding.
        let first = nudge.notify_ai_turn();
        let second = nudge.notify_ai_turn();

        assert!(first.was_sent());
        assert!(matches!(second, NudgeOutcome::AlreadyInFlight));

        first.settled().await;
        assert!(!nudge.is_in_flight());
    }
}
