//! Per-player event mailboxes with a long-poll hold.
//!
//! Each event target (`"{game_id}:{player_name}"`) has room for exactly one
//! pending event. Publishing over a pending event replaces it, and a poll
//! removes what it returns, so every event reaches at most one response.
//! Mailboxes of a finished game are only freed through `discard_game`.

use std::time::Duration;

use coup_protocol::{EventTarget, GameEvent, GameId};
use dashmap::DashMap;
use tokio::sync::Notify;

/// How long `GET /long_polling` holds a request open before answering `{}`.
pub const DEFAULT_LONG_POLL_HOLD_SECS: u64 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedConfig {
    pub hold: Duration,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            hold: Duration::from_secs(DEFAULT_LONG_POLL_HOLD_SECS),
        }
    }
}

impl FeedConfig {
    pub fn with_hold(hold: Duration) -> Self {
        Self { hold }
    }
}

#[derive(Debug, Default)]
pub struct EventFeed {
    pending: DashMap<EventTarget, GameEvent>,
    published: Notify,
}

impl EventFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Leave `event` for `target`, returning the event it displaced, if any.
    pub fn publish(&self, target: EventTarget, event: GameEvent) -> Option<GameEvent> {
        tracing::debug!(target = %target, event_type = %event.kind, "Event published");

        let displaced = self.pending.insert(target, event);
        if let Some(old) = &displaced {
            tracing::debug!(event_type = %old.kind, "Undelivered event replaced");
        }

        self.published.notify_waiters();
        displaced
    }

    /// Publish a copy of `event` to every listed player of `game_id`.
    pub fn broadcast_to_game<I, S>(&self, game_id: &GameId, players: I, event: &GameEvent) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        players
            .into_iter()
            .map(|player| self.publish(EventTarget::new(game_id, player.as_ref()), event.clone()))
            .count()
    }

    /// Remove and return the pending event for `target`.
    pub fn take(&self, target: &EventTarget) -> Option<GameEvent> {
        self.pending.remove(target).map(|(_, event)| event)
    }

    /// Drop every undelivered event addressed to `players` of `game_id`.
    pub fn discard_game<I, S>(&self, game_id: &GameId, players: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let discarded = players
            .into_iter()
            .filter_map(|player| self.take(&EventTarget::new(game_id, player.as_ref())))
            .count();
        if discarded > 0 {
            tracing::debug!(game_id = %game_id, discarded, "Undelivered events discarded");
        }
        discarded
    }

    pub fn has_pending(&self, target: &EventTarget) -> bool {
        self.pending.contains_key(target)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Take the event for `target` as soon as one exists, giving up after `hold`.
    pub async fn wait_for_event(&self, target: &EventTarget, hold: Duration) -> Option<GameEvent> {
        let deadline = tokio::time::Instant::now() + hold;

        loop {
            // Register before checking so a publish between the two is not missed.
            let notified = self.published.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if let Some(event) = self.take(target) {
                tracing::debug!(target = %target, event_type = %event.kind, "Event delivered");
                return Some(event);
            }

            if tokio::time::timeout_at(deadline, notified).await.is_err() {
                return None;
            }
        }
    }
}
