//! Scripted fakes for exercising the poll loop without a server.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use coup_protocol::{GameEvent, GameId};
use url::Url;

use crate::error::{ClientError, TransportError};
use crate::ports::outbound::{GameServerPort, NavigatorPort, UserNoticePort};

/// Replays a fixed list of poll responses, then reports "no change" forever.
#[derive(Default)]
pub struct ScriptedGameServer {
    script: Mutex<VecDeque<Result<GameEvent, ClientError>>>,
    polls: AtomicUsize,
    ai_triggers: AtomicUsize,
}

impl ScriptedGameServer {
    pub fn new(script: Vec<Result<GameEvent, ClientError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            ..Self::default()
        }
    }

    pub fn poll_count(&self) -> usize {
        self.polls.load(Ordering::SeqCst)
    }

    pub fn ai_trigger_count(&self) -> usize {
        self.ai_triggers.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl GameServerPort for ScriptedGameServer {
    async fn poll_event(&self) -> Result<GameEvent, ClientError> {
        self.polls.fetch_add(1, Ordering::SeqCst);
        let next = self
            .script
            .lock()
            .map_err(|_| ClientError::Transport(TransportError::Request {
                path: coup_protocol::routes::LONG_POLLING,
                message: "script lock poisoned".to_string(),
            }))?
            .pop_front();
        next.unwrap_or_else(|| Ok(GameEvent::no_change()))
    }

    async fn trigger_ai_turn(&self) -> Result<(), TransportError> {
        self.ai_triggers.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn create_game(&self) -> Result<GameId, ClientError> {
        Ok(GameId::from("scripted-game"))
    }
}

/// Remembers every navigation target.
#[derive(Default)]
pub struct RecordingNavigator {
    targets: Mutex<Vec<Url>>,
}

impl RecordingNavigator {
    pub fn targets(&self) -> Vec<Url> {
        self.targets.lock().map(|t| t.clone()).unwrap_or_default()
    }
}

impl NavigatorPort for RecordingNavigator {
    fn navigate(&self, target: &Url) -> anyhow::Result<()> {
        self.targets
            .lock()
            .map_err(|_| anyhow::anyhow!("navigator lock poisoned"))?
            .push(target.clone());
        Ok(())
    }
}

/// Remembers every alert shown to the user.
#[derive(Default)]
pub struct RecordingNotice {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotice {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().map(|m| m.clone()).unwrap_or_default()
    }
}

impl UserNoticePort for RecordingNotice {
    fn alert(&self, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.to_string());
        }
    }
}

/// Poll `condition` every few milliseconds until it holds or `limit` elapses.
pub async fn wait_until(limit: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let deadline = tokio::time::Instant::now() + limit;
    loop {
        if condition() {
            return true;
        }
        if tokio::time::Instant::now() >= deadline {
            return false;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}
