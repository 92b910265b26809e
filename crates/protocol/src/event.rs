//! The long-poll event envelope.
//!
//! Every answer from `GET /long_polling` is a `GameEvent`. The `type` field
//! names the handler the client must run; `data` is opaque to everything but
//! that handler. An envelope with an empty `type` (the `{}` body) means
//! "nothing changed yet".

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::payloads::RedirectPayload;

/// Key inside `data` that flags the next move as belonging to an AI player.
pub const AI_TURN_FLAG: &str = "ai_turn";

/// Server-to-client notification carried by one long-poll response.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GameEvent {
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub data: Value,
}

impl GameEvent {
    /// The `{}` sentinel.
    pub fn no_change() -> Self {
        Self::default()
    }

    pub fn new(kind: EventKind, data: Value) -> Self {
        Self {
            kind: kind.as_str().to_string(),
            data,
        }
    }

    /// Build a `reload` event pointing at `payload.url`.
    pub fn reload(payload: &RedirectPayload) -> Self {
        Self::new(
            EventKind::Reload,
            serde_json::json!({ "url": payload.url }),
        )
    }

    /// Set `data.ai_turn = true`, turning `data` into an object if needed.
    pub fn with_ai_turn(mut self) -> Self {
        if !self.data.is_object() {
            self.data = Value::Object(serde_json::Map::new());
        }
        if let Value::Object(map) = &mut self.data {
            map.insert(AI_TURN_FLAG.to_string(), Value::Bool(true));
        }
        self
    }

    /// True for the empty sentinel: nothing to dispatch.
    pub fn is_no_change(&self) -> bool {
        self.kind.trim().is_empty()
    }

    /// Whether `data.ai_turn` is present and truthy.
    pub fn ai_turn(&self) -> bool {
        self.data.get(AI_TURN_FLAG).is_some_and(is_truthy)
    }

    /// Resolve the `type` tag into a known kind.
    pub fn event_kind(&self) -> Result<EventKind, UnknownEventKind> {
        self.kind.parse()
    }
}

/// Event kinds the client knows how to handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Navigate to `data.url`; server state changed enough to need a new page.
    Reload,
    /// Refresh the board in place from `data`.
    UpdateBoard,
}

impl EventKind {
    pub const ALL: [EventKind; 2] = [EventKind::Reload, EventKind::UpdateBoard];

    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Reload => "reload",
            EventKind::UpdateBoard => "update_board",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `type` tag did not name any known event kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown event type: {0:?}")]
pub struct UnknownEventKind(pub String);

impl FromStr for EventKind {
    type Err = UnknownEventKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownEventKind(s.to_string()))
    }
}

/// Truthiness of a JSON value as the page scripts saw it: `false`, `0`,
/// `""` and `null` are false, every object and array is true.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
