//! Client error taxonomy.
//!
//! Nothing here is fatal to the client: transport and protocol errors are
//! logged by the poll loop and the next cycle proceeds; validation errors
//! block a single form submission.

use coup_protocol::{EventKind, UnknownEventKind};

/// Network-level failure talking to the game server.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TransportError {
    /// The request never produced a response (connect error, timeout, reset).
    #[error("request to {path} failed: {message}")]
    Request { path: &'static str, message: String },

    /// The server answered with a non-2xx status.
    #[error("{path} answered HTTP {status}")]
    Status { path: &'static str, status: u16 },
}

/// The server's answer did not follow the event contract.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProtocolError {
    #[error("malformed response body from {path}: {message}")]
    MalformedBody { path: &'static str, message: String },

    #[error(transparent)]
    UnknownEventType(#[from] UnknownEventKind),

    /// A known kind arrived but the page registered no handler for it.
    #[error("no handler registered for event type {0}")]
    MissingHandler(EventKind),

    #[error("{kind} handler failed: {message}")]
    HandlerFailed { kind: EventKind, message: String },
}

/// Wrong number of cards checked for an ambassador exchange.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "You selected {selected} {}, but exactly {required} are required",
    card_noun(.selected)
)]
pub struct ValidationError {
    pub selected: usize,
    pub required: usize,
}

fn card_noun(count: &usize) -> &'static str {
    if *count == 1 {
        "card"
    } else {
        "cards"
    }
}

/// Any failure returned by the game server port.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ClientError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

impl ClientError {
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
