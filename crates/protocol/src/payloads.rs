//! Handler payloads and REST response bodies.

use serde::{Deserialize, Serialize};

/// Page fragment the server asks every player to reload after a state change.
pub const GAME_BOARD_URL: &str = "game_board";

/// Payload of a `reload` event.
///
/// `url` is either a path fragment relative to the server origin (`game_board`)
/// or an absolute URL, depending on how the client is configured to join it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectPayload {
    pub url: String,
}

impl RedirectPayload {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// The redirect every player receives after a move is applied.
    pub fn game_board() -> Self {
        Self::new(GAME_BOARD_URL)
    }
}

/// Response body of `POST /create_game/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateGameResponse {
    pub game_id: String,
}
