//! Game Server Port - HTTP boundary to the authoritative game server

use coup_protocol::{GameEvent, GameId};

use crate::error::{ClientError, TransportError};

/// Requests the client makes to the game server.
///
/// Implementations attach the player's session identity themselves.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait::async_trait]
pub trait GameServerPort: Send + Sync {
    /// `GET /long_polling`. Returns the `{}` sentinel when nothing changed.
    async fn poll_event(&self) -> Result<GameEvent, ClientError>;

    /// `GET /ai-turn`. The response body is ignored.
    async fn trigger_ai_turn(&self) -> Result<(), TransportError>;

    /// `POST /create_game/`.
    async fn create_game(&self) -> Result<GameId, ClientError>;
}
