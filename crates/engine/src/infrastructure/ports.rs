//! Port traits for infrastructure boundaries.
//!
//! Ports exist for:
//! - The game directory (which games exist and who sits at them)
//! - AI turns (whatever decides and applies an AI player's move)

use async_trait::async_trait;
use coup_protocol::GameId;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Game not found: {0}")]
    GameNotFound(GameId),
    #[error("Game store error: {0}")]
    Store(String),
    #[error("AI turn failed: {0}")]
    AiTurn(String),
}

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait GameDirectoryPort: Send + Sync {
    async fn create_game(&self) -> Result<GameId, EngineError>;

    /// Names of everyone seated in `game_id`, or `None` if there is no such game.
    async fn players(&self, game_id: &GameId) -> Result<Option<Vec<String>>, EngineError>;

    /// Forget `game_id`. Returns whether it existed.
    async fn remove_game(&self, game_id: &GameId) -> Result<bool, EngineError>;
}

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait AiTurnPort: Send + Sync {
    /// Let the AI players of `game_id` act until a human is to move.
    async fn play_ai_turn(&self, game_id: &GameId) -> Result<(), EngineError>;
}
