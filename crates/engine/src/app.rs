//! Application state and composition.

use std::sync::Arc;

use coup_protocol::{GameEvent, GameId, RedirectPayload};

use crate::infrastructure::feed::{EventFeed, FeedConfig};
use crate::infrastructure::ports::{AiTurnPort, EngineError, GameDirectoryPort};

/// Name given to the player who creates a game.
pub const HOST_PLAYER_NAME: &str = "Player1";

/// Main application state.
///
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub feed: Arc<EventFeed>,
    pub games: Arc<dyn GameDirectoryPort>,
    pub ai: Arc<dyn AiTurnPort>,
    pub feed_config: FeedConfig,
}

impl App {
    pub fn new(
        games: Arc<dyn GameDirectoryPort>,
        ai: Arc<dyn AiTurnPort>,
        feed_config: FeedConfig,
    ) -> Self {
        Self {
            feed: Arc::new(EventFeed::new()),
            games,
            ai,
            feed_config,
        }
    }

    async fn require_players(&self, game_id: &GameId) -> Result<Vec<String>, EngineError> {
        self.games
            .players(game_id)
            .await?
            .ok_or_else(|| EngineError::GameNotFound(game_id.clone()))
    }

    pub async fn ensure_game(&self, game_id: &GameId) -> Result<(), EngineError> {
        self.require_players(game_id).await.map(|_| ())
    }

    /// Publish `event` to every player of `game_id`. Returns how many mailboxes were written.
    pub async fn notify_game(&self, game_id: &GameId, event: &GameEvent) -> Result<usize, EngineError> {
        let players = self.require_players(game_id).await?;
        Ok(self.feed.broadcast_to_game(game_id, &players, event))
    }

    /// Remove a finished game and any events its players never collected.
    pub async fn close_game(&self, game_id: &GameId) -> Result<usize, EngineError> {
        let players = self.require_players(game_id).await?;
        let discarded = self.feed.discard_game(game_id, &players);
        self.games.remove_game(game_id).await?;
        tracing::info!(game_id = %game_id, discarded, "Game closed");
        Ok(discarded)
    }

    /// Run the AI for `game_id`, then send everyone back to the board.
    pub async fn play_ai_turn(&self, game_id: &GameId) -> Result<usize, EngineError> {
        self.ensure_game(game_id).await?;
        self.ai.play_ai_turn(game_id).await?;
        tracing::info!(game_id = %game_id, "AI turn played");

        self.notify_game(game_id, &GameEvent::reload(&RedirectPayload::game_board()))
            .await
    }
}
