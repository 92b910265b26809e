//! In-memory game directory.

use async_trait::async_trait;
use coup_protocol::GameId;
use dashmap::DashMap;
use uuid::Uuid;

use super::ports::{EngineError, GameDirectoryPort};
use crate::app::HOST_PLAYER_NAME;

/// Keeps games and their seated players in a concurrent map.
///
/// New games start with the host seated under [`HOST_PLAYER_NAME`].
#[derive(Debug, Default)]
pub struct InMemoryGameDirectory {
    games: DashMap<GameId, Vec<String>>,
}

impl InMemoryGameDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a game with a fixed seating, replacing any existing one.
    pub fn insert_game(&self, game_id: GameId, players: Vec<String>) {
        self.games.insert(game_id, players);
    }

    pub fn seat_player(&self, game_id: &GameId, player: impl Into<String>) -> Result<(), EngineError> {
        let mut seats = self
            .games
            .get_mut(game_id)
            .ok_or_else(|| EngineError::GameNotFound(game_id.clone()))?;

        let player = player.into();
        if !seats.contains(&player) {
            seats.push(player);
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

#[async_trait]
impl GameDirectoryPort for InMemoryGameDirectory {
    async fn create_game(&self) -> Result<GameId, EngineError> {
        let game_id = GameId::new(Uuid::new_v4().to_string());
        self.games
            .insert(game_id.clone(), vec![HOST_PLAYER_NAME.to_string()]);
        tracing::info!(game_id = %game_id, "Game created");
        Ok(game_id)
    }

    async fn players(&self, game_id: &GameId) -> Result<Option<Vec<String>>, EngineError> {
        Ok(self.games.get(game_id).map(|seats| seats.clone()))
    }

    async fn remove_game(&self, game_id: &GameId) -> Result<bool, EngineError> {
        Ok(self.games.remove(game_id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_created_game_seats_the_host() {
        let directory = InMemoryGameDirectory::new();

        let game_id = directory.create_game().await.expect("create");
        let players = directory.players(&game_id).await.expect("players");

        assert_eq!(players, Some(vec![HOST_PLAYER_NAME.to_string()]));
        assert_eq!(directory.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_game_has_no_players() {
        let directory = InMemoryGameDirectory::new();

        let players = directory
            .players(&GameId::from("missing"))
            .await
            .expect("players");

        assert!(players.is_none());
    }

    #[tokio::test]
    async fn test_seat_player_is_idempotent() {
        let directory = InMemoryGameDirectory::new();
        let game_id = GameId::from("g1");
        directory.insert_game(game_id.clone(), vec!["alice".to_string()]);

        directory.seat_player(&game_id, "bob").expect("seat");
        directory.seat_player(&game_id, "bob").expect("seat");

        let players = directory.players(&game_id).await.expect("players");
        assert_eq!(players, Some(vec!["alice".to_string(), "bob".to_string()]));
    }

    #[tokio::test]
    async fn test_removed_game_is_gone() {
        let directory = InMemoryGameDirectory::new();
        let game_id = directory.create_game().await.expect("create");

        assert!(directory.remove_game(&game_id).await.expect("remove"));
        assert!(!directory.remove_game(&game_id).await.expect("remove again"));
        assert!(directory.players(&game_id).await.expect("players").is_none());
        assert!(directory.is_empty());
    }

    #[test]
    fn test_seat_player_in_unknown_game_fails() {
        let directory = InMemoryGameDirectory::new();

        let result = directory.seat_player(&GameId::from("missing"), "bob");

        assert!(matches!(result, Err(EngineError::GameNotFound(_))));
    }
}
