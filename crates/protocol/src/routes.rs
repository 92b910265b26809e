//! Route paths shared by the Engine router and the Player HTTP client.

/// Long-poll status endpoint. Answers with a `GameEvent` or the `{}` sentinel.
pub const LONG_POLLING: &str = "/long_polling";

/// Fire-and-forget trigger asking the server to play the AI player's move.
pub const AI_TURN: &str = "/ai-turn";

/// Creates a new game and answers with `CreateGameResponse`.
pub const CREATE_GAME: &str = "/create_game/";

pub const HEALTH: &str = "/api/health";
