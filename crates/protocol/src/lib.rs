//! Coup Live Protocol - Shared types for the Player client and the Engine event feed
//!
//! This crate contains all types shared between the Engine (server) and Player (client):
//! - The long-poll event envelope (`GameEvent`) and its known kinds (`EventKind`)
//! - Handler payloads (`RedirectPayload`) and REST responses (`CreateGameResponse`)
//! - Session identity carried as cookies on every request
//! - Route paths both sides agree on
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - Only serde, serde_json and thiserror
//! 2. **No business logic** - Pure data types and serialization

pub mod event;
pub mod payloads;
pub mod routes;
pub mod session;

pub use event::{is_truthy, EventKind, GameEvent, UnknownEventKind, AI_TURN_FLAG};
pub use payloads::{CreateGameResponse, RedirectPayload, GAME_BOARD_URL};
pub use session::{
    EventTarget, GameId, MissingSessionCookie, SessionIdentity, GAME_ID_COOKIE, PLAYER_NAME_COOKIE,
};
