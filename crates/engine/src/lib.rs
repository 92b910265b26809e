//! Coup Live Engine library.
//!
//! The server half of the long-polling contract. Game rules and AI opponents
//! are supplied by the host through port traits; this crate owns the
//! per-player event feed and the HTTP surface the client talks to.
//!
//! ## Structure
//!
//! - `infrastructure/` - the event feed, port traits and in-memory adapters
//! - `api/` - HTTP entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;

pub use app::{App, HOST_PLAYER_NAME};
pub use infrastructure::feed::{EventFeed, FeedConfig, DEFAULT_LONG_POLL_HOLD_SECS};
pub use infrastructure::ports::{AiTurnPort, EngineError, GameDirectoryPort};
