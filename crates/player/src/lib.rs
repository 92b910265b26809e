//! Coup Live Player crate.
//!
//! Keeps a player's view of a Coup game in sync with the server by long
//! polling. Layout follows ports and adapters:
//!
//! - `application/` - event dispatch, the `reload` join rule and the ambassador
//!   selection gate
//! - `ports/` - traits for the game server, navigation and user notices
//! - `infrastructure/` - the reqwest adapter, the poll loop and the AI nudge
//! - `config` - environment-driven configuration

pub mod application;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod ports;

// Re-export commonly used entrypoints
pub use application::{
    action_gate::{gate_submission, verify_selection, SelectionForm, SelectionVerdict},
    dispatcher::{DispatchOutcome, EventDispatcher, EventHandler, HandlerRegistry},
    reload::{ReloadHandler, ReloadUrlMode},
};
pub use config::PlayerConfig;
pub use error::{ClientError, ProtocolError, TransportError, ValidationError};
pub use infrastructure::polling::{CycleOutcome, PollLoop, PollLoopHandle, PollState};
