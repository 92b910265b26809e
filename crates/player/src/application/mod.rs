//! Application layer: what the client does with server events and form state.

pub mod action_gate;
pub mod dispatcher;
pub mod reload;
