//! Test doubles shared by unit tests and (via the `testing` feature) downstream crates.

mod fixtures;

pub use fixtures::{wait_until, RecordingNavigator, RecordingNotice, ScriptedGameServer};
