//! The long-poll cycle and its side channel.
//!
//! - `poll_loop` - request, dispatch, nudge, reschedule
//! - `ai_nudge` - fire-and-forget `/ai-turn` trigger, at most one in flight
//! - `handle` - lifecycle control and state observation for a running loop

mod ai_nudge;
mod handle;
mod poll_loop;

pub use ai_nudge::{AiNudge, NudgeOutcome};
pub use handle::{PollLoopHandle, PollState, PollStateObserver};
pub use poll_loop::{CycleOutcome, PollLoop};
