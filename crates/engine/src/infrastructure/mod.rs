//! Infrastructure: the event feed, ports and their in-memory adapters.

pub mod feed;
pub mod memory;
pub mod ports;
