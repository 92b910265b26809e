//! Infrastructure adapters: HTTP transport, the poll loop and host adapters.

pub mod http_client;
pub mod host;
pub mod polling;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use http_client::GameServerClient;
pub use host::{LogNotice, LogNavigator};
