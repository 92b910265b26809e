//! Outbound ports - Interfaces for external services
//!
//! These ports define the contracts that infrastructure adapters must implement,
//! allowing application services to interact with the game server and the
//! hosting page without depending on concrete implementations.

pub mod game_server_port;
pub mod navigator_port;
pub mod user_notice_port;

pub use game_server_port::GameServerPort;
pub use navigator_port::NavigatorPort;
pub use user_notice_port::UserNoticePort;

#[cfg(any(test, feature = "testing"))]
pub use game_server_port::MockGameServerPort;
#[cfg(any(test, feature = "testing"))]
pub use navigator_port::MockNavigatorPort;
#[cfg(any(test, feature = "testing"))]
pub use user_notice_port::MockUserNoticePort;
