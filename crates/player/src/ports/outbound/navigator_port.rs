//! Navigator Port - Page navigation requested by the `reload` handler

use url::Url;

/// Moves the hosting page to a new location.
///
/// In a browser this discards all client state, including the poll loop.
/// Native hosts decide for themselves what navigation means.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait NavigatorPort: Send + Sync {
    fn navigate(&self, target: &Url) -> anyhow::Result<()>;
}
