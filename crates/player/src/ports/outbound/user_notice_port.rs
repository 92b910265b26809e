//! User Notice Port - Blocking messages shown to the player

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait UserNoticePort: Send + Sync {
    /// Show `message` to the player (an alert on the web page).
    fn alert(&self, message: &str);
}
