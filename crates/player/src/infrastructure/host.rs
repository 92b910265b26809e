//! Host adapters for a headless native client.
//!
//! A terminal has no page to replace or alert box to raise, so navigation and
//! notices are written to the log.

use url::Url;

use crate::ports::outbound::{NavigatorPort, UserNoticePort};

/// Records navigation requests instead of replacing a page.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNavigator;

impl NavigatorPort for LogNavigator {
    fn navigate(&self, target: &Url) -> anyhow::Result<()> {
        tracing::info!(target = %target, "Page reload requested");
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotice;

impl UserNoticePort for LogNotice {
    fn alert(&self, message: &str) {
        tracing::warn!(notice = message, "User notice");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_navigator_accepts_any_target() {
        let target = Url::parse("http://localhost:8000/game_board").expect("url");
        assert!(LogNavigator.navigate(&target).is_ok());
    }

    #[test]
    fn test_log_notice_blocks_an_invalid_exchange() {
        use crate::application::action_gate::{gate_submission, CardCheckbox, SelectionForm};

        let form = SelectionForm::new(Some(2), vec![CardCheckbox::card("Duke", true)]);
        assert!(!gate_submission(&form, &LogNotice));
    }
}
