//! The `reload` handler and its URL join rule.
//!
//! The server sends `{"type":"reload","data":{"url":...}}` when state changed
//! enough that the player needs a fresh page. How `url` becomes a navigation
//! target is configurable; see `ReloadUrlMode`.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::Context;
use serde_json::Value;
use url::Url;

use coup_protocol::RedirectPayload;

use crate::application::dispatcher::EventHandler;
use crate::ports::outbound::NavigatorPort;

/// How `RedirectPayload::url` is turned into a navigation target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReloadUrlMode {
    /// `origin + "/" + url`. Leading slashes on `url` are dropped first.
    #[default]
    OriginRelative,
    /// `url` is already a complete URL and is used as-is.
    Absolute,
}

impl ReloadUrlMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ReloadUrlMode::OriginRelative => "origin-relative",
            ReloadUrlMode::Absolute => "absolute",
        }
    }
}

impl fmt::Display for ReloadUrlMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReloadUrlMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "origin-relative" | "relative" => Ok(Self::OriginRelative),
            "absolute" => Ok(Self::Absolute),
            other => Err(format!("unknown reload url mode: {other}")),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ReloadTargetError {
    #[error("server url {0} has no origin to join a path onto")]
    OpaqueOrigin(String),

    #[error("invalid reload url {url:?}: {source}")]
    Parse {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Build the navigation target for `raw` according to `mode`.
pub fn resolve_reload_target(
    origin: &Url,
    raw: &str,
    mode: ReloadUrlMode,
) -> Result<Url, ReloadTargetError> {
    let candidate = match mode {
        ReloadUrlMode::OriginRelative => {
            let tuple = origin.origin();
            if !tuple.is_tuple() {
                return Err(ReloadTargetError::OpaqueOrigin(origin.to_string()));
            }
            format!(
                "{}/{}",
                tuple.ascii_serialization(),
                raw.trim_start_matches('/')
            )
        }
        ReloadUrlMode::Absolute => raw.to_string(),
    };

    Url::parse(&candidate).map_err(|source| ReloadTargetError::Parse {
        url: raw.to_string(),
        source,
    })
}

/// Handler for `reload`: resolve the target and hand it to the navigator.
pub struct ReloadHandler {
    navigator: Arc<dyn NavigatorPort>,
    origin: Url,
    mode: ReloadUrlMode,
}

impl ReloadHandler {
    pub fn new(navigator: Arc<dyn NavigatorPort>, origin: Url, mode: ReloadUrlMode) -> Self {
        Self {
            navigator,
            origin,
            mode,
        }
    }
}

impl EventHandler for ReloadHandler {
    fn handle(&self, data: &Value) -> anyhow::Result<()> {
        let payload: RedirectPayload = serde_json::from_value(data.clone())
            .context("reload payload must carry a string url")?;
        let target = resolve_reload_target(&self.origin, &payload.url, self.mode)?;

        tracing::info!(target = %target, mode = %self.mode, "Navigating after reload event");
        self.navigator.navigate(&target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::outbound::MockNavigatorPort;
    use serde_json::json;

    fn origin() -> Url {
        Url::parse("http://localhost:8000/game_board").expect("origin")
    }

    #[test]
    fn test_origin_relative_join() {
        let target = resolve_reload_target(&origin(), "game/42", ReloadUrlMode::OriginRelative)
            .expect("join");
        assert_eq!(target.as_str(), "http://localhost:8000/game/42");
    }

    #[test]
    fn test_origin_relative_drops_leading_slash_and_page_path() {
        let origin = Url::parse("https://coup.example/deep/page?x=1").expect("origin");
        let target = resolve_reload_target(&origin, "/winning", ReloadUrlMode::OriginRelative)
            .expect("join");
        assert_eq!(target.as_str(), "https://coup.example/winning");
    }

    #[test]
    fn test_absolute_mode_uses_url_as_is() {
        let target = resolve_reload_target(
            &origin(),
            "https://other.example/game_board",
            ReloadUrlMode::Absolute,
        )
        .expect("absolute");
        assert_eq!(target.as_str(), "https://other.example/game_board");
    }

    #[test]
    fn test_absolute_mode_rejects_fragments() {
        let err = resolve_reload_target(&origin(), "game/42", ReloadUrlMode::Absolute)
            .expect_err("relative url in absolute mode");
        assert!(matches!(err, ReloadTargetError::Parse { .. }));
    }

    #[test]
    fn test_opaque_origin_is_rejected() {
        let origin = Url::parse("data:text/plain,coup").expect("origin");
        let err = resolve_reload_target(&origin, "game_board", ReloadUrlMode::OriginRelative)
            .expect_err("opaque origin");
        assert!(matches!(err, ReloadTargetError::OpaqueOrigin(_)));
    }

    #[test]
    fn test_mode_parses_from_config_strings() {
        assert_eq!(
            "origin-relative".parse::<ReloadUrlMode>(),
            Ok(ReloadUrlMode::OriginRelative)
        );
        assert_eq!(" Absolute ".parse::<ReloadUrlMode>(), Ok(ReloadUrlMode::Absolute));
        assert!("sideways".parse::<ReloadUrlMode>().is_err());
    }

    #[test]
    fn test_handler_navigates_to_joined_target() {
        let mut navigator = MockNavigatorPort::new();
        navigator
            .expect_navigate()
            .withf(|target: &Url| target.as_str() == "http://localhost:8000/game/42")
            .times(1)
            .returning(|_| Ok(()));

        let handler = ReloadHandler::new(
            Arc::new(navigator),
            origin(),
            ReloadUrlMode::OriginRelative,
        );

        handler
            .handle(&json!({ "url": "game/42" }))
            .expect("reload handled");
    }

    #[test]
    fn test_handler_rejects_payload_without_url() {
        let mut navigator = MockNavigatorPort::new();
        navigator.expect_navigate().never();

        let handler = ReloadHandler::new(
            Arc::new(navigator),
            origin(),
            ReloadUrlMode::OriginRelative,
        );

        assert!(handler.handle(&json!({ "ai_turn": true })).is_err());
    }
}
