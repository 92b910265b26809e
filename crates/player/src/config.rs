//! Player configuration

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use coup_protocol::GameId;
use url::Url;

use crate::application::reload::ReloadUrlMode;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";
pub const DEFAULT_PLAYER_NAME: &str = "Player1";
/// Pause between the end of one poll cycle and the start of the next.
pub const DEFAULT_POLL_DELAY_MS: u64 = 2000;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Client configuration loaded from environment
#[derive(Debug, Clone)]
pub struct PlayerConfig {
    /// Game server origin; also the base for `reload` targets
    pub server_url: Url,
    /// Game to join; a new game is created when absent
    pub game_id: Option<GameId>,
    /// Player name sent in the `COUP_name` cookie
    pub player_name: String,
    pub poll_delay: Duration,
    /// Per-request timeout. Must outlast the server's long-poll hold.
    pub request_timeout: Duration,
    pub reload_url_mode: ReloadUrlMode,
}

impl PlayerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let server_url = var("COUP_SERVER_URL").unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());

        Ok(Self {
            server_url: Url::parse(&server_url)
                .with_context(|| format!("COUP_SERVER_URL is not a valid URL: {server_url}"))?,

            game_id: var("COUP_GAME_ID").map(GameId::from),

            player_name: var("COUP_PLAYER_NAME")
                .unwrap_or_else(|| DEFAULT_PLAYER_NAME.to_string()),

            poll_delay: Duration::from_millis(
                var("COUP_POLL_DELAY_MS")
                    .map(|v| v.parse())
                    .transpose()
                    .context("COUP_POLL_DELAY_MS must be a whole number of milliseconds")?
                    .unwrap_or(DEFAULT_POLL_DELAY_MS),
            ),

            request_timeout: Duration::from_secs(
                var("COUP_REQUEST_TIMEOUT_SECS")
                    .map(|v| v.parse())
                    .transpose()
                    .context("COUP_REQUEST_TIMEOUT_SECS must be a whole number of seconds")?
                    .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            ),

            reload_url_mode: var("COUP_RELOAD_URL_MODE")
                .map(|v| v.parse::<ReloadUrlMode>())
                .transpose()
                .map_err(anyhow::Error::msg)
                .context("COUP_RELOAD_URL_MODE must be 'origin-relative' or 'absolute'")?
                .unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let config = PlayerConfig::from_lookup(lookup(&[])).expect("config");

        assert_eq!(config.server_url.as_str(), "http://localhost:8000/");
        assert_eq!(config.game_id, None);
        assert_eq!(config.player_name, "Player1");
        assert_eq!(config.poll_delay, Duration::from_millis(2000));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.reload_url_mode, ReloadUrlMode::OriginRelative);
    }

    #[test]
    fn test_values_are_read_and_trimmed() {
        let config = PlayerConfig::from_lookup(lookup(&[
            ("COUP_SERVER_URL", "https://coup.example.com"),
            ("COUP_GAME_ID", " 7f3c "),
            ("COUP_PLAYER_NAME", "alice"),
            ("COUP_POLL_DELAY_MS", "250"),
            ("COUP_RELOAD_URL_MODE", "absolute"),
        ]))
        .expect("config");

        assert_eq!(config.server_url.host_str(), Some("coup.example.com"));
        assert_eq!(config.game_id, Some(GameId::from("7f3c")));
        assert_eq!(config.player_name, "alice");
        assert_eq!(config.poll_delay, Duration::from_millis(250));
        assert_eq!(config.reload_url_mode, ReloadUrlMode::Absolute);
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config =
            PlayerConfig::from_lookup(lookup(&[("COUP_GAME_ID", ""), ("COUP_PLAYER_NAME", "  ")]))
                .expect("config");

        assert_eq!(config.game_id, None);
        assert_eq!(config.player_name, DEFAULT_PLAYER_NAME);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(PlayerConfig::from_lookup(lookup(&[("COUP_SERVER_URL", "not a url")])).is_err());
        assert!(PlayerConfig::from_lookup(lookup(&[("COUP_POLL_DELAY_MS", "soon")])).is_err());
        assert!(PlayerConfig::from_lookup(lookup(&[("COUP_RELOAD_URL_MODE", "sideways")])).is_err());
    }
}
