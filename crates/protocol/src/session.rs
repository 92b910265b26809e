//! Session identity.
//!
//! The server knows which mailbox to answer from by two cookies sent with
//! every request: the game id and the player's display name. Values are
//! percent-encoded so any display name survives the `Cookie` header.

use std::fmt;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use serde::{Deserialize, Serialize};

pub const GAME_ID_COOKIE: &str = "COUP_game_id";
pub const PLAYER_NAME_COOKIE: &str = "COUP_name";

/// Bytes that may not appear raw in a cookie value. Non-ASCII is always escaped.
const COOKIE_VALUE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'%')
    .add(b',')
    .add(b';')
    .add(b'=')
    .add(b'\\');

fn encode_cookie_value(value: &str) -> String {
    utf8_percent_encode(value, COOKIE_VALUE).to_string()
}

fn decode_cookie_value(value: &str) -> String {
    percent_decode_str(value).decode_utf8_lossy().into_owned()
}

/// Opaque game identifier issued by the server's game store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(String);

impl GameId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for GameId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for GameId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A cookie required for session identity was absent or empty.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("missing session cookie {0}")]
pub struct MissingSessionCookie(pub &'static str);

/// Who is polling: one player seat in one game.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionIdentity {
    pub game_id: GameId,
    pub player_name: String,
}

impl SessionIdentity {
    pub fn new(game_id: impl Into<GameId>, player_name: impl Into<String>) -> Self {
        Self {
            game_id: game_id.into(),
            player_name: player_name.into(),
        }
    }

    /// Render the `Cookie` request header value.
    pub fn cookie_header(&self) -> String {
        format!(
            "{GAME_ID_COOKIE}={}; {PLAYER_NAME_COOKIE}={}",
            encode_cookie_value(self.game_id.as_str()),
            encode_cookie_value(&self.player_name)
        )
    }

    /// Parse a `Cookie` request header value. Unrelated cookies are ignored.
    pub fn from_cookie_header(header: &str) -> Result<Self, MissingSessionCookie> {
        let mut game_id = None;
        let mut player_name = None;

        for pair in header.split(';') {
            let Some((name, value)) = pair.trim().split_once('=') else {
                continue;
            };
            let value = decode_cookie_value(value.trim().trim_matches('"'));
            match name.trim() {
                GAME_ID_COOKIE => game_id = Some(value),
                PLAYER_NAME_COOKIE => player_name = Some(value),
                _ => {}
            }
        }

        let game_id = game_id
            .filter(|v| !v.is_empty())
            .ok_or(MissingSessionCookie(GAME_ID_COOKIE))?;
        let player_name = player_name
            .filter(|v| !v.is_empty())
            .ok_or(MissingSessionCookie(PLAYER_NAME_COOKIE))?;

        Ok(Self::new(game_id, player_name))
    }

    /// Mailbox key for this session.
    pub fn target(&self) -> EventTarget {
        EventTarget::new(&self.game_id, &self.player_name)
    }
}

/// Key of one player's event mailbox: `"{game_id}:{player_name}"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EventTarget(String);

impl EventTarget {
    pub fn new(game_id: &GameId, player_name: &str) -> Self {
        Self(format!("{game_id}:{player_name}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_header_is_parsed_back() {
        let session = SessionIdentity::new("a1b2", "Player1");
        let header = session.cookie_header();

        assert_eq!(header, "COUP_game_id=a1b2; COUP_name=Player1");
        assert_eq!(SessionIdentity::from_cookie_header(&header), Ok(session));
    }

    #[test]
    fn test_unrelated_cookies_are_ignored() {
        let parsed = SessionIdentity::from_cookie_header(
            "csrftoken=xyz; COUP_name=\"Player2\";COUP_game_id=g-7; theme",
        )
        .expect("parse");

        assert_eq!(parsed.game_id.as_str(), "g-7");
        assert_eq!(parsed.player_name, "Player2");
    }

    #[test]
    fn test_missing_cookies_are_reported() {
        assert_eq!(
            SessionIdentity::from_cookie_header("COUP_name=Player1"),
            Err(MissingSessionCookie(GAME_ID_COOKIE))
        );
        assert_eq!(
            SessionIdentity::from_cookie_header("COUP_game_id=g; COUP_name="),
            Err(MissingSessionCookie(PLAYER_NAME_COOKIE))
        );
    }

    #[test]
    fn test_non_ascii_name_is_escaped_and_restored() {
        let session = SessionIdentity::new("g1", "Zoë");
        let header = session.cookie_header();

        assert!(header.is_ascii());
        assert_eq!(header, "COUP_game_id=g1; COUP_name=Zo%C3%AB");
        assert_eq!(SessionIdentity::from_cookie_header(&header), Ok(session));
    }

    #[test]
    fn test_separator_in_name_does_not_split_the_cookie() {
        let session = SessionIdentity::new("g1", "a;b");
        let header = session.cookie_header();

        assert_eq!(header, "COUP_game_id=g1; COUP_name=a%3Bb");
        let parsed = SessionIdentity::from_cookie_header(&header).expect("parse");
        assert_eq!(parsed.player_name, "a;b");
        assert_eq!(parsed.target().as_str(), "g1:a;b");
    }

    #[test]
    fn test_quotes_spaces_and_percent_round_trip() {
        let session = SessionIdentity::new("g 1", "50% \"Duke\"=me");

        let parsed = SessionIdentity::from_cookie_header(&session.cookie_header()).expect("parse");

        assert_eq!(parsed, session);
    }

    #[test]
    fn test_target_joins_game_and_player() {
        let session = SessionIdentity::new("42", "Player1");
        assert_eq!(session.target().as_str(), "42:Player1");
    }
}
