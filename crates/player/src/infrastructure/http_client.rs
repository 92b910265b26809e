//! reqwest adapter for `GameServerPort`.

use std::time::Duration;

use reqwest::header::COOKIE;
use reqwest::{Client, Response};

use coup_protocol::{routes, CreateGameResponse, GameEvent, GameId, SessionIdentity};

use crate::error::{ClientError, ProtocolError, TransportError};
use crate::ports::outbound::GameServerPort;

/// HTTP client for the game server.
///
/// Session cookies are attached to every request once a session is set;
/// `create_game` works without one.
#[derive(Clone)]
pub struct GameServerClient {
    client: Client,
    base_url: String,
    session: Option<SessionIdentity>,
}

impl GameServerClient {
    /// `timeout` bounds every request and must exceed the server's long-poll hold.
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            session: None,
        }
    }

    pub fn with_session(mut self, session: SessionIdentity) -> Self {
        self.session = Some(session);
        self
    }

    pub fn session(&self) -> Option<&SessionIdentity> {
        self.session.as_ref()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        let request = self.client.get(self.url(path));
        match &self.session {
            Some(session) => request.header(COOKIE, session.cookie_header()),
            None => request,
        }
    }

    async fn send(
        path: &'static str,
        request: reqwest::RequestBuilder,
    ) -> Result<Response, TransportError> {
        let response = request.send().await.map_err(|e| TransportError::Request {
            path,
            message: e.to_string(),
        })?;

        if !response.status().is_success() {
            return Err(TransportError::Status {
                path,
                status: response.status().as_u16(),
            });
        }

        Ok(response)
    }

    async fn read_body(path: &'static str, response: Response) -> Result<String, TransportError> {
        response.text().await.map_err(|e| TransportError::Request {
            path,
            message: e.to_string(),
        })
    }
}

#[async_trait::async_trait]
impl GameServerPort for GameServerClient {
    async fn poll_event(&self) -> Result<GameEvent, ClientError> {
        let path = routes::LONG_POLLING;
        let response = Self::send(path, self.get(path)).await?;
        let body = Self::read_body(path, response).await?;

        let event = serde_json::from_str(&body).map_err(|e| ProtocolError::MalformedBody {
            path,
            message: e.to_string(),
        })?;
        Ok(event)
    }

    async fn trigger_ai_turn(&self) -> Result<(), TransportError> {
        let path = routes::AI_TURN;
        Self::send(path, self.get(path)).await?;
        Ok(())
    }

    async fn create_game(&self) -> Result<GameId, ClientError> {
        let path = routes::CREATE_GAME;
        let response = Self::send(path, self.client.post(self.url(path))).await?;
        let body = Self::read_body(path, response).await?;

        let created: CreateGameResponse =
            serde_json::from_str(&body).map_err(|e| ProtocolError::MalformedBody {
                path,
                message: e.to_string(),
            })?;
        Ok(GameId::new(created.game_id))
    }
}
