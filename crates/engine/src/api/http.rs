//! HTTP routes.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::AppendHeaders,
    routing::{get, post},
    Json, Router,
};
use coup_protocol::routes::{AI_TURN, CREATE_GAME, HEALTH, LONG_POLLING};
use coup_protocol::{
    CreateGameResponse, GameEvent, SessionIdentity, GAME_ID_COOKIE, PLAYER_NAME_COOKIE,
};
use tower_http::trace::TraceLayer;

use crate::app::{App, HOST_PLAYER_NAME};
use crate::infrastructure::ports::EngineError;

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route(HEALTH, get(health))
        .route(CREATE_GAME, post(create_game))
        .route(LONG_POLLING, get(long_polling))
        .route(AI_TURN, get(ai_turn))
}

/// Routes with request tracing, bound to `app`.
pub fn router(app: Arc<App>) -> Router {
    routes().layer(TraceLayer::new_for_http()).with_state(app)
}

async fn health() -> &'static str {
    "OK"
}

async fn create_game(
    State(app): State<Arc<App>>,
) -> Result<
    (
        AppendHeaders<[(header::HeaderName, String); 2]>,
        Json<CreateGameResponse>,
    ),
    ApiError,
> {
    let game_id = app.games.create_game().await?;

    let cookies = AppendHeaders([
        (header::SET_COOKIE, format!("{GAME_ID_COOKIE}={game_id}; Path=/")),
        (header::SET_COOKIE, format!("{PLAYER_NAME_COOKIE}={HOST_PLAYER_NAME}; Path=/")),
    ]);

    Ok((
        cookies,
        Json(CreateGameResponse {
            game_id: game_id.to_string(),
        }),
    ))
}

async fn long_polling(
    State(app): State<Arc<App>>,
    headers: HeaderMap,
) -> Result<Json<GameEvent>, ApiError> {
    let session = session_from_headers(&headers)?;
    app.ensure_game(&session.game_id).await?;

    let event = app
        .feed
        .wait_for_event(&session.target(), app.feed_config.hold)
        .await
        .unwrap_or_else(GameEvent::no_change);

    Ok(Json(event))
}

async fn ai_turn(
    State(app): State<Arc<App>>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let session = session_from_headers(&headers)?;
    app.play_ai_turn(&session.game_id).await?;
    Ok(StatusCode::OK)
}

fn session_from_headers(headers: &HeaderMap) -> Result<SessionIdentity, ApiError> {
    let cookies = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .collect::<Vec<_>>()
        .join("; ");

    SessionIdentity::from_cookie_header(&cookies).map_err(|e| ApiError::BadRequest(e.to_string()))
}

/// API error type
#[derive(Debug)]
pub enum ApiError {
    NotFound,
    BadRequest(String),
    Internal(String),
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Not found").into_response(),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response()
            }
        }
    }
}

impl From<EngineError> for ApiError {
    fn from(e: EngineError) -> Self {
        match e {
            EngineError::GameNotFound(_) => ApiError::NotFound,
            other => ApiError::Internal(other.to_string()),
        }
    }
}
