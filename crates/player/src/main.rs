//! Coup Live Player - headless long-polling client.

use std::sync::Arc;

use anyhow::Context;
use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use coup_player::infrastructure::{GameServerClient, LogNavigator};
use coup_player::ports::outbound::GameServerPort;
use coup_player::{EventDispatcher, HandlerRegistry, PlayerConfig, PollLoop, ReloadHandler};
use coup_protocol::{EventKind, SessionIdentity};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "coup_player=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Coup Live Player");

    let config = PlayerConfig::from_env()?;
    tracing::debug!(?config, "Loaded configuration");

    let client = GameServerClient::new(config.server_url.as_str(), config.request_timeout);

    let game_id = match config.game_id.clone() {
        Some(id) => id,
        None => {
            let id = client
                .create_game()
                .await
                .context("failed to create a new game")?;
            tracing::info!(game_id = %id, "Created game");
            id
        }
    };

    let session = SessionIdentity::new(game_id, config.player_name.clone());
    tracing::info!(game_id = %session.game_id, player = %session.player_name, "Joining game");

    let server: Arc<dyn GameServerPort> = Arc::new(client.with_session(session));

    let registry = HandlerRegistry::builder()
        .register(
            EventKind::Reload,
            ReloadHandler::new(
                Arc::new(LogNavigator),
                config.server_url.clone(),
                config.reload_url_mode,
            ),
        )
        .register(EventKind::UpdateBoard, |data: &Value| -> anyhow::Result<()> {
            tracing::info!(%data, "Board updated");
            Ok(())
        })
        .build();

    let handle = PollLoop::new(server, EventDispatcher::new(registry), config.poll_delay).spawn();

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for ctrl-c")?;

    tracing::info!("Shutting down");
    handle.stop();
    handle.join().await;

    Ok(())
}
