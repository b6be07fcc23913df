//! Headless Monopoly simulation.

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod session;

use config::SimConfig;
use session::GameSession;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = SimConfig::from_env()?;
    let board = config.load_board()?;

    info!(
        "Starting simulation: {} for up to {} turns",
        config.players.join(", "),
        config.max_turns
    );

    let session = GameSession::new(&config.players, board, config.game_config())?;
    let summary = session.run(config.max_turns)?;

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
