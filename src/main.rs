//! Gateway bot (default binary).
//!
//! Serves one demo game to gateway clients over line-delimited JSON.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use gamecord::adapter::{Bot, BotConfig, Gateway};
use gamecord::core::{Game, Snake, Wander};
use gamecord::{clock_seed, GameChoice};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "gamecord=info".to_string()),
        )
        .init();

    let choice = GameChoice::from_env();
    let config = BotConfig::from_env(choice.name());
    let seed = clock_seed();
    info!(game = choice.name(), seed, "starting bot");

    match choice {
        GameChoice::Wander => serve(Wander::new(seed), config).await,
        GameChoice::Snake => serve(Snake::new(seed), config).await,
    }
}

async fn serve<G: Game + 'static>(game: G, config: BotConfig) -> Result<()> {
    let gateway = Gateway::start(config.gateway.clone()).await?;
    info!(addr = %gateway.addr, activity = %config.activity(), "gateway up");

    let bot = Bot::new(game, Arc::new(gateway.transport), config);
    tokio::select! {
        res = bot.run(gateway.events) => res,
        res = gateway.task => res?,
    }
}
