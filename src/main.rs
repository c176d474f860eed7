//! A discord music bot that hands search, queueing and playback over to a Lavalink node.

mod commands;
mod data;
mod error;
mod lib;
mod log;
mod setup;

pub use poise::serenity_prelude as serenity;

pub use data::Data;
pub use error::BotError;
pub use setup::Config;

/// Convenience type alias for [poise::Context].
pub type Context<'a> = poise::Context<'a, Data, BotError>;

#[tokio::main]
async fn main() -> Result<(), BotError> {
    // Read config first, logging settings live in there.
    let config = match Config::read() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return Err(e.into());
        }
    };

    // Keep the guard alive, dropping it stops the file writer.
    let _guard = log::install_tracing(&config);

    let mut client = setup::client(config).await?;

    tracing::info!("Starting client.");
    client.start().await?;

    Ok(())
}
